/* src/server/engine/rust/src/options.rs */

//! The options bag: per-render, string-keyed template data.
//! Hooks may replace it wholesale, so nothing here assumes identity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known keys consumed by templates and the client-side router.
pub mod keys {
  pub const LOGGED_IN: &str = "loggedIn";
  pub const RELATIVE_PATH: &str = "relative_path";
  pub const TEMPLATE: &str = "template";
  pub const URL: &str = "url";
  pub const BODY_CLASS: &str = "bodyClass";
  pub const HEADER: &str = "_header";
  pub const WIDGETS: &str = "widgets";
  pub const TITLE: &str = "title";
  pub const LOCALS: &str = "_locals";
  pub const TEMPLATE_TO_RENDER: &str = "templateToRender";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionsBag(Map<String, Value>);

impl OptionsBag {
  pub fn new() -> Self {
    Self(Map::new())
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  pub fn get_str(&self, key: &str) -> Option<&str> {
    self.0.get(key).and_then(Value::as_str)
  }

  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
    self.0.insert(key.into(), value.into())
  }

  pub fn remove(&mut self, key: &str) -> Option<Value> {
    self.0.remove(key)
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.0.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn as_map(&self) -> &Map<String, Value> {
    &self.0
  }

  pub fn into_value(self) -> Value {
    Value::Object(self.0)
  }

  /// Template name a build hook asked to render instead of the requested one.
  /// Empty strings are ignored.
  pub fn template_to_render(&self) -> Option<&str> {
    self.get_str(keys::TEMPLATE_TO_RENDER).filter(|s| !s.is_empty())
  }
}

impl From<Map<String, Value>> for OptionsBag {
  fn from(map: Map<String, Value>) -> Self {
    Self(map)
  }
}

impl From<OptionsBag> for Value {
  fn from(bag: OptionsBag) -> Self {
    bag.into_value()
  }
}

/// Request-derived inputs for the synchronous options-building step.
pub struct RenderState<'a> {
  pub uid: i64,
  pub relative_path: &'a str,
  pub template: &'a str,
  /// Path the handling router is mounted at (may be empty).
  pub base_url: &'a str,
  /// Request path relative to `base_url`.
  pub path: &'a str,
}

/// `{name: t, [t]: true}`. Templates branch on the flag, so a template named
/// `name` overwrites the name field exactly like the object literal it replaces.
pub fn template_descriptor(template: &str) -> Value {
  let mut obj = Map::new();
  obj.insert("name".into(), Value::String(template.to_string()));
  obj.insert(template.to_string(), Value::Bool(true));
  Value::Object(obj)
}

/// Mounted path plus the remaining path, with a leading `/api` removed.
pub fn page_url(base_url: &str, path: &str) -> String {
  let path = path.strip_prefix("/api").unwrap_or(path);
  format!("{base_url}{path}")
}

/// Stamp login state, site path, template descriptor and page URL onto the bag.
pub fn apply_render_state(bag: &mut OptionsBag, state: &RenderState<'_>) {
  bag.insert(keys::LOGGED_IN, state.uid > 0);
  bag.insert(keys::RELATIVE_PATH, state.relative_path);
  bag.insert(keys::TEMPLATE, template_descriptor(state.template));
  bag.insert(keys::URL, page_url(state.base_url, state.path));
}
