/* src/server/core/rust/src/translator.rs */

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use quire_engine::{DEFAULT_LOCALE, replace_tokens, unescape_markers};

use crate::collaborators::BoxFuture;
use crate::errors::RenderError;

/// Localizes `[[namespace:key]]` tokens in rendered markup.
pub trait TranslationEngine: Send + Sync {
  fn translate<'a>(&'a self, text: &'a str, locale: &'a str) -> BoxFuture<'a, Result<String, RenderError>>;
}

/// Runs the engine, then normalizes the bracket escapes it leaves behind.
#[derive(Clone)]
pub struct Translator {
  engine: Arc<dyn TranslationEngine>,
}

impl Translator {
  pub fn new(engine: Arc<dyn TranslationEngine>) -> Self {
    Self { engine }
  }

  pub async fn translate(&self, text: &str, locale: &str) -> Result<String, RenderError> {
    let translated = self.engine.translate(text, locale).await?;
    Ok(unescape_markers(&translated))
  }
}

type Namespaces = HashMap<String, HashMap<String, String>>;

/// In-memory messages keyed locale -> namespace -> key.
/// Lookups miss to the fallback locale, then leave the token as written.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
  messages: HashMap<String, Namespaces>,
  fallback: String,
}

impl Default for MessageCatalog {
  fn default() -> Self {
    Self::new()
  }
}

impl MessageCatalog {
  pub fn new() -> Self {
    Self { messages: HashMap::new(), fallback: DEFAULT_LOCALE.to_string() }
  }

  pub fn with_fallback(mut self, locale: impl Into<String>) -> Self {
    self.fallback = locale.into();
    self
  }

  pub fn insert(
    &mut self,
    locale: impl Into<String>,
    namespace: impl Into<String>,
    key: impl Into<String>,
    message: impl Into<String>,
  ) {
    self
      .messages
      .entry(locale.into())
      .or_default()
      .entry(namespace.into())
      .or_default()
      .insert(key.into(), message.into());
  }

  pub fn add_namespace(
    &mut self,
    locale: impl Into<String>,
    namespace: impl Into<String>,
    messages: HashMap<String, String>,
  ) {
    self.messages.entry(locale.into()).or_default().entry(namespace.into()).or_default().extend(messages);
  }

  pub fn locales(&self) -> impl Iterator<Item = &str> {
    self.messages.keys().map(String::as_str)
  }

  pub fn lookup(&self, locale: &str, namespace: &str, key: &str) -> Option<&str> {
    let find = |loc: &str| {
      self.messages.get(loc).and_then(|ns| ns.get(namespace)).and_then(|m| m.get(key))
    };
    find(locale).or_else(|| find(&self.fallback)).map(String::as_str)
  }

  pub fn translate_text(&self, text: &str, locale: &str) -> String {
    replace_tokens(text, |ns, key| self.lookup(locale, ns, key).map(str::to_string))
  }
}

impl TranslationEngine for MessageCatalog {
  fn translate<'a>(&'a self, text: &'a str, locale: &'a str) -> BoxFuture<'a, Result<String, RenderError>> {
    Box::pin(async move { Ok(self.translate_text(text, locale)) })
  }
}

/// Load `<dir>/<locale>/<namespace>.json` files, each a flat `{key: message}` object.
pub fn load_message_catalog(dir: impl AsRef<Path>) -> Result<MessageCatalog, RenderError> {
  let dir = dir.as_ref();
  let mut catalog = MessageCatalog::new();

  let locales = std::fs::read_dir(dir)
    .map_err(|e| RenderError::translation(format!("read {}: {e}", dir.display())))?;
  for locale_entry in locales {
    let locale_entry = locale_entry.map_err(|e| RenderError::translation(e.to_string()))?;
    let locale_path = locale_entry.path();
    if !locale_path.is_dir() {
      continue;
    }
    let locale = locale_entry.file_name().to_string_lossy().into_owned();

    let files = std::fs::read_dir(&locale_path)
      .map_err(|e| RenderError::translation(format!("read {}: {e}", locale_path.display())))?;
    for file in files {
      let path = file.map_err(|e| RenderError::translation(e.to_string()))?.path();
      if path.extension().and_then(|e| e.to_str()) != Some("json") {
        continue;
      }
      let Some(namespace) = path.file_stem().and_then(|s| s.to_str()) else {
        continue;
      };
      let content = std::fs::read_to_string(&path)
        .map_err(|e| RenderError::translation(format!("read {}: {e}", path.display())))?;
      let messages: HashMap<String, String> = serde_json::from_str(&content)
        .map_err(|e| RenderError::translation(format!("parse {}: {e}", path.display())))?;
      catalog.add_namespace(locale.clone(), namespace, messages);
    }
  }

  tracing::debug!(dir = %dir.display(), locales = catalog.messages.len(), "message catalog loaded");
  Ok(catalog)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn catalog() -> MessageCatalog {
    let mut c = MessageCatalog::new();
    c.insert("en-GB", "pages", "home", "Home");
    c.insert("en-GB", "global", "welcome", "Welcome, %1");
    c.insert("en-GB", "global", "literal", "&#91;[global:welcome]&#93;");
    c.insert("fr", "pages", "home", "Accueil");
    c
  }

  #[test]
  fn lookup_falls_back_to_default_locale() {
    let c = catalog();
    assert_eq!(c.lookup("fr", "pages", "home"), Some("Accueil"));
    assert_eq!(c.lookup("fr", "global", "welcome"), Some("Welcome, %1"));
    assert_eq!(c.lookup("fr", "global", "missing"), None);
  }

  #[test]
  fn custom_fallback() {
    let c = catalog().with_fallback("fr");
    assert_eq!(c.lookup("de", "pages", "home"), Some("Accueil"));
  }

  #[tokio::test]
  async fn translator_translates_and_unescapes() {
    let translator = Translator::new(Arc::new(catalog()));
    let out = translator.translate("<b>[[global:literal]]</b>", "en-GB").await.unwrap();
    assert_eq!(out, "<b>[[global:welcome]]</b>");
  }

  #[tokio::test]
  async fn translator_is_idempotent() {
    let translator = Translator::new(Arc::new(catalog()));
    let text = "[[pages:home]] &#91;x&#93; [[global:welcome, bob]]";
    let once = translator.translate(text, "fr").await.unwrap();
    let twice = translator.translate(&once, "fr").await.unwrap();
    assert_eq!(once, "Accueil [x] Welcome, bob");
    assert_eq!(twice, once);
  }

  #[test]
  fn load_catalog_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("en-GB")).unwrap();
    std::fs::create_dir_all(dir.path().join("de")).unwrap();
    std::fs::write(dir.path().join("en-GB/pages.json"), r#"{"home": "Home"}"#).unwrap();
    std::fs::write(dir.path().join("de/pages.json"), r#"{"home": "Startseite"}"#).unwrap();
    std::fs::write(dir.path().join("de/README.txt"), "ignored").unwrap();

    let c = load_message_catalog(dir.path()).unwrap();
    assert_eq!(c.translate_text("[[pages:home]]", "de"), "Startseite");
    assert_eq!(c.translate_text("[[pages:home]]", "ja"), "Home");
    let mut locales: Vec<&str> = c.locales().collect();
    locales.sort_unstable();
    assert_eq!(locales, vec!["de", "en-GB"]);
  }

  #[test]
  fn load_catalog_rejects_bad_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("en-GB")).unwrap();
    std::fs::write(dir.path().join("en-GB/pages.json"), "[1, 2]").unwrap();
    let err = load_message_catalog(dir.path()).unwrap_err();
    assert_eq!(err.code(), "TRANSLATION_ERROR");
  }
}
