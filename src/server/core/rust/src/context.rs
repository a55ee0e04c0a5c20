/* src/server/core/rust/src/context.rs */

use std::collections::BTreeMap;

use serde_json::Value;

/// Request state the render pipeline reads. Built once per request by the adapter.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
  /// Caller's user id; anything above zero is an authenticated user.
  pub uid: i64,
  /// Path the handling router is mounted at.
  pub base_url: String,
  /// Path relative to `base_url`.
  pub path: String,
  pub query: BTreeMap<String, String>,
  /// Route pattern that matched this request, e.g. "/api/".
  pub route_path: Option<String>,
}

impl RenderRequest {
  pub fn new(path: impl Into<String>) -> Self {
    Self { path: path.into(), ..Default::default() }
  }

  pub fn logged_in(&self) -> bool {
    self.uid > 0
  }

  pub fn query(&self, key: &str) -> Option<&str> {
    self.query.get(key).map(String::as_str)
  }

  /// `?pretty` with any value except empty, `0` or `false`.
  pub fn pretty_requested(&self) -> bool {
    matches!(self.query("pretty"), Some(v) if !v.is_empty() && v != "0" && v != "false")
  }
}

/// Per-request client settings.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
  pub user_lang: Option<String>,
  pub acp_lang: Option<String>,
}

/// Response-local state set by earlier middleware and read while rendering.
#[derive(Debug, Clone, Default)]
pub struct Locals {
  pub is_api: bool,
  pub render_header: bool,
  pub render_admin_header: bool,
  pub config: Option<ClientConfig>,
  pub meta_tags: Vec<Value>,
  pub link_tags: Vec<Value>,
  pub post_header: Option<String>,
  pub pre_footer: Option<String>,
  /// Name of the template last rendered for this response.
  pub template: Option<String>,
}

impl Locals {
  pub fn render_mode(&self) -> RenderMode {
    if self.render_header {
      RenderMode::Standard
    } else if self.render_admin_header {
      RenderMode::Admin
    } else {
      RenderMode::Bare
    }
  }

  pub fn user_lang(&self) -> Option<&str> {
    self.config.as_ref().and_then(|c| c.user_lang.as_deref())
  }

  pub fn acp_lang(&self) -> Option<&str> {
    self.config.as_ref().and_then(|c| c.acp_lang.as_deref())
  }
}

/// Which header/footer provider wraps the page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
  Standard,
  Admin,
  /// No header or footer.
  Bare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
  Json(String),
  Html(String),
  Redirect(String),
}

/// The response under construction. Once anything has been sent, the render
/// pipeline must not emit again.
#[derive(Debug, Clone)]
pub struct RenderResponse {
  pub locals: Locals,
  status: u16,
  headers: BTreeMap<String, String>,
  body: Option<ResponseBody>,
  sends: usize,
}

impl Default for RenderResponse {
  fn default() -> Self {
    Self::new(Locals::default())
  }
}

impl RenderResponse {
  pub fn new(locals: Locals) -> Self {
    Self { locals, status: 200, headers: BTreeMap::new(), body: None, sends: 0 }
  }

  pub fn status(&self) -> u16 {
    self.status
  }

  pub fn set_status(&mut self, status: u16) {
    self.status = status;
  }

  /// Header names are case-insensitive and stored lowercased.
  pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
    self.headers.insert(name.to_ascii_lowercase(), value.into());
  }

  pub fn header(&self, name: &str) -> Option<&str> {
    self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
  }

  pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
    self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn headers_sent(&self) -> bool {
    self.sends > 0
  }

  /// How many times something tried to send this response.
  pub fn send_count(&self) -> usize {
    self.sends
  }

  pub fn body(&self) -> Option<&ResponseBody> {
    self.body.as_ref()
  }

  pub fn send_html(&mut self, html: String) {
    self.finish(ResponseBody::Html(html));
  }

  pub fn send_json(&mut self, json: String) {
    self.finish(ResponseBody::Json(json));
  }

  pub fn redirect(&mut self, location: impl Into<String>) {
    self.status = 302;
    self.finish(ResponseBody::Redirect(location.into()));
  }

  /// Status, headers and body for an adapter to turn into its native response.
  pub fn into_parts(self) -> (u16, BTreeMap<String, String>, Option<ResponseBody>) {
    (self.status, self.headers, self.body)
  }

  // The first body wins; later sends are counted so double sends stay visible.
  fn finish(&mut self, body: ResponseBody) {
    self.sends += 1;
    if self.body.is_some() {
      tracing::warn!(sends = self.sends, "response already sent, dropping body");
      return;
    }
    self.body = Some(body);
  }
}
