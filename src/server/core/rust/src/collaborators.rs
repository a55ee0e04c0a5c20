/* src/server/core/rust/src/collaborators.rs */

//! Capabilities the render pipeline consumes but does not implement:
//! templates, widgets, tag metadata, body classes and page chrome.

use std::future::Future;
use std::pin::Pin;

use quire_engine::OptionsBag;
use serde_json::Value;

use crate::context::{Locals, RenderRequest, RenderResponse};
use crate::errors::RenderError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Completion callback handed to a [`TemplateEngine`]. Call it exactly once.
pub type TemplateCallback = Box<dyn FnOnce(Result<String, RenderError>) + Send>;

/// Callback-style template primitive: render `name` with `data`, then call `done`.
/// The callback may be invoked synchronously or later from another task.
pub trait TemplateEngine: Send + Sync {
  fn render(&self, name: &str, data: &OptionsBag, done: TemplateCallback);
}

pub struct WidgetRequest<'a> {
  pub uid: i64,
  /// Template file the widgets are placed in, e.g. "topic.tpl".
  pub template: String,
  pub url: &'a str,
  pub template_data: &'a OptionsBag,
  pub request: &'a RenderRequest,
}

pub trait WidgetRenderer: Send + Sync {
  fn render<'a>(&'a self, req: WidgetRequest<'a>) -> BoxFuture<'a, Result<Value, RenderError>>;
}

/// Builds the `<head>` tag metadata stored under `_header.tags`.
pub trait TagParser: Send + Sync {
  fn parse<'a>(
    &'a self,
    request: &'a RenderRequest,
    data: &'a OptionsBag,
    meta_tags: &'a [Value],
    link_tags: &'a [Value],
  ) -> BoxFuture<'a, Result<Value, RenderError>>;
}

pub trait BodyClassBuilder: Send + Sync {
  /// `template` is the requested name; the bag's descriptor can't be trusted
  /// for it when the template is itself called `name`.
  fn build(
    &self,
    template: &str,
    request: &RenderRequest,
    response: &RenderResponse,
    data: &OptionsBag,
  ) -> String;
}

/// Header and footer markup for one render mode (standard site or admin panel).
pub trait HeaderFooterProvider: Send + Sync {
  fn render_header<'a>(
    &'a self,
    request: &'a RenderRequest,
    locals: &'a Locals,
    data: &'a OptionsBag,
  ) -> BoxFuture<'a, Result<String, RenderError>>;

  fn render_footer<'a>(
    &'a self,
    request: &'a RenderRequest,
    locals: &'a Locals,
    data: &'a OptionsBag,
  ) -> BoxFuture<'a, Result<String, RenderError>>;
}

/// Renders no widgets: every area is empty.
pub struct NoWidgets;

impl WidgetRenderer for NoWidgets {
  fn render<'a>(&'a self, _req: WidgetRequest<'a>) -> BoxFuture<'a, Result<Value, RenderError>> {
    Box::pin(async { Ok(Value::Object(Default::default())) })
  }
}

/// Passes the response-local meta and link tags through unchanged.
pub struct PassthroughTags;

impl TagParser for PassthroughTags {
  fn parse<'a>(
    &'a self,
    _request: &'a RenderRequest,
    _data: &'a OptionsBag,
    meta_tags: &'a [Value],
    link_tags: &'a [Value],
  ) -> BoxFuture<'a, Result<Value, RenderError>> {
    Box::pin(async move { Ok(serde_json::json!({ "meta": meta_tags, "link": link_tags })) })
  }
}

/// `page-admin page-admin-settings page-status-200 user-guest` style classes.
pub struct DefaultBodyClass;

impl BodyClassBuilder for DefaultBodyClass {
  fn build(
    &self,
    template: &str,
    request: &RenderRequest,
    response: &RenderResponse,
    _data: &OptionsBag,
  ) -> String {
    let mut classes = Vec::new();
    let mut prefix = String::from("page");
    for part in template.split('/').filter(|p| !p.is_empty()) {
      prefix.push('-');
      prefix.push_str(part);
      classes.push(prefix.clone());
    }
    classes.push(format!("page-status-{}", response.status()));
    classes.push(if request.logged_in() { "user-loggedin" } else { "user-guest" }.to_string());
    classes.join(" ")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use quire_engine::template_descriptor;

  #[test]
  fn body_class_nested_template() {
    let mut data = OptionsBag::new();
    data.insert("template", template_descriptor("admin/settings/general"));
    let class = DefaultBodyClass.build(
      "admin/settings/general",
      &RenderRequest::new("/"),
      &RenderResponse::default(),
      &data,
    );
    assert_eq!(
      class,
      "page-admin page-admin-settings page-admin-settings-general page-status-200 user-guest",
    );
  }

  #[test]
  fn body_class_logged_in() {
    let mut data = OptionsBag::new();
    data.insert("template", template_descriptor("topic"));
    let req = RenderRequest { uid: 5, ..RenderRequest::new("/topic/1") };
    let class = DefaultBodyClass.build("topic", &req, &RenderResponse::default(), &data);
    assert_eq!(class, "page-topic page-status-200 user-loggedin");
  }

  #[test]
  fn body_class_for_template_called_name() {
    let mut data = OptionsBag::new();
    data.insert("template", template_descriptor("name"));
    let class =
      DefaultBodyClass.build("name", &RenderRequest::new("/"), &RenderResponse::default(), &data);
    assert_eq!(class, "page-name page-status-200 user-guest");
  }

  #[tokio::test]
  async fn passthrough_tags() {
    let meta = vec![serde_json::json!({"name": "description", "content": "hi"})];
    let tags = PassthroughTags
      .parse(&RenderRequest::new("/"), &OptionsBag::new(), &meta, &[])
      .await
      .unwrap();
    assert_eq!(tags, serde_json::json!({"meta": [{"name": "description", "content": "hi"}], "link": []}));
  }
}
