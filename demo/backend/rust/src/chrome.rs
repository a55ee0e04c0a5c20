/* demo/backend/rust/src/chrome.rs */

use quire_server::{
  BoxFuture, HeaderFooterProvider, Locals, OptionsBag, RenderError, RenderRequest,
  TemplateCallback, TemplateEngine,
};

/// Toy template engine: each template is a fixed shape filled from the bag.
pub struct DemoTemplates;

impl TemplateEngine for DemoTemplates {
  fn render(&self, name: &str, data: &OptionsBag, done: TemplateCallback) {
    let title = data.get_str("title").unwrap_or_default();
    let html = match name {
      "home" => format!("<main class=\"home\"><h1>{title}</h1></main>"),
      "topic" => {
        let posts = data.get("posts").and_then(|p| p.as_array()).map_or(0, Vec::len);
        format!("<main class=\"topic\"><h1>{title}</h1><p>{posts} posts</p></main>")
      }
      "admin/dashboard" => "<main class=\"acp\"><h1>[[admin:dashboard]]</h1></main>".to_string(),
      other => {
        done(Err(RenderError::template(format!("unknown template {other}"))));
        return;
      }
    };
    done(Ok(html));
  }
}

pub struct SiteChrome;

impl HeaderFooterProvider for SiteChrome {
  fn render_header<'a>(
    &'a self,
    _request: &'a RenderRequest,
    _locals: &'a Locals,
    data: &'a OptionsBag,
  ) -> BoxFuture<'a, Result<String, RenderError>> {
    Box::pin(async move {
      let class = data.get_str("bodyClass").unwrap_or_default();
      Ok(format!(
        "<!DOCTYPE html><html><head><title>[[global:site]]</title></head><body class=\"{class}\">"
      ))
    })
  }

  fn render_footer<'a>(
    &'a self,
    _request: &'a RenderRequest,
    _locals: &'a Locals,
    _data: &'a OptionsBag,
  ) -> BoxFuture<'a, Result<String, RenderError>> {
    Box::pin(async { Ok("</body></html>".to_string()) })
  }
}

pub struct AdminChrome;

impl HeaderFooterProvider for AdminChrome {
  fn render_header<'a>(
    &'a self,
    _request: &'a RenderRequest,
    _locals: &'a Locals,
    _data: &'a OptionsBag,
  ) -> BoxFuture<'a, Result<String, RenderError>> {
    Box::pin(async { Ok("<!DOCTYPE html><html><body class=\"admin\"><nav>ACP</nav>".to_string()) })
  }

  fn render_footer<'a>(
    &'a self,
    _request: &'a RenderRequest,
    _locals: &'a Locals,
    _data: &'a OptionsBag,
  ) -> BoxFuture<'a, Result<String, RenderError>> {
    Box::pin(async { Ok("</body></html>".to_string()) })
  }
}
