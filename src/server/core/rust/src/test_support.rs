/* src/server/core/rust/src/test_support.rs */

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use quire_engine::OptionsBag;

use serde_json::Value;

use crate::collaborators::{
  BoxFuture, HeaderFooterProvider, TagParser, TemplateCallback, TemplateEngine, WidgetRenderer,
  WidgetRequest,
};
use crate::context::{Locals, RenderRequest};
use crate::errors::RenderError;
use crate::translator::{MessageCatalog, TranslationEngine};

/// Renders `<main>{name}</main>`, or a registered body, after an optional delay.
#[derive(Default)]
pub(crate) struct FakeTemplates {
  pub bodies: HashMap<String, String>,
  pub delay: Option<Duration>,
  pub rendered: Mutex<Vec<String>>,
}

impl FakeTemplates {
  pub fn with_body(mut self, name: &str, body: &str) -> Self {
    self.bodies.insert(name.into(), body.into());
    self
  }

  pub fn delayed(mut self, delay: Duration) -> Self {
    self.delay = Some(delay);
    self
  }

  pub fn rendered(&self) -> Vec<String> {
    self.rendered.lock().unwrap().clone()
  }
}

impl TemplateEngine for FakeTemplates {
  fn render(&self, name: &str, _data: &OptionsBag, done: TemplateCallback) {
    self.rendered.lock().unwrap().push(name.to_string());
    let html = self.bodies.get(name).cloned().unwrap_or_else(|| format!("<main>{name}</main>"));
    match self.delay {
      Some(delay) => {
        tokio::spawn(async move {
          tokio::time::sleep(delay).await;
          done(Ok(html));
        });
      }
      None => done(Ok(html)),
    }
  }
}

/// Fails every render through the callback.
pub(crate) struct FailingTemplates;

impl TemplateEngine for FailingTemplates {
  fn render(&self, name: &str, _data: &OptionsBag, done: TemplateCallback) {
    done(Err(RenderError::template(format!("{name} exploded"))));
  }
}

/// Never calls back.
pub(crate) struct SilentTemplates;

impl TemplateEngine for SilentTemplates {
  fn render(&self, _name: &str, _data: &OptionsBag, done: TemplateCallback) {
    drop(done);
  }
}

/// Header/footer provider that counts its calls.
pub(crate) struct CountingChrome {
  pub label: &'static str,
  pub header_delay: Option<Duration>,
  pub footer_delay: Option<Duration>,
  pub headers: AtomicUsize,
  pub footers: AtomicUsize,
}

impl CountingChrome {
  pub fn new(label: &'static str) -> Self {
    Self {
      label,
      header_delay: None,
      footer_delay: None,
      headers: AtomicUsize::new(0),
      footers: AtomicUsize::new(0),
    }
  }

  pub fn delayed(mut self, header: Duration, footer: Duration) -> Self {
    self.header_delay = Some(header);
    self.footer_delay = Some(footer);
    self
  }

  pub fn calls(&self) -> (usize, usize) {
    (self.headers.load(Ordering::SeqCst), self.footers.load(Ordering::SeqCst))
  }
}

impl HeaderFooterProvider for CountingChrome {
  fn render_header<'a>(
    &'a self,
    _request: &'a RenderRequest,
    _locals: &'a Locals,
    _data: &'a OptionsBag,
  ) -> BoxFuture<'a, Result<String, RenderError>> {
    Box::pin(async move {
      self.headers.fetch_add(1, Ordering::SeqCst);
      if let Some(delay) = self.header_delay {
        tokio::time::sleep(delay).await;
      }
      Ok(format!("<{}-header>", self.label))
    })
  }

  fn render_footer<'a>(
    &'a self,
    _request: &'a RenderRequest,
    _locals: &'a Locals,
    _data: &'a OptionsBag,
  ) -> BoxFuture<'a, Result<String, RenderError>> {
    Box::pin(async move {
      self.footers.fetch_add(1, Ordering::SeqCst);
      if let Some(delay) = self.footer_delay {
        tokio::time::sleep(delay).await;
      }
      Ok(format!("<{}-footer>", self.label))
    })
  }
}

pub(crate) fn catalog() -> Arc<MessageCatalog> {
  let mut c = MessageCatalog::new();
  c.insert("en-GB", "global", "header", "Site header");
  c.insert("en-GB", "pages", "home", "Home");
  c.insert("fr", "pages", "home", "Accueil");
  Arc::new(c)
}

/// Translation engine whose backing store is unreachable.
pub(crate) struct FailingTranslation;

impl TranslationEngine for FailingTranslation {
  fn translate<'a>(&'a self, _text: &'a str, locale: &'a str) -> BoxFuture<'a, Result<String, RenderError>> {
    Box::pin(async move { Err(RenderError::translation(format!("no messages for {locale}"))) })
  }
}

pub(crate) struct FailingTags;

impl TagParser for FailingTags {
  fn parse<'a>(
    &'a self,
    _request: &'a RenderRequest,
    _data: &'a OptionsBag,
    _meta_tags: &'a [Value],
    _link_tags: &'a [Value],
  ) -> BoxFuture<'a, Result<Value, RenderError>> {
    Box::pin(async { Err(RenderError::internal("bad meta tag")) })
  }
}

pub(crate) struct FailingWidgets;

impl WidgetRenderer for FailingWidgets {
  fn render<'a>(&'a self, req: WidgetRequest<'a>) -> BoxFuture<'a, Result<Value, RenderError>> {
    Box::pin(async move { Err(RenderError::internal(format!("widget area for {} failed", req.template))) })
  }
}
