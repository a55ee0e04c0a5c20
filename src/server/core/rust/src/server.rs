/* src/server/core/rust/src/server.rs */

use std::sync::Arc;

use crate::collaborators::{
  BodyClassBuilder, DefaultBodyClass, HeaderFooterProvider, NoWidgets, PassthroughTags, TagParser,
  TemplateEngine, WidgetRenderer,
};
use crate::composer::ParallelComposer;
use crate::config::SiteConfig;
use crate::errors::RenderError;
use crate::hooks::{HookDispatcher, HookPipeline, HookRegistry};
use crate::interceptor::RenderInterceptor;
use crate::translator::{MessageCatalog, TranslationEngine, Translator};

/// Collects collaborators and produces a [`RenderInterceptor`].
/// Only the template engine is required; everything else has a default.
pub struct QuireServer {
  site: SiteConfig,
  hooks: Option<Arc<dyn HookDispatcher>>,
  templates: Option<Arc<dyn TemplateEngine>>,
  translation: Option<Arc<dyn TranslationEngine>>,
  widgets: Option<Arc<dyn WidgetRenderer>>,
  tags: Option<Arc<dyn TagParser>>,
  body_class: Option<Arc<dyn BodyClassBuilder>>,
  standard_header: Option<Arc<dyn HeaderFooterProvider>>,
  admin_header: Option<Arc<dyn HeaderFooterProvider>>,
}

impl QuireServer {
  pub fn new(site: SiteConfig) -> Self {
    Self {
      site,
      hooks: None,
      templates: None,
      translation: None,
      widgets: None,
      tags: None,
      body_class: None,
      standard_header: None,
      admin_header: None,
    }
  }

  pub fn hooks(mut self, hooks: Arc<dyn HookDispatcher>) -> Self {
    self.hooks = Some(hooks);
    self
  }

  pub fn template_engine(mut self, engine: Arc<dyn TemplateEngine>) -> Self {
    self.templates = Some(engine);
    self
  }

  pub fn translation(mut self, engine: Arc<dyn TranslationEngine>) -> Self {
    self.translation = Some(engine);
    self
  }

  pub fn widgets(mut self, widgets: Arc<dyn WidgetRenderer>) -> Self {
    self.widgets = Some(widgets);
    self
  }

  pub fn tags(mut self, tags: Arc<dyn TagParser>) -> Self {
    self.tags = Some(tags);
    self
  }

  pub fn body_class(mut self, builder: Arc<dyn BodyClassBuilder>) -> Self {
    self.body_class = Some(builder);
    self
  }

  /// Header/footer for regular site pages.
  pub fn standard_header(mut self, provider: Arc<dyn HeaderFooterProvider>) -> Self {
    self.standard_header = Some(provider);
    self
  }

  /// Header/footer for admin panel pages.
  pub fn admin_header(mut self, provider: Arc<dyn HeaderFooterProvider>) -> Self {
    self.admin_header = Some(provider);
    self
  }

  pub fn build(self) -> Result<RenderInterceptor, RenderError> {
    let templates =
      self.templates.ok_or_else(|| RenderError::internal("no template engine configured"))?;
    let translation = self.translation.unwrap_or_else(|| Arc::new(MessageCatalog::new()));
    let hooks = self.hooks.unwrap_or_else(|| Arc::new(HookRegistry::new()));

    let composer = ParallelComposer::new(
      templates,
      self.standard_header,
      self.admin_header,
      Translator::new(translation),
    );

    Ok(RenderInterceptor::new(
      self.site,
      HookPipeline::new(hooks),
      self.body_class.unwrap_or_else(|| Arc::new(DefaultBodyClass)),
      self.tags.unwrap_or_else(|| Arc::new(PassthroughTags)),
      self.widgets.unwrap_or_else(|| Arc::new(NoWidgets)),
      composer,
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::FakeTemplates;

  #[test]
  fn build_requires_template_engine() {
    let err = QuireServer::new(SiteConfig::default()).build().err().unwrap();
    assert_eq!(err.code(), "INTERNAL_ERROR");
  }

  #[test]
  fn build_with_defaults() {
    let site = SiteConfig { relative_path: "/forum".into(), ..Default::default() };
    let interceptor =
      QuireServer::new(site).template_engine(Arc::new(FakeTemplates::default())).build().unwrap();
    assert_eq!(interceptor.site().relative_path, "/forum");
  }
}
