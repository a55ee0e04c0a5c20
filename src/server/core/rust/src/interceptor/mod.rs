/* src/server/core/rust/src/interceptor/mod.rs */

use std::sync::Arc;

use quire_engine::options::keys;
use quire_engine::{OptionsBag, RenderState, apply_render_state, hydration_payload};
use serde_json::Value;
use tracing::Instrument;

use crate::collaborators::{BodyClassBuilder, TagParser, WidgetRenderer, WidgetRequest};
use crate::composer::{Composition, ParallelComposer};
use crate::config::SiteConfig;
use crate::context::{RenderRequest, RenderResponse};
use crate::emitter::{Done, Emitted, ResponseEmitter};
use crate::errors::RenderError;
use crate::hooks::{HookPayload, HookPipeline, HookStage, PipelineOutcome};
use crate::locale::resolve_locale;

/// Options and optional continuation for one render call.
///
/// Every accepted call shape converts into this at the boundary:
/// nothing, an options bag, a continuation alone, or both.
#[derive(Default)]
pub struct RenderArgs {
  pub options: OptionsBag,
  pub done: Option<Done>,
}

impl RenderArgs {
  pub fn new(options: OptionsBag) -> Self {
    Self { options, done: None }
  }

  pub fn with_done(mut self, done: impl FnOnce(String) + Send + 'static) -> Self {
    self.done = Some(Box::new(done));
    self
  }
}

impl From<()> for RenderArgs {
  fn from((): ()) -> Self {
    Self::default()
  }
}

impl From<OptionsBag> for RenderArgs {
  fn from(options: OptionsBag) -> Self {
    Self::new(options)
  }
}

impl From<serde_json::Map<String, Value>> for RenderArgs {
  fn from(map: serde_json::Map<String, Value>) -> Self {
    Self::new(map.into())
  }
}

impl From<Done> for RenderArgs {
  fn from(done: Done) -> Self {
    Self { options: OptionsBag::new(), done: Some(done) }
  }
}

impl From<(OptionsBag, Done)> for RenderArgs {
  fn from((options, done): (OptionsBag, Done)) -> Self {
    Self { options, done: Some(done) }
  }
}

/// Untyped options: `null` means none, an object is the bag, anything else
/// is a malformed call.
impl TryFrom<Value> for RenderArgs {
  type Error = RenderError;

  fn try_from(value: Value) -> Result<Self, Self::Error> {
    match value {
      Value::Null => Ok(Self::default()),
      Value::Object(map) => Ok(map.into()),
      other => Err(RenderError::validation(format!("render options must be an object, got {other}"))),
    }
  }
}

/// How a render call finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
  Json,
  Html,
  /// Assembled page handed to the caller's continuation.
  Delivered,
  /// A hook listener sent the response during the given stage.
  Aborted(HookStage),
}

impl From<Emitted> for RenderOutcome {
  fn from(emitted: Emitted) -> Self {
    match emitted {
      Emitted::Json => Self::Json,
      Emitted::Html => Self::Html,
      Emitted::Delivered => Self::Delivered,
    }
  }
}

/// Builds the options bag, runs the hook pipeline, composes the page and
/// emits it. Construct with [`crate::QuireServer`].
pub struct RenderInterceptor {
  site: SiteConfig,
  pipeline: HookPipeline,
  body_class: Arc<dyn BodyClassBuilder>,
  tags: Arc<dyn TagParser>,
  widgets: Arc<dyn WidgetRenderer>,
  composer: ParallelComposer,
  emitter: ResponseEmitter,
}

impl RenderInterceptor {
  pub(crate) fn new(
    site: SiteConfig,
    pipeline: HookPipeline,
    body_class: Arc<dyn BodyClassBuilder>,
    tags: Arc<dyn TagParser>,
    widgets: Arc<dyn WidgetRenderer>,
    composer: ParallelComposer,
  ) -> Self {
    let emitter = ResponseEmitter::new(site.environment);
    Self { site, pipeline, body_class, tags, widgets, composer, emitter }
  }

  pub fn site(&self) -> &SiteConfig {
    &self.site
  }

  /// Render `template` into `response`. Failures never escape: they are
  /// handed to `next`, the caller's error continuation.
  pub async fn render<N>(
    &self,
    request: Arc<RenderRequest>,
    response: &mut RenderResponse,
    template: &str,
    args: impl Into<RenderArgs>,
    next: N,
  ) where
    N: FnOnce(RenderError),
  {
    if let Err(err) = self.try_render(request, response, template, args.into()).await {
      tracing::warn!(template, error = %err, "render failed");
      next(err);
    }
  }

  /// Same pipeline as [`render`](Self::render), returning the outcome instead.
  pub async fn try_render(
    &self,
    request: Arc<RenderRequest>,
    response: &mut RenderResponse,
    template: &str,
    args: RenderArgs,
  ) -> Result<RenderOutcome, RenderError> {
    let span = tracing::debug_span!("render", template);
    self.run(request, response, template, args).instrument(span).await
  }

  /// Synchronous options-building step: login state, site path, template
  /// descriptor, page URL and body class.
  pub fn build_options(
    &self,
    request: &RenderRequest,
    response: &RenderResponse,
    template: &str,
    mut options: OptionsBag,
  ) -> OptionsBag {
    apply_render_state(
      &mut options,
      &RenderState {
        uid: request.uid,
        relative_path: &self.site.relative_path,
        template,
        base_url: &request.base_url,
        path: &request.path,
      },
    );
    let body_class = self.body_class.build(template, request, response, &options);
    options.insert(keys::BODY_CLASS, body_class);
    options
  }

  async fn run(
    &self,
    request: Arc<RenderRequest>,
    response: &mut RenderResponse,
    template: &str,
    args: RenderArgs,
  ) -> Result<RenderOutcome, RenderError> {
    if template.is_empty() {
      return Err(RenderError::validation("render called without a template name"));
    }
    let RenderArgs { options, done } = args;

    let options = self.build_options(&request, response, template, options);
    // Before the first await, so it cannot race a listener finishing the response
    if request.logged_in() {
      response.set_header("cache-control", "private");
    }

    // Keeps cache-control and anything else set before the hooks.
    let before_hooks = response.clone();
    let payload = HookPayload {
      request: request.clone(),
      response: std::mem::take(response),
      template_data: options,
    };
    let outcome = match self.pipeline.run(template, payload).await {
      Ok(outcome) => outcome,
      Err(err) => {
        // The failed listener kept the response; nothing was sent from it.
        *response = before_hooks;
        return Err(err);
      }
    };
    let (payload, template_to_render) = match outcome {
      PipelineOutcome::Aborted { stage, response: sent } => {
        tracing::debug!(%stage, "response sent by hook, render aborted");
        *response = sent;
        return Ok(RenderOutcome::Aborted(stage));
      }
      PipelineOutcome::Ready { payload, template_to_render } => (payload, template_to_render),
    };
    let HookPayload { response: returned, template_data: mut options, .. } = payload;
    *response = returned;

    let tags = self
      .tags
      .parse(&request, &options, &response.locals.meta_tags, &response.locals.link_tags)
      .await?;
    options.insert(keys::HEADER, serde_json::json!({ "tags": tags }));

    let url = options.get_str(keys::URL).unwrap_or_default().to_string();
    let widgets = self
      .widgets
      .render(WidgetRequest {
        uid: request.uid,
        template: format!("{template}.tpl"),
        url: &url,
        template_data: &options,
        request: &request,
      })
      .await?;
    options.insert(keys::WIDGETS, widgets);

    response.locals.template = Some(template.to_string());
    options.remove(keys::LOCALS);

    if response.locals.is_api {
      let emitted = self.emitter.emit_api(&request, response, options)?;
      tracing::debug!("api response sent");
      return Ok(emitted.into());
    }

    let payload_json = hydration_payload(&options)?;
    let locale = resolve_locale(&request, &response.locals);
    let render_name = template_to_render.as_deref().unwrap_or(template);
    let fragments = self
      .composer
      .compose(&Composition {
        request: &request,
        locals: &response.locals,
        data: &options,
        template: render_name,
        locale: &locale,
      })
      .await?;

    let emitted = self.emitter.emit_page(response, &fragments, &payload_json, done);
    tracing::debug!(render_name, %locale, ?emitted, "page rendered");
    Ok(emitted.into())
  }
}
