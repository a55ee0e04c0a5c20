/* src/server/core/rust/src/hooks.rs */

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use quire_engine::OptionsBag;

use crate::collaborators::BoxFuture;
use crate::context::{RenderRequest, RenderResponse};
use crate::errors::RenderError;

/// Cross-cutting hook fired for every render after the template-specific one.
pub const RENDER_HOOK: &str = "filter:middleware.render";

/// Template-specific hook name, e.g. `filter:topic.build`.
pub fn build_hook(template: &str) -> String {
  format!("filter:{template}.build")
}

/// What every listener receives and returns. A listener may hand back a
/// different `template_data`; it becomes the options bag from then on.
pub struct HookPayload {
  pub request: Arc<RenderRequest>,
  pub response: RenderResponse,
  pub template_data: OptionsBag,
}

pub trait HookDispatcher: Send + Sync {
  fn fire<'a>(
    &'a self,
    name: &'a str,
    payload: HookPayload,
  ) -> BoxFuture<'a, Result<HookPayload, RenderError>>;
}

pub type HookFn =
  Arc<dyn Fn(HookPayload) -> BoxFuture<'static, Result<HookPayload, RenderError>> + Send + Sync>;

struct Listener {
  priority: i32,
  seq: usize,
  handler: HookFn,
}

/// In-process dispatcher. Listeners for one event run one after another,
/// lowest priority first, ties in registration order.
#[derive(Default)]
pub struct HookRegistry {
  listeners: HashMap<String, Vec<Listener>>,
  seq: usize,
}

impl HookRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn on<F, Fut>(&mut self, name: impl Into<String>, priority: i32, f: F) -> &mut Self
  where
    F: Fn(HookPayload) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HookPayload, RenderError>> + Send + 'static,
  {
    let handler: HookFn =
      Arc::new(move |payload| -> BoxFuture<'static, Result<HookPayload, RenderError>> {
        Box::pin(f(payload))
      });
    let seq = self.seq;
    self.seq += 1;

    let listeners = self.listeners.entry(name.into()).or_default();
    listeners.push(Listener { priority, seq, handler });
    listeners.sort_by_key(|l| (l.priority, l.seq));
    self
  }

  pub fn listener_count(&self, name: &str) -> usize {
    self.listeners.get(name).map_or(0, Vec::len)
  }
}

impl HookDispatcher for HookRegistry {
  fn fire<'a>(
    &'a self,
    name: &'a str,
    payload: HookPayload,
  ) -> BoxFuture<'a, Result<HookPayload, RenderError>> {
    Box::pin(async move {
      let Some(listeners) = self.listeners.get(name) else {
        return Ok(payload);
      };
      let mut payload = payload;
      for listener in listeners {
        payload = (listener.handler)(payload).await?;
      }
      Ok(payload)
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
  Build,
  Render,
}

impl fmt::Display for HookStage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      HookStage::Build => write!(f, "build"),
      HookStage::Render => write!(f, "render"),
    }
  }
}

pub enum PipelineOutcome {
  /// A listener sent the response itself; nothing else may run.
  Aborted { stage: HookStage, response: RenderResponse },
  Ready {
    payload: HookPayload,
    /// Replacement template chosen by a build listener, if any.
    template_to_render: Option<String>,
  },
}

/// Fires the build hook then the render hook, stopping as soon as the
/// response has been sent by a listener.
#[derive(Clone)]
pub struct HookPipeline {
  dispatcher: Arc<dyn HookDispatcher>,
}

impl HookPipeline {
  pub fn new(dispatcher: Arc<dyn HookDispatcher>) -> Self {
    Self { dispatcher }
  }

  pub async fn run(
    &self,
    template: &str,
    payload: HookPayload,
  ) -> Result<PipelineOutcome, RenderError> {
    let payload = self.dispatcher.fire(&build_hook(template), payload).await?;
    if payload.response.headers_sent() {
      return Ok(PipelineOutcome::Aborted { stage: HookStage::Build, response: payload.response });
    }
    let template_to_render = payload.template_data.template_to_render().map(str::to_string);

    let payload = self.dispatcher.fire(RENDER_HOOK, payload).await?;
    if payload.response.headers_sent() {
      return Ok(PipelineOutcome::Aborted { stage: HookStage::Render, response: payload.response });
    }

    Ok(PipelineOutcome::Ready { payload, template_to_render })
  }
}
