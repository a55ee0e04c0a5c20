/* src/server/core/rust/src/lib.rs */

pub mod collaborators;
pub mod composer;
pub mod config;
pub mod context;
pub mod emitter;
pub mod errors;
pub mod hooks;
pub mod interceptor;
pub mod locale;
pub mod server;
pub mod translator;

#[cfg(test)]
mod test_support;

// Re-exports for ergonomic use
pub use collaborators::{
  BodyClassBuilder, BoxFuture, DefaultBodyClass, HeaderFooterProvider, NoWidgets, PassthroughTags,
  TagParser, TemplateCallback, TemplateEngine, WidgetRenderer, WidgetRequest,
};
pub use composer::{Composition, ParallelComposer, render_template};
pub use config::{Environment, SiteConfig, load_site_config};
pub use context::{ClientConfig, Locals, RenderMode, RenderRequest, RenderResponse, ResponseBody};
pub use emitter::{API_ROOT, Done, Emitted, HOME_TITLE, ResponseEmitter};
pub use errors::RenderError;
pub use hooks::{
  HookDispatcher, HookFn, HookPayload, HookPipeline, HookRegistry, HookStage, PipelineOutcome,
  RENDER_HOOK, build_hook,
};
pub use interceptor::{RenderArgs, RenderInterceptor, RenderOutcome};
pub use locale::resolve_locale;
pub use quire_engine::{Fragments, OptionsBag};
pub use server::QuireServer;
pub use translator::{MessageCatalog, TranslationEngine, Translator, load_message_catalog};
