/* src/server/core/rust/src/composer.rs */

use std::sync::Arc;

use futures_util::future::try_join3;
use quire_engine::{Fragments, OptionsBag};
use tokio::sync::oneshot;

use crate::collaborators::{HeaderFooterProvider, TemplateEngine};
use crate::context::{Locals, RenderMode, RenderRequest};
use crate::errors::RenderError;
use crate::translator::Translator;

/// Inputs shared read-only by the three fragment producers.
pub struct Composition<'a> {
  pub request: &'a RenderRequest,
  pub locals: &'a Locals,
  pub data: &'a OptionsBag,
  pub template: &'a str,
  pub locale: &'a str,
}

#[derive(Clone, Copy)]
enum Slot {
  Header,
  Footer,
}

/// Produces header, content and footer concurrently, each translated.
#[derive(Clone)]
pub struct ParallelComposer {
  templates: Arc<dyn TemplateEngine>,
  standard: Option<Arc<dyn HeaderFooterProvider>>,
  admin: Option<Arc<dyn HeaderFooterProvider>>,
  translator: Translator,
}

impl ParallelComposer {
  pub fn new(
    templates: Arc<dyn TemplateEngine>,
    standard: Option<Arc<dyn HeaderFooterProvider>>,
    admin: Option<Arc<dyn HeaderFooterProvider>>,
    translator: Translator,
  ) -> Self {
    Self { templates, standard, admin, translator }
  }

  /// All three start together; the first failure wins and the rest are dropped.
  pub async fn compose(&self, input: &Composition<'_>) -> Result<Fragments, RenderError> {
    let (header, content, footer) = try_join3(
      self.chrome(Slot::Header, input),
      self.content(input),
      self.chrome(Slot::Footer, input),
    )
    .await?;
    Ok(Fragments { header, content, footer })
  }

  async fn content(&self, input: &Composition<'_>) -> Result<String, RenderError> {
    let html = render_template(self.templates.as_ref(), input.template, input.data).await?;
    self.translator.translate(&html, input.locale).await
  }

  async fn chrome(&self, slot: Slot, input: &Composition<'_>) -> Result<String, RenderError> {
    let mode = input.locals.render_mode();
    let html = match mode {
      RenderMode::Bare => String::new(),
      RenderMode::Standard | RenderMode::Admin => {
        let provider = self.provider(mode).ok_or_else(|| {
          RenderError::internal(format!("no header/footer provider for {mode:?} renders"))
        })?;
        match slot {
          Slot::Header => provider.render_header(input.request, input.locals, input.data).await?,
          Slot::Footer => provider.render_footer(input.request, input.locals, input.data).await?,
        }
      }
    };
    self.translator.translate(&html, input.locale).await
  }

  fn provider(&self, mode: RenderMode) -> Option<&Arc<dyn HeaderFooterProvider>> {
    match mode {
      RenderMode::Standard => self.standard.as_ref(),
      RenderMode::Admin => self.admin.as_ref(),
      RenderMode::Bare => None,
    }
  }
}

/// Await a callback-style template render.
pub async fn render_template(
  engine: &dyn TemplateEngine,
  name: &str,
  data: &OptionsBag,
) -> Result<String, RenderError> {
  let (tx, rx) = oneshot::channel::<Result<String, RenderError>>();
  engine.render(
    name,
    data,
    Box::new(move |result| {
      // Receiver gone means the render was already abandoned
      let _ = tx.send(result);
    }),
  );
  rx.await.map_err(|_| RenderError::template(format!("template '{name}' dropped its callback")))?
}
