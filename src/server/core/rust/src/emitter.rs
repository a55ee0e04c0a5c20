/* src/server/core/rust/src/emitter.rs */

use quire_engine::options::keys;
use quire_engine::{Fragments, OptionsBag, PageExtras, assemble_page, to_json};

use crate::config::Environment;
use crate::context::{RenderRequest, RenderResponse};

/// Matched route of the API home page.
pub const API_ROOT: &str = "/api/";

/// Placeholder title the client translates for the home page.
pub const HOME_TITLE: &str = "[[pages:home]]";

/// Completion continuation for page renders. Receives the assembled HTML
/// instead of it being sent.
pub type Done = Box<dyn FnOnce(String) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emitted {
  Json,
  Html,
  /// Handed to the caller's continuation; nothing was sent.
  Delivered,
}

#[derive(Debug, Clone, Copy)]
pub struct ResponseEmitter {
  environment: Environment,
}

impl ResponseEmitter {
  pub fn new(environment: Environment) -> Self {
    Self { environment }
  }

  /// Send the whole bag as JSON.
  pub fn emit_api(
    &self,
    request: &RenderRequest,
    response: &mut RenderResponse,
    mut data: OptionsBag,
  ) -> Result<Emitted, serde_json::Error> {
    if request.route_path.as_deref() == Some(API_ROOT) {
      data.insert(keys::TITLE, HOME_TITLE);
    }
    let pretty = self.environment.is_development() || request.pretty_requested();
    response.send_json(to_json(&data, pretty)?);
    Ok(Emitted::Json)
  }

  /// Assemble the page around an already script-safe `payload` and either
  /// send it or hand it to `done`.
  pub fn emit_page(
    &self,
    response: &mut RenderResponse,
    fragments: &Fragments,
    payload: &str,
    done: Option<Done>,
  ) -> Emitted {
    let extras = PageExtras {
      post_header: response.locals.post_header.as_deref(),
      pre_footer: response.locals.pre_footer.as_deref(),
    };
    let html = assemble_page(fragments, payload, extras);
    match done {
      Some(done) => {
        done(html);
        Emitted::Delivered
      }
      None => {
        response.send_html(html);
        Emitted::Html
      }
    }
  }
}
