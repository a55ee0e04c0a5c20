/* src/server/adapter/axum/src/extract.rs */

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{FromRequestParts, MatchedPath, NestedPath, Query};
use axum::http::request::Parts;
use axum::response::Response;
use quire_server::{Locals, RenderArgs, RenderError, RenderInterceptor, RenderRequest, RenderResponse};

use crate::error::AxumError;
use crate::response::into_axum_response;

/// Authenticated user id, inserted into request extensions by the auth layer.
/// Absent means a guest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallerId(pub i64);

/// Per-request render handle. Extract it in a handler and call
/// [`render`](Self::render) with a template name and options.
pub struct Renderer {
  interceptor: Arc<RenderInterceptor>,
  request: RenderRequest,
  locals: Locals,
}

impl<S> FromRequestParts<S> for Renderer
where
  S: Send + Sync,
{
  type Rejection = AxumError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let interceptor = parts.extensions.get::<Arc<RenderInterceptor>>().cloned().ok_or_else(|| {
      RenderError::internal("no render interceptor on this router; call with_renderer")
    })?;

    let base_url = NestedPath::from_request_parts(parts, state)
      .await
      .map(|p| p.as_str().trim_end_matches('/').to_string())
      .unwrap_or_default();
    let route_path = MatchedPath::from_request_parts(parts, state).await.ok().map(|m| {
      let full = m.as_str();
      full.strip_prefix(base_url.as_str()).unwrap_or(full).to_string()
    });
    let query = Query::<BTreeMap<String, String>>::try_from_uri(&parts.uri)
      .map(|Query(q)| q)
      .unwrap_or_default();
    let path = parts.uri.path().to_string();
    let uid = parts.extensions.get::<CallerId>().copied().unwrap_or_default().0;
    let locals = parts
      .extensions
      .get::<Locals>()
      .cloned()
      .unwrap_or_else(|| default_locals(&format!("{base_url}{path}")));

    Ok(Self {
      interceptor,
      request: RenderRequest { uid, base_url, path, query, route_path },
      locals,
    })
  }
}

/// Paths under `/api` answer with JSON, everything else is a full page.
/// `full_path` includes the mount point, so a router nested at `/api` counts.
fn default_locals(full_path: &str) -> Locals {
  let is_api = full_path == "/api" || full_path.starts_with("/api/");
  Locals { is_api, render_header: !is_api, ..Default::default() }
}

impl Renderer {
  pub fn request(&self) -> &RenderRequest {
    &self.request
  }

  pub fn locals(&self) -> &Locals {
    &self.locals
  }

  /// Adjust response locals (render mode, extra markup, tags) before rendering.
  pub fn locals_mut(&mut self) -> &mut Locals {
    &mut self.locals
  }

  pub async fn render(
    self,
    template: &str,
    args: impl Into<RenderArgs>,
  ) -> Result<Response, AxumError> {
    let mut response = RenderResponse::new(self.locals);
    let outcome = self
      .interceptor
      .try_render(Arc::new(self.request), &mut response, template, args.into())
      .await?;
    tracing::debug!(template, ?outcome, "render finished");
    Ok(into_axum_response(response))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn api_paths_default_to_json() {
    assert!(default_locals("/api").is_api);
    assert!(default_locals("/api/topic/1").is_api);
    assert!(!default_locals("/api/topic/1").render_header);
  }

  #[test]
  fn page_paths_default_to_standard_chrome() {
    let locals = default_locals("/topic/1");
    assert!(!locals.is_api);
    assert!(locals.render_header);
    assert!(!default_locals("/apiary").is_api);
  }

  #[test]
  fn mount_point_counts_toward_api_mode() {
    let (base_url, path) = ("/api", "/topic/1");
    assert!(default_locals(&format!("{base_url}{path}")).is_api);
    assert!(!default_locals(&format!("/forum{path}")).is_api);
  }
}
