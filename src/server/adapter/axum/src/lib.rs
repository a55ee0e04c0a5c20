/* src/server/adapter/axum/src/lib.rs */

mod error;
mod extract;
mod response;

use std::sync::Arc;

use axum::{Extension, Router};
use quire_server::RenderInterceptor;

/// Re-export quire-server core for convenience
pub use quire_server;

pub use error::AxumError;
pub use extract::{CallerId, Renderer};

/// Extension trait that composes a render interceptor into an Axum router.
/// Routes added before the call can take a [`Renderer`] extractor.
pub trait RenderRouterExt {
  fn with_renderer(self, interceptor: impl Into<Arc<RenderInterceptor>>) -> Self;
}

impl<S> RenderRouterExt for Router<S>
where
  S: Clone + Send + Sync + 'static,
{
  fn with_renderer(self, interceptor: impl Into<Arc<RenderInterceptor>>) -> Self {
    self.layer(Extension(interceptor.into()))
  }
}

/// Bind `addr` and serve `router` until the process stops.
pub async fn serve(router: Router, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
  let listener = tokio::net::TcpListener::bind(addr).await?;
  let local_addr = listener.local_addr()?;
  tracing::info!(port = local_addr.port(), "quire backend running on http://localhost:{}", local_addr.port());
  axum::serve(listener, router).await?;
  Ok(())
}
