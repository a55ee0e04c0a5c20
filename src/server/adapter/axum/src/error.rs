/* src/server/adapter/axum/src/error.rs */

use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quire_server::RenderError;
use serde_json::json;

/// A render that never reached the response, answered as
/// `{"ok": false, "error": {"code", "message"}}` with the error's status.
#[derive(Debug)]
pub struct AxumError(pub RenderError);

impl AxumError {
  fn status(&self) -> StatusCode {
    StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
  }
}

impl fmt::Display for AxumError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0, f)
  }
}

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(code = self.0.code(), message = self.0.message(), "render failed");
    }
    let body = json!({
      "ok": false,
      "error": { "code": self.0.code(), "message": self.0.message() },
    });
    (status, Json(body)).into_response()
  }
}

impl From<RenderError> for AxumError {
  fn from(err: RenderError) -> Self {
    Self(err)
  }
}
