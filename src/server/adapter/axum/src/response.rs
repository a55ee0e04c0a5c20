/* src/server/adapter/axum/src/response.rs */

use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use quire_server::{RenderResponse, ResponseBody};

/// Turn the finished render context into an axum response.
pub(crate) fn into_axum_response(res: RenderResponse) -> Response {
  let (status, headers, body) = res.into_parts();

  let mut response = match body {
    Some(ResponseBody::Json(json)) => {
      ([(CONTENT_TYPE, HeaderValue::from_static("application/json"))], json).into_response()
    }
    Some(ResponseBody::Html(html)) => Html(html).into_response(),
    Some(ResponseBody::Redirect(location)) => match HeaderValue::from_str(&location) {
      Ok(value) => [(LOCATION, value)].into_response(),
      Err(_) => {
        tracing::warn!(%location, "invalid redirect location");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
      }
    },
    // Page handed to a continuation; nothing left to send
    None => ().into_response(),
  };

  *response.status_mut() = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
  for (name, value) in headers {
    match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(&value)) {
      (Ok(name), Ok(value)) => {
        response.headers_mut().insert(name, value);
      }
      _ => tracing::warn!(%name, "dropping invalid response header"),
    }
  }
  response
}
