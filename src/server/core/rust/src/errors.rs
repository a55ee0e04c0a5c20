/* src/server/core/rust/src/errors.rs */

use std::fmt;

#[derive(Debug)]
pub struct RenderError {
  code: String,
  message: String,
  status: u16,
}

fn default_status(code: &str) -> u16 {
  match code {
    "VALIDATION_ERROR" => 400,
    "NOT_FOUND" => 404,
    "HOOK_ERROR" | "TEMPLATE_ERROR" | "TRANSLATION_ERROR" | "INTERNAL_ERROR" => 500,
    _ => 500,
  }
}

impl RenderError {
  pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
    Self { code: code.into(), message: message.into(), status }
  }

  pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
    let code = code.into();
    let status = default_status(&code);
    Self { code, message: message.into(), status }
  }

  pub fn validation(msg: impl Into<String>) -> Self {
    Self::with_code("VALIDATION_ERROR", msg)
  }

  pub fn not_found(msg: impl Into<String>) -> Self {
    Self::with_code("NOT_FOUND", msg)
  }

  pub fn internal(msg: impl Into<String>) -> Self {
    Self::with_code("INTERNAL_ERROR", msg)
  }

  pub fn hook(msg: impl Into<String>) -> Self {
    Self::with_code("HOOK_ERROR", msg)
  }

  pub fn template(msg: impl Into<String>) -> Self {
    Self::with_code("TEMPLATE_ERROR", msg)
  }

  pub fn translation(msg: impl Into<String>) -> Self {
    Self::with_code("TRANSLATION_ERROR", msg)
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn status(&self) -> u16 {
    self.status
  }
}

impl fmt::Display for RenderError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for RenderError {}

impl From<serde_json::Error> for RenderError {
  fn from(err: serde_json::Error) -> Self {
    Self::internal(format!("serialize render data: {err}"))
  }
}
