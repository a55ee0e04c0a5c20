/* src/server/core/rust/src/config.rs */

use std::path::Path;

use serde::Deserialize;

use crate::errors::RenderError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
  Development,
  #[default]
  Production,
}

impl Environment {
  pub fn parse(s: &str) -> Self {
    match s.trim().to_ascii_lowercase().as_str() {
      "development" | "dev" => Self::Development,
      _ => Self::Production,
    }
  }

  pub fn is_development(self) -> bool {
    self == Self::Development
  }
}

/// Process-wide site settings, handed to the interceptor when it is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteConfig {
  /// Path the site is mounted under, e.g. "/forum". Empty for the root.
  pub relative_path: String,
  pub environment: Environment,
}

#[derive(Deserialize)]
struct SiteConfigFile {
  #[serde(default)]
  relative_path: String,
  #[serde(default)]
  environment: Option<String>,
}

impl SiteConfig {
  /// Read `QUIRE_RELATIVE_PATH` and `QUIRE_ENV`.
  pub fn from_env() -> Self {
    let relative_path = std::env::var("QUIRE_RELATIVE_PATH").unwrap_or_default();
    let environment =
      std::env::var("QUIRE_ENV").map(|v| Environment::parse(&v)).unwrap_or_default();
    Self { relative_path: normalize_relative_path(&relative_path), environment }
  }
}

/// Load site settings from a JSON file. Missing fields take their defaults.
pub fn load_site_config(path: impl AsRef<Path>) -> Result<SiteConfig, RenderError> {
  let path = path.as_ref();
  let content = std::fs::read_to_string(path)
    .map_err(|e| RenderError::internal(format!("read {}: {e}", path.display())))?;
  let file: SiteConfigFile = serde_json::from_str(&content)
    .map_err(|e| RenderError::internal(format!("parse {}: {e}", path.display())))?;

  Ok(SiteConfig {
    relative_path: normalize_relative_path(&file.relative_path),
    environment: file.environment.as_deref().map(Environment::parse).unwrap_or_default(),
  })
}

// "/forum/" and "/forum" mount the same site; "/" is the root
fn normalize_relative_path(raw: &str) -> String {
  raw.trim().trim_end_matches('/').to_string()
}
