/* src/server/engine/rust/src/locale.rs */

use crate::escape::escape_query_value;

pub const DEFAULT_LOCALE: &str = "en-GB";

/// Everything locale precedence depends on for a single render.
#[derive(Default)]
pub struct LocaleInputs<'a> {
  /// Raw `lang` query value, untrusted.
  pub query_lang: Option<&'a str>,
  /// True when rendering inside the admin panel.
  pub admin: bool,
  pub user_lang: Option<&'a str>,
  pub acp_lang: Option<&'a str>,
}

/// Query `lang` (sanitized) -> admin/user configured locale -> `en-GB`.
pub fn resolve_locale(inputs: &LocaleInputs<'_>) -> String {
  if let Some(lang) = inputs.query_lang.filter(|l| !l.is_empty()) {
    return escape_query_value(lang);
  }

  let configured = if inputs.admin { inputs.acp_lang } else { inputs.user_lang };
  configured.filter(|l| !l.is_empty()).unwrap_or(DEFAULT_LOCALE).to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_to_en_gb() {
    assert_eq!(resolve_locale(&LocaleInputs::default()), "en-GB");
  }

  #[test]
  fn admin_without_config_defaults() {
    let inputs = LocaleInputs { admin: true, user_lang: Some("fr"), ..Default::default() };
    assert_eq!(resolve_locale(&inputs), "en-GB");
  }

  #[test]
  fn user_lang_for_standard_render() {
    let inputs = LocaleInputs { user_lang: Some("de"), acp_lang: Some("ja"), ..Default::default() };
    assert_eq!(resolve_locale(&inputs), "de");
  }

  #[test]
  fn acp_lang_for_admin_render() {
    let inputs =
      LocaleInputs { admin: true, user_lang: Some("de"), acp_lang: Some("ja"), ..Default::default() };
    assert_eq!(resolve_locale(&inputs), "ja");
  }

  #[test]
  fn query_wins_over_config() {
    let inputs = LocaleInputs {
      query_lang: Some("zh-CN"),
      admin: true,
      user_lang: Some("de"),
      acp_lang: Some("ja"),
    };
    assert_eq!(resolve_locale(&inputs), "zh-CN");
  }

  #[test]
  fn query_is_sanitized() {
    let inputs = LocaleInputs { query_lang: Some("<script>"), ..Default::default() };
    assert_eq!(resolve_locale(&inputs), "&lt;script&gt;");
  }

  #[test]
  fn empty_query_falls_through() {
    let inputs = LocaleInputs { query_lang: Some(""), user_lang: Some("it"), ..Default::default() };
    assert_eq!(resolve_locale(&inputs), "it");
  }
}
