/* src/server/core/rust/src/locale.rs */

use quire_engine::LocaleInputs;

use crate::context::{Locals, RenderRequest};

/// Target language for this render: `?lang=` (sanitized), else the admin or
/// user locale from the client config, else `en-GB`.
pub fn resolve_locale(request: &RenderRequest, locals: &Locals) -> String {
  quire_engine::resolve_locale(&LocaleInputs {
    query_lang: request.query("lang"),
    admin: locals.render_admin_header,
    user_lang: locals.user_lang(),
    acp_lang: locals.acp_lang(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::context::ClientConfig;

  fn locals(admin: bool) -> Locals {
    Locals {
      render_admin_header: admin,
      config: Some(ClientConfig { user_lang: Some("de".into()), acp_lang: Some("ja".into()) }),
      ..Default::default()
    }
  }

  #[test]
  fn no_config_no_query() {
    assert_eq!(resolve_locale(&RenderRequest::new("/"), &Locals::default()), "en-GB");
  }

  #[test]
  fn config_by_mode() {
    let req = RenderRequest::new("/");
    assert_eq!(resolve_locale(&req, &locals(false)), "de");
    assert_eq!(resolve_locale(&req, &locals(true)), "ja");
  }

  #[test]
  fn query_overrides_config() {
    let mut req = RenderRequest::new("/");
    req.query.insert("lang".into(), "fr\"".into());
    assert_eq!(resolve_locale(&req, &locals(true)), "fr&quot;");
  }
}
