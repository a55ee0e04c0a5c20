/* demo/backend/rust/src/hooks.rs */

use quire_server::{HookPayload, HookRegistry, RENDER_HOOK, build_hook};

pub fn registry() -> HookRegistry {
  let mut hooks = HookRegistry::new();

  hooks.on(build_hook("topic"), 10, |mut payload: HookPayload| async move {
    let tid = payload.template_data.get("tid").cloned().unwrap_or_default();
    payload.template_data.insert("breadcrumbs", serde_json::json!([
      { "text": "[[global:site]]", "url": "/" },
      { "text": format!("Topic {tid}") },
    ]));
    Ok(payload)
  });

  // Topic 0 is reserved; send the caller home before anything renders.
  hooks.on(build_hook("topic"), 0, |mut payload: HookPayload| async move {
    if payload.template_data.get("tid").and_then(|t| t.as_u64()) == Some(0) {
      payload.response.redirect("/");
    }
    Ok(payload)
  });

  hooks.on(RENDER_HOOK, 0, |mut payload: HookPayload| async move {
    payload.template_data.insert("generator", "quire");
    Ok(payload)
  });

  hooks
}
