/* src/server/engine/rust/src/page.rs */

/// Element id of the inline hydration script the client router reads on load.
pub const DATA_SCRIPT_ID: &str = "ajaxify-data";

/// The three independently produced, already-translated page fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
  pub header: String,
  pub content: String,
  pub footer: String,
}

/// Optional markup supplied by earlier middleware.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageExtras<'a> {
  pub post_header: Option<&'a str>,
  pub pre_footer: Option<&'a str>,
}

/// header, post-header, content, hydration script, pre-footer, footer.
/// `payload` must already be script-safe (see `hydration_payload`).
pub fn assemble_page(fragments: &Fragments, payload: &str, extras: PageExtras<'_>) -> String {
  let post_header = extras.post_header.unwrap_or("");
  let pre_footer = extras.pre_footer.unwrap_or("");
  let mut out = String::with_capacity(
    fragments.header.len()
      + post_header.len()
      + fragments.content.len()
      + payload.len()
      + pre_footer.len()
      + fragments.footer.len()
      + 64,
  );
  out.push_str(&fragments.header);
  out.push_str(post_header);
  out.push_str(&fragments.content);
  out.push_str(&format!(r#"<script id="{DATA_SCRIPT_ID}" type="application/json">{payload}</script>"#));
  out.push_str(pre_footer);
  out.push_str(&fragments.footer);
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fragments() -> Fragments {
    Fragments { header: "<header>".into(), content: "<main>".into(), footer: "<footer>".into() }
  }

  #[test]
  fn order_without_extras() {
    assert_eq!(
      assemble_page(&fragments(), "{}", PageExtras::default()),
      r#"<header><main><script id="ajaxify-data" type="application/json">{}</script><footer>"#,
    );
  }

  #[test]
  fn order_with_extras() {
    let extras = PageExtras { post_header: Some("<nav>"), pre_footer: Some("<aside>") };
    assert_eq!(
      assemble_page(&fragments(), r#"{"a":1}"#, extras),
      concat!(
        "<header><nav><main>",
        r#"<script id="ajaxify-data" type="application/json">{"a":1}</script>"#,
        "<aside><footer>",
      ),
    );
  }

  #[test]
  fn empty_fragments_keep_script() {
    let out = assemble_page(&Fragments::default(), "{}", PageExtras::default());
    assert_eq!(out, r#"<script id="ajaxify-data" type="application/json">{}</script>"#);
  }
}
