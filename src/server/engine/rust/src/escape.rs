/* src/server/engine/rust/src/escape.rs */

use serde::Serialize;

/// Escape every `</` as `<\/` so JSON can sit inside a `<script>` element
/// without closing it early. `\/` is a valid JSON escape for `/`, so the
/// payload still parses to the same value.
pub fn escape_script_json(json: &str) -> String {
  json.replace("</", "<\\/")
}

/// Compact JSON for the page's hydration script, already script-safe.
pub fn hydration_payload<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
  let json = serde_json::to_string(data)?;
  Ok(escape_script_json(&json))
}

/// Serialize for an API response: 4-space indentation when `pretty`, compact otherwise.
pub fn to_json<T: Serialize>(data: &T, pretty: bool) -> Result<String, serde_json::Error> {
  if !pretty {
    return serde_json::to_string(data);
  }
  let mut buf = Vec::new();
  let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
  let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
  data.serialize(&mut ser)?;
  // serde_json only ever writes valid UTF-8
  Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Neutralize markup and injection characters in an untrusted query value.
pub fn escape_query_value(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      '/' => out.push_str("&#x2F;"),
      '\\' => out.push_str("&#x5C;"),
      '`' => out.push_str("&#96;"),
      _ => out.push(ch),
    }
  }
  out
}
