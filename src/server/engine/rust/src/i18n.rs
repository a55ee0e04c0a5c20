/* src/server/engine/rust/src/i18n.rs */

// Translation tokens look like `[[namespace:key]]` or `[[namespace:key, arg1, arg2]]`.
// Literal brackets that must survive translation are written as `&#91;` / `&#93;`.

use std::sync::OnceLock;

use regex::{Captures, Regex};

fn token_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| {
    Regex::new(r"\[\[([\w\-./]+):([\w\-./]+)((?:\s*,[^\[\]]*)?)\]\]").unwrap()
  })
}

/// Turn escaped translation brackets back into literal `[` / `]`.
/// Running it twice gives the same result as running it once, because the
/// output never contains an escape sequence it did not receive.
pub fn unescape_markers(text: &str) -> String {
  if !text.contains("&#9") {
    return text.to_string();
  }
  text.replace("&#91;", "[").replace("&#93;", "]")
}

/// Replace every token for which `lookup(namespace, key)` returns a message.
/// Arguments fill `%1`, `%2`, ... in the message. Unknown tokens stay verbatim.
pub fn replace_tokens<F>(text: &str, mut lookup: F) -> String
where
  F: FnMut(&str, &str) -> Option<String>,
{
  if !text.contains("[[") {
    return text.to_string();
  }

  token_re()
    .replace_all(text, |caps: &Captures| {
      let Some(message) = lookup(&caps[1], &caps[2]) else {
        return caps[0].to_string();
      };
      let args: Vec<&str> = caps[3]
        .split(',')
        .skip(1)
        .map(str::trim)
        .collect();
      substitute_args(&message, &args)
    })
    .into_owned()
}

fn substitute_args(message: &str, args: &[&str]) -> String {
  let mut out = message.to_string();
  // Highest index first so `%1` never eats the prefix of `%10`
  for (idx, arg) in args.iter().enumerate().rev() {
    out = out.replace(&format!("%{}", idx + 1), arg);
  }
  out
}
