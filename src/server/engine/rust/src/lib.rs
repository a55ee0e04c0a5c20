/* src/server/engine/rust/src/lib.rs */

pub mod escape;
pub mod i18n;
pub mod locale;
pub mod options;
pub mod page;

// Public API re-exports
pub use escape::{escape_query_value, escape_script_json, hydration_payload, to_json};
pub use i18n::{replace_tokens, unescape_markers};
pub use locale::{DEFAULT_LOCALE, LocaleInputs, resolve_locale};
pub use options::{OptionsBag, RenderState, apply_render_state, page_url, template_descriptor};
pub use page::{DATA_SCRIPT_ID, Fragments, PageExtras, assemble_page};
