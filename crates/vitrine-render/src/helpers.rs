//! Template helpers available in every render.
//!
//! [`install`] registers these functions on the template environment:
//!
//! | Function | Purpose |
//! |---|---|
//! | `link(doc)` | Site path for a document or document link |
//! | `link_url(link)` | URL for any link field (document, web, media) |
//! | `as_html(field)` | Rich text field rendered as HTML |
//! | `as_text(field, separator=" ")` | Rich text field rendered as plain text |
//! | `ordinal(index)` | `"One"`..`"Four"` for indexes 0..=3, otherwise `""` |
//!
//! Helpers are pure; they hold no per-request state.

use minijinja::value::Value as TemplateValue;
use minijinja::Environment;
use serde_json::Value;
use vitrine_content::resolve_json;

use crate::richtext;

/// Words for the first four positions.
const ORDINAL_WORDS: [&str; 4] = ["One", "Two", "Three", "Four"];

/// Word for a zero-based position, or `""` outside 0..=3.
#[must_use]
pub fn ordinal_word(index: i64) -> &'static str {
    usize::try_from(index)
        .ok()
        .and_then(|i| ORDINAL_WORDS.get(i))
        .copied()
        .unwrap_or_default()
}

/// Register all helpers on a template environment.
pub fn install(env: &mut Environment<'_>) {
    env.add_function("link", |doc: TemplateValue| {
        safe_url(&resolve_json(&to_json(&doc)))
    });
    env.add_function("link_url", |link: TemplateValue| {
        safe_url(&richtext::link_url(&to_json(&link), resolve_json))
    });
    env.add_function("as_html", |field: TemplateValue| {
        TemplateValue::from_safe_string(richtext::as_html(&to_json(&field), resolve_json))
    });
    env.add_function(
        "as_text",
        |field: TemplateValue, separator: Option<String>| {
            richtext::as_text(&to_json(&field), separator.as_deref().unwrap_or(" "))
        },
    );
    env.add_function("ordinal", |index: TemplateValue| {
        i64::try_from(index).map_or("", ordinal_word)
    });
}

/// Mark a URL as safe after escaping it, so auto-escaping leaves slashes alone.
fn safe_url(url: &str) -> TemplateValue {
    TemplateValue::from_safe_string(richtext::escape(url))
}

/// Convert a template value to JSON. Undefined and unserializable values
/// become `null`.
fn to_json(value: &TemplateValue) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
