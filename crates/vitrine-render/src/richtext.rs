//! Rich text conversion.
//!
//! Converts structured text fields (a JSON array of blocks, each with text
//! and inline spans) to HTML or plain text. Span offsets count characters.
//!
//! Supported blocks: `heading1`..`heading6`, `paragraph`, `preformatted`,
//! `list-item`, `o-list-item`, `image` and `embed`. Consecutive list items
//! are grouped into a single `<ul>` or `<ol>`. Unknown blocks are skipped.
//!
//! Supported spans: `strong`, `em`, `hyperlink` and `label`. Overlapping
//! spans are split so the output stays well nested.

use std::fmt::Write;

use serde::Deserialize;
use serde_json::Value;

/// A single rich text block.
#[derive(Debug, Deserialize)]
struct Block {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    spans: Vec<Span>,
    /// Image URL.
    #[serde(default)]
    url: Option<String>,
    /// Image alt text.
    #[serde(default)]
    alt: Option<String>,
    /// Image link target.
    #[serde(default, rename = "linkTo")]
    link_to: Option<Value>,
    /// Embed payload.
    #[serde(default)]
    oembed: Option<Value>,
}

/// Inline formatting over a character range of a block.
#[derive(Debug, Clone, Deserialize)]
struct Span {
    start: usize,
    end: usize,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Option<Value>,
}

/// Parse a field into blocks. Anything that is not a block array is empty.
fn parse_blocks(field: &Value) -> Vec<Block> {
    match field {
        Value::Array(_) => Vec::<Block>::deserialize(field).unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Render a rich text field as plain text, joining blocks with `separator`.
#[must_use]
pub fn as_text(field: &Value, separator: &str) -> String {
    parse_blocks(field)
        .iter()
        .map(|block| block.text.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Render a rich text field as HTML.
///
/// `resolve_link` maps document links (in `hyperlink` spans and image
/// `linkTo`) to site paths.
#[must_use]
pub fn as_html(field: &Value, resolve_link: impl Fn(&Value) -> String) -> String {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in parse_blocks(field) {
        let list_tag = match block.kind.as_str() {
            "list-item" => Some("ul"),
            "o-list-item" => Some("ol"),
            _ => None,
        };
        if open_list != list_tag {
            if let Some(tag) = open_list {
                let _ = write!(html, "</{tag}>");
            }
            if let Some(tag) = list_tag {
                let _ = write!(html, "<{tag}>");
            }
            open_list = list_tag;
        }

        match block.kind.as_str() {
            kind @ ("heading1" | "heading2" | "heading3" | "heading4" | "heading5"
            | "heading6") => {
                let level = &kind["heading".len()..];
                let _ = write!(
                    html,
                    "<h{level}>{}</h{level}>",
                    render_spans(&block.text, &block.spans, &resolve_link)
                );
            }
            "paragraph" => {
                let _ = write!(
                    html,
                    "<p>{}</p>",
                    render_spans(&block.text, &block.spans, &resolve_link)
                );
            }
            "preformatted" => {
                let _ = write!(
                    html,
                    "<pre>{}</pre>",
                    render_spans(&block.text, &block.spans, &resolve_link)
                );
            }
            "list-item" | "o-list-item" => {
                let _ = write!(
                    html,
                    "<li>{}</li>",
                    render_spans(&block.text, &block.spans, &resolve_link)
                );
            }
            "image" => render_image(&mut html, &block, &resolve_link),
            "embed" => render_embed(&mut html, &block),
            _ => {}
        }
    }

    if let Some(tag) = open_list {
        let _ = write!(html, "</{tag}>");
    }
    html
}

/// URL of a link field.
///
/// Document links go through `resolve_link`; web and media links use their
/// `url`. Anything else yields an empty string.
#[must_use]
pub fn link_url(link: &Value, resolve_link: impl Fn(&Value) -> String) -> String {
    let url = || {
        link.get("url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    };
    match link.get("link_type").and_then(Value::as_str) {
        Some("Document") => resolve_link(link),
        Some(_) => url(),
        None if link.get("type").is_some() => resolve_link(link),
        None => url(),
    }
}

fn render_image(html: &mut String, block: &Block, resolve_link: &impl Fn(&Value) -> String) {
    let Some(src) = block.url.as_deref() else {
        return;
    };
    let img = format!(
        "<img src=\"{}\" alt=\"{}\" />",
        escape(src),
        escape(block.alt.as_deref().unwrap_or_default())
    );
    html.push_str("<p class=\"block-img\">");
    match &block.link_to {
        Some(link) => {
            let href = link_url(link, resolve_link);
            let _ = write!(html, "<a href=\"{}\">{img}</a>", escape(&href));
        }
        None => html.push_str(&img),
    }
    html.push_str("</p>");
}

fn render_embed(html: &mut String, block: &Block) {
    let Some(oembed) = &block.oembed else {
        return;
    };
    let field = |name: &str| oembed.get(name).and_then(Value::as_str).unwrap_or_default();
    let _ = write!(
        html,
        "<div data-oembed=\"{}\" data-oembed-type=\"{}\" data-oembed-provider=\"{}\">{}</div>",
        escape(field("embed_url")),
        escape(field("type")),
        escape(&field("provider_name").to_lowercase()),
        field("html"),
    );
}

/// Render block text with inline spans applied.
fn render_spans(text: &str, spans: &[Span], resolve_link: &impl Fn(&Value) -> String) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    // Longer spans open first so shorter ones nest inside them.
    let mut spans: Vec<&Span> = spans
        .iter()
        .filter(|s| s.start < s.end && s.start < len)
        .collect();
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out = String::with_capacity(text.len());
    let mut stack: Vec<&Span> = Vec::new();
    let mut next = 0;

    for (i, c) in chars.iter().enumerate() {
        close_spans(&mut out, &mut stack, i, resolve_link);
        while next < spans.len() && spans[next].start == i {
            open_span(&mut out, spans[next], resolve_link);
            stack.push(spans[next]);
            next += 1;
        }
        match c {
            '\n' => out.push_str("<br />"),
            _ => push_escaped(&mut out, *c),
        }
    }
    while let Some(span) = stack.pop() {
        out.push_str(closing_tag(span));
    }
    out
}

/// Close every open span ending at `pos`, reopening spans that were
/// interleaved with it.
fn close_spans<'a>(
    out: &mut String,
    stack: &mut Vec<&'a Span>,
    pos: usize,
    resolve_link: &impl Fn(&Value) -> String,
) {
    while let Some(idx) = stack.iter().rposition(|s| s.end <= pos) {
        let mut reopen = Vec::new();
        while stack.len() > idx + 1 {
            let Some(span) = stack.pop() else {
                break;
            };
            out.push_str(closing_tag(span));
            reopen.push(span);
        }
        if let Some(span) = stack.pop() {
            out.push_str(closing_tag(span));
        }
        for span in reopen.into_iter().rev() {
            open_span(out, span, resolve_link);
            stack.push(span);
        }
    }
}

fn open_span(out: &mut String, span: &Span, resolve_link: &impl Fn(&Value) -> String) {
    match span.kind.as_str() {
        "strong" => out.push_str("<strong>"),
        "em" => out.push_str("<em>"),
        "hyperlink" => {
            let data = span.data.clone().unwrap_or(Value::Null);
            let href = link_url(&data, resolve_link);
            let _ = write!(out, "<a href=\"{}\"", escape(&href));
            if let Some(target) = data.get("target").and_then(Value::as_str) {
                let _ = write!(out, " target=\"{}\" rel=\"noopener\"", escape(target));
            }
            out.push('>');
        }
        "label" => {
            let label = span
                .data
                .as_ref()
                .and_then(|d| d.get("label"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            let _ = write!(out, "<span class=\"{}\">", escape(label));
        }
        _ => out.push_str("<span>"),
    }
}

fn closing_tag(span: &Span) -> &'static str {
    match span.kind.as_str() {
        "strong" => "</strong>",
        "em" => "</em>",
        "hyperlink" => "</a>",
        _ => "</span>",
    }
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#x27;"),
        _ => out.push(c),
    }
}

/// Escape HTML special characters.
///
/// Escapes `&`, `<`, `>`, `"` and `'`. Slashes are left alone.
pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        push_escaped(&mut result, c);
    }
    result
}
