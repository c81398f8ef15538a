//! Generic embed markup builders
//!
//! Two strategies cover every provider: a single self-contained
//! source-bearing tag (images), and a nested browsing context pointing at a
//! provider-hosted player page (video providers). Builders own the `src` and
//! `style` attributes; caller attributes pass through verbatim but cannot
//! shadow them.

use crate::style::StyleMap;
use std::collections::BTreeMap;

/// Build a single-element embed, e.g. `<img src="…"/>`
pub fn single_element_embed(
    tag: &str,
    src: &str,
    attrs: &BTreeMap<String, String>,
    style: &StyleMap,
) -> String {
    let mut markup = String::new();
    markup.push('<');
    markup.push_str(tag);
    push_attr(&mut markup, "src", src);
    push_caller_attrs(&mut markup, attrs);
    push_style(&mut markup, style);
    markup.push_str("/>");
    markup
}

/// Build a framed embed, `<iframe src="…"></iframe>`
///
/// `frameborder="0"` is supplied unless the caller overrides it;
/// `allowfullscreen` is always present, as the provider players expect.
pub fn frame_embed(src: &str, attrs: &BTreeMap<String, String>, style: &StyleMap) -> String {
    let mut markup = String::from("<iframe");
    push_attr(&mut markup, "src", src);
    if !attrs.contains_key("frameborder") {
        push_attr(&mut markup, "frameborder", "0");
    }
    push_caller_attrs(&mut markup, attrs);
    push_style(&mut markup, style);
    markup.push_str(" allowfullscreen></iframe>");
    markup
}

fn push_caller_attrs(markup: &mut String, attrs: &BTreeMap<String, String>) {
    for (key, value) in attrs {
        // src and style belong to the builder
        if key == "src" || key == "style" {
            continue;
        }
        push_attr(markup, key, value);
    }
}

fn push_style(markup: &mut String, style: &StyleMap) {
    if style.is_empty() {
        return;
    }
    let serialized: String = style
        .iter()
        .map(|(property, value)| format!("{}:{};", property, value))
        .collect();
    push_attr(markup, "style", &serialized);
}

fn push_attr(markup: &mut String, key: &str, value: &str) {
    markup.push(' ');
    markup.push_str(key);
    markup.push_str("=\"");
    markup.push_str(&escape_attr(value));
    markup.push('"');
}

/// Escape a value for placement inside a double-quoted HTML attribute
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
