//! Allow-list HTML sanitizer applied to all user-submitted rich text.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use ammonia::Builder;

const ALLOWED_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "strong", "b", "em", "i", "u", "s", "strike", "del",
    "ins", "mark", "small", "sub", "sup", "code", "pre", "ul", "ol", "li", "blockquote", "table",
    "thead", "tbody", "tfoot", "tr", "th", "td", "caption", "br", "hr", "span", "div", "a", "img",
];

const GENERIC_ATTRIBUTES: &[&str] = &["class", "id"];

const TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "title", "target", "rel"]),
    ("img", &["src", "alt", "title", "width", "height"]),
    ("span", &["style", "class"]),
    ("div", &["style", "class"]),
    ("code", &["class"]),
    ("pre", &["class"]),
];

static SANITIZER: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let tag_attributes: HashMap<&str, HashSet<&str>> = TAG_ATTRIBUTES
        .iter()
        .map(|(tag, attrs)| (*tag, attrs.iter().copied().collect()))
        .collect();

    let mut builder = Builder::default();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .generic_attributes(GENERIC_ATTRIBUTES.iter().copied().collect())
        .tag_attributes(tag_attributes)
        // `rel` is on the allow-list, so ammonia must not inject its own.
        .link_rel(None)
        .strip_comments(true);
    builder
});

/// Strip every element and attribute that is not on the allow-list.
///
/// Disallowed elements are unwrapped and their text kept, except `script`
/// and `style` whose contents are dropped. Never fails; the output is a
/// fixed point, so sanitizing twice yields the same string.
pub fn sanitize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    restore_pre_newlines(SANITIZER.clean(raw).to_string())
}

/// The parser swallows a newline directly after `<pre>` and the serializer
/// does not write one back, so a leading newline in the content would be
/// lost on every pass. Re-emit it.
fn restore_pre_newlines(html: String) -> String {
    if !html.contains("<pre") {
        return html;
    }

    let mut out = String::with_capacity(html.len() + 8);
    let mut rest = html.as_str();
    // Serialized text escapes `<`, so every `<` left here opens a tag.
    while let Some(open) = rest.find('<') {
        let Some(len) = tag_len(&rest[open..]) else {
            break;
        };
        let tag = &rest[open..open + len];
        out.push_str(&rest[..open + len]);
        rest = &rest[open + len..];

        if (tag == "<pre>" || tag.starts_with("<pre ")) && rest.starts_with('\n') {
            out.push('\n');
        }
    }
    out.push_str(rest);
    out
}

/// Length of the tag at the start of `s`, up to its closing `>`.
/// Attribute values are always double-quoted by the serializer.
fn tag_len(s: &str) -> Option<usize> {
    let mut quoted = false;
    for (i, c) in s.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '>' if !quoted => return Some(i + 1),
            _ => {}
        }
    }
    None
}
