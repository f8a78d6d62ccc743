use pulldown_cmark::{html, Event, Options, Parser};

use crate::sanitize::sanitize;

/// Render Markdown to sanitized HTML.
///
/// Tables, strikethrough and footnotes are enabled, and single newlines
/// inside a paragraph become `<br>`.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);

    sanitize(&out)
}
