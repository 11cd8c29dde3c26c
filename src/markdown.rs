//! Markdown rendering and plain-text snippets.

use pulldown_cmark::{Options, Parser, html as md_html};
use regex::Regex;
use std::sync::LazyLock;

/// Characters of content considered for a meta-description snippet.
pub const SNIPPET_CHARS: usize = 150;

/// Markdown syntax dropped from snippets: headings, emphasis, links and
/// images, image placeholders.
static SNIPPET_NOISE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#|\*|\[.*\]\(.*\)|%%IMAGE_\d+%%").expect("valid snippet noise regex")
});

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Convert markdown to an HTML fragment. Tables are enabled.
pub fn render(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    md_html::push_html(&mut out, parser);
    out
}

/// Short plain-text preview of markdown content.
///
/// Takes the first [`SNIPPET_CHARS`] characters, then removes markdown
/// noise, collapses whitespace and appends `...`. Stripping happens after
/// truncation, so the result is usually shorter than the limit.
pub fn snippet(markdown: &str) -> String {
    let head: String = markdown.chars().take(SNIPPET_CHARS).collect();
    let cleaned = SNIPPET_NOISE_RE.replace_all(&head, "");
    let collapsed = WHITESPACE_RE.replace_all(&cleaned, " ");
    format!("{}...", collapsed.trim())
}

/// Meta description of a content page: `"<title>: <snippet>"`.
///
/// `None` when the resolved content is empty.
pub fn content_meta_description(title: &str, content: &str) -> Option<String> {
    (!content.is_empty()).then(|| format!("{title}: {}", snippet(content)))
}
