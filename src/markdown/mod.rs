//! Paper Markdown Rendering
//!
//! Converts the constrained markdown dialect used by research papers into
//! presentational HTML. Supported structure: `#`..`####` headings,
//! paragraphs, `1.` ordered lists, `-`/`*` unordered lists and `---` rules.
//! Inline: bold, italic, bold italic, code spans and bracketed citations.
//!
//! Rendering is total. Malformed markup falls through as literal text.

mod block;
mod cache;
mod inline;
mod parser;

pub use block::{Block, ListKind};
pub use cache::RenderCache;
pub use inline::{escape_html, process_inline};
pub use parser::parse;

/// Render a document to HTML, one element per line
///
/// # Example
/// ```
/// let html = havan::markdown::render("# Title");
/// assert_eq!(
///     html,
///     r#"<h1 class="text-4xl md:text-5xl font-light text-gray-100 mb-6">Title</h1>"#
/// );
/// ```
pub fn render(source: &str) -> String {
    render_blocks(&parse(source))
}

/// Render already parsed blocks
pub fn render_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|block| block.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
