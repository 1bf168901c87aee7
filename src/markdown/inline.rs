//! Inline formatting
//!
//! Substitutions run in a fixed order. Each later pattern sees the output of
//! the earlier ones, so the order below must not change:
//! 1. escape `&`, `<`, `>` (ampersand first)
//! 2. `***x***` bold italic
//! 3. `**x**` bold
//! 4. `*x*` italic
//! 5. `` `x` `` code
//! 6. `[Author et al., 2020a]` citation

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static BOLD_ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

// Permissive: any bracketed "words, year" matches, footnotes included.
static CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([A-Za-z\s&]+(?:et al\.)?,?\s*[0-9]{4}[a-z]?)\]").unwrap()
});

const BOLD_ITALIC_HTML: &str =
    r#"<strong class="font-semibold text-gray-200"><em>${1}</em></strong>"#;
const BOLD_HTML: &str = r#"<strong class="font-semibold text-gray-200">${1}</strong>"#;
const ITALIC_HTML: &str = r#"<em class="italic text-gray-300">${1}</em>"#;
const CODE_HTML: &str =
    r#"<code class="bg-gray-800 text-cyan-300 px-1.5 py-0.5 rounded text-sm font-mono">${1}</code>"#;
const CITATION_HTML: &str =
    r#"<span class="text-cyan-400/70 text-sm">[<span class="hover:text-cyan-300 cursor-help">${1}</span>]</span>"#;

/// Escape the three HTML-significant characters
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Escape `text` and apply emphasis, code and citation markup
pub fn process_inline(text: &str) -> String {
    let escaped = escape_html(text);
    let text = BOLD_ITALIC.replace_all(&escaped, BOLD_ITALIC_HTML);
    let text = BOLD.replace_all(&text, BOLD_HTML);
    let text = ITALIC.replace_all(&text, ITALIC_HTML);
    let text = CODE.replace_all(&text, CODE_HTML);
    let text = CITATION.replace_all(&text, CITATION_HTML);
    text.into_owned()
}
