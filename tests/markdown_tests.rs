//! Markdown Rendering Tests
//!
//! Renders whole documents through the public API.

use pretty_assertions::assert_eq;

use havan::markdown::{parse, render, Block, ListKind, RenderCache};

#[test]
fn test_heading() {
    let blocks = parse("# Title");
    assert_eq!(
        blocks,
        vec![Block::Heading {
            level: 1,
            html: "Title".to_string()
        }]
    );
    let html = render("# Title");
    assert!(html.starts_with("<h1 class=\""));
    assert!(html.ends_with(">Title</h1>"));
}

#[test]
fn test_paragraph_lines_join_with_space() {
    assert_eq!(
        parse("Line one\nLine two"),
        vec![Block::Paragraph("Line one Line two".to_string())]
    );
}

#[test]
fn test_ordered_list() {
    assert_eq!(
        parse("1. first\n2. second"),
        vec![Block::List {
            kind: ListKind::Ordered,
            items: vec!["first".to_string(), "second".to_string()],
        }]
    );
}

#[test]
fn test_blank_line_closes_list() {
    assert_eq!(
        parse("- a\n- b\n\ntext"),
        vec![
            Block::List {
                kind: ListKind::Unordered,
                items: vec!["a".to_string(), "b".to_string()],
            },
            Block::Paragraph("text".to_string()),
        ]
    );
}

#[test]
fn test_inline_spans_and_escaping() {
    let html = render("**bold** and *italic* and `code` & <b>");
    assert!(html.contains(r#"<strong class="font-semibold text-gray-200">bold</strong>"#));
    assert!(html.contains(r#"<em class="italic text-gray-300">italic</em>"#));
    assert!(html.contains(">code</code>"));
    assert!(html.contains("&amp; &lt;b&gt;"));
    assert!(!html.contains("<b>"));
}

#[test]
fn test_citation_span() {
    let html = render("[Smith et al., 2020]");
    assert_eq!(
        html,
        r#"<p class="text-gray-300 leading-relaxed mb-6"><span class="text-cyan-400/70 text-sm">[<span class="hover:text-cyan-300 cursor-help">Smith et al., 2020</span>]</span></p>"#
    );
}

#[test]
fn test_footnote_shaped_brackets_are_citations_too() {
    assert!(render("[Note, 1999]").contains("cursor-help\">Note, 1999</span>"));
}

#[test]
fn test_full_document() {
    let source = "\
# Agni and Attention

## Abstract

The fire is *watched*,
not **owned**.

---

### Findings
1. Brown noise [Doe, 2019a]
2. Crackle density

- calm
* focus
";
    let blocks = parse(source);
    let tags: Vec<&str> = blocks.iter().map(Block::tag).collect();
    assert_eq!(tags, vec!["h1", "h2", "p", "hr", "h3", "ol", "ul"]);

    let html = render(source);
    assert_eq!(html, render(source));
    assert_eq!(html.matches("<li ").count(), 4);
}

#[test]
fn test_empty_document() {
    assert!(parse("").is_empty());
    assert_eq!(render("\n\n   \n"), "");
}

#[test]
fn test_cache_matches_direct_render() {
    let source = "# Cached\n\nBody";
    let mut cache = RenderCache::new();
    assert_eq!(cache.render(source), render(source));
    assert_eq!(cache.render(source), render(source));
    assert_eq!(cache.hits(), 1);
}
