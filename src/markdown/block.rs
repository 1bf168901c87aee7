//! Block-level output of the renderer

use std::fmt;

/// Kind of list a run of items belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `1. item`
    Ordered,
    /// `- item` or `* item`
    Unordered,
}

impl ListKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }

    fn class(&self) -> &'static str {
        match self {
            ListKind::Ordered => "my-6 ml-6 space-y-2 list-decimal list-outside",
            ListKind::Unordered => "my-6 ml-6 space-y-2 list-disc list-outside",
        }
    }
}

/// One structurally classified unit of rendered output
///
/// Text fields already hold escaped, inline-processed markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, html: String },
    Paragraph(String),
    List { kind: ListKind, items: Vec<String> },
    HorizontalRule,
}

impl Block {
    /// Element name of the block (`h1`..`h4`, `p`, `ol`, `ul`, `hr`)
    pub fn tag(&self) -> &'static str {
        match self {
            Block::Heading { level, .. } => heading_tag(*level),
            Block::Paragraph(_) => "p",
            Block::List { kind, .. } => kind.tag(),
            Block::HorizontalRule => "hr",
        }
    }
}

fn heading_tag(level: u8) -> &'static str {
    match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        _ => "h4",
    }
}

fn heading_class(level: u8) -> &'static str {
    match level {
        1 => "text-4xl md:text-5xl font-light text-gray-100 mb-6",
        2 => "text-2xl font-light text-cyan-400 mt-14 mb-6 pb-3 border-b border-gray-800",
        3 => "text-xl font-light text-gray-200 mt-10 mb-4",
        _ => "text-lg font-light text-gray-300 mt-8 mb-3",
    }
}

/// Lists render one element per line: the opening tag, each item, the closing tag.
impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Heading { level, html } => {
                let tag = heading_tag(*level);
                write!(f, r#"<{tag} class="{}">{html}</{tag}>"#, heading_class(*level))
            }
            Block::Paragraph(html) => {
                write!(f, r#"<p class="text-gray-300 leading-relaxed mb-6">{html}</p>"#)
            }
            Block::List { kind, items } => {
                write!(f, r#"<{} class="{}">"#, kind.tag(), kind.class())?;
                for item in items {
                    write!(f, "\n<li class=\"text-gray-300 pl-2\">{item}</li>")?;
                }
                write!(f, "\n</{}>", kind.tag())
            }
            Block::HorizontalRule => write!(f, r#"<hr class="border-gray-800 my-12" />"#),
        }
    }
}
