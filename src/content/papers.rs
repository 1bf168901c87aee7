//! Research paper records
//!
//! Papers are JSON records whose `content` field is written in the markdown
//! dialect understood by [`crate::markdown`]. A library can be loaded from a
//! single JSON array or from a directory tree of JSON files.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{HavanError, Result};
use crate::markdown;

const BUILTIN_PAPERS: &str = include_str!("../../data/papers.json");

/// Subject area of a paper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Yoga,
    Philosophy,
    Science,
    Spirituality,
    Meditation,
}

/// Badge classes for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

impl Category {
    pub fn colors(&self) -> CategoryColors {
        let (bg, text, border) = match self {
            Category::Yoga => ("bg-cyan-900/50", "text-cyan-300", "border-cyan-700"),
            Category::Philosophy => ("bg-purple-900/50", "text-purple-300", "border-purple-700"),
            Category::Science => ("bg-blue-900/50", "text-blue-300", "border-blue-700"),
            Category::Spirituality => ("bg-amber-900/50", "text-amber-300", "border-amber-700"),
            Category::Meditation => ("bg-green-900/50", "text-green-300", "border-green-700"),
        };
        CategoryColors { bg, text, border }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Yoga => "Yoga",
            Category::Philosophy => "Philosophy",
            Category::Science => "Science",
            Category::Spirituality => "Spirituality",
            Category::Meditation => "Meditation",
        };
        f.write_str(label)
    }
}

/// A research paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: String,
    pub author: String,
    /// Publication date, `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Human estimate such as "45 min"
    pub reading_time: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub category: Category,
    /// Body in the paper markdown dialect
    pub content: String,
}

impl Paper {
    /// Body rendered to HTML
    pub fn rendered_content(&self) -> String {
        markdown::render(&self.content)
    }

    /// Date as shown on the paper page, e.g. "December 4, 2025"
    pub fn formatted_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

/// Papers indexed by slug, in load order
#[derive(Debug, Clone, Default)]
pub struct PaperLibrary {
    papers: Vec<Paper>,
}

impl PaperLibrary {
    /// Build a library, rejecting duplicate slugs
    pub fn new(papers: Vec<Paper>) -> Result<Self> {
        let mut seen = HashSet::new();
        for paper in &papers {
            if !seen.insert(paper.slug.as_str()) {
                return Err(HavanError::content(format!(
                    "duplicate paper slug '{}'",
                    paper.slug
                )));
            }
        }
        Ok(Self { papers })
    }

    /// The papers published on the site
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_PAPERS).expect("bundled papers.json is valid")
    }

    /// Parse a JSON array of papers
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Load a JSON file holding an array of papers
    pub fn load_file(path: &Path) -> Result<Self> {
        Self::new(read_papers(path)?)
    }

    /// Load every `*.json` file under `dir`
    ///
    /// Each file may hold a single paper or an array of papers. Files are
    /// visited in name order so the library order is stable.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(HavanError::FileNotFound {
                path: dir.display().to_string(),
                source: None,
            });
        }

        let mut papers = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| HavanError::content(e.to_string()))?;
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().is_some_and(|ext| ext == "json")
            {
                debug!("Loading papers from {}", path.display());
                papers.extend(read_papers(path)?);
            }
        }

        let library = Self::new(papers)?;
        info!("Loaded {} paper(s) from {}", library.len(), dir.display());
        Ok(library)
    }

    /// Load from a file or a directory
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::load_dir(path)
        } else {
            Self::load_file(path)
        }
    }

    pub fn get(&self, slug: &str) -> Option<&Paper> {
        self.papers.iter().find(|paper| paper.slug == slug)
    }

    /// Like [`get`](Self::get) but reports a missing slug as an error
    pub fn require(&self, slug: &str) -> Result<&Paper> {
        self.get(slug).ok_or_else(|| HavanError::PaperNotFound {
            slug: slug.to_string(),
        })
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.papers.iter().map(|paper| paper.slug.as_str()).collect()
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PaperFile {
    Many(Vec<Paper>),
    One(Box<Paper>),
}

fn read_papers(path: &Path) -> Result<Vec<Paper>> {
    let json = fs::read_to_string(path).map_err(|e| HavanError::read_failed(path, e))?;

    Ok(match serde_json::from_str(&json)? {
        PaperFile::Many(papers) => papers,
        PaperFile::One(paper) => vec![*paper],
    })
}
