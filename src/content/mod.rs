//! Site Content
//!
//! Data collaborators of the renderer and the havan session:
//! - Research papers with lookup by slug
//! - The havan mantra cycle
//! - The sacred geometry gallery

pub mod geometry;
pub mod mantras;
pub mod papers;

pub use geometry::{GeometryCatalog, GeometryCategory, GeometryItem};
pub use mantras::{Mantra, MantraCycle};
pub use papers::{Category, CategoryColors, Paper, PaperLibrary};
