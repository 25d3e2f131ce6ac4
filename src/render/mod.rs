//! Page rendering: an in-memory DOM with named mount points, the section
//! templates, and the renderers that rebuild a section whenever its content
//! or the current language changes.

mod dom;
mod renderer;
pub mod sections;

pub use dom::{escape_html, Document, Element, Node};
pub use renderer::{render, RenderContext, RenderOutcome, SectionRenderer, SectionView, ShapeError};
