//! Page content: typed document schemas and the HTTP loader.

mod loader;
pub mod schema;

pub use loader::{ContentLoader, LoadError};
