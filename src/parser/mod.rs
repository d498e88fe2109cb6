//! Ontology loading.
//!
//! The driver only ever reads Turtle files, so this module keeps exactly
//! one format parser rather than the multi-format factory a general-purpose
//! ontology library would need.

pub mod common;
pub mod turtle;

pub use common::ParserConfig;
pub use turtle::TurtleParser;

use crate::error::OwlResult;
use crate::ontology::Ontology;

/// Parses ontology documents into an [`Ontology`].
pub trait OntologyParser {
    fn parse_str(&self, content: &str) -> OwlResult<Ontology>;
    fn parse_file(&self, path: &std::path::Path) -> OwlResult<Ontology>;
    fn format_name(&self) -> &'static str;
}
