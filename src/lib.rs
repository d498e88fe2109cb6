//! # owl-explain
//!
//! An inference-enumeration and explanation engine for OWL2 ontologies.
//!
//! For each ontology in a directory, this crate walks a bounded
//! forward-chaining reasoner's deductive closure across three relation
//! families — object-property assertions, class membership, and class
//! subsumption — canonicalises every inferred triple against a
//! process-wide dedup register, reconstructs a proof sketch for it, and
//! streams the result out as a CSV summary and a line-delimited JSON
//! explanations file.
//!
//! ## Architecture
//!
//! - [`iri`] / [`entities`] / [`axioms`] / [`ontology`] — the data model: IRIs,
//!   OWL2 entities, the fourteen axiom kinds this engine understands, and the
//!   ontology container itself.
//! - [`resolver`] — entity-name canonicalisation (C1).
//! - [`register`] — the process-wide dedup register (C2).
//! - [`pretty`] — the axiom pretty-printer (C3).
//! - [`explain`] — the explanation service: reasoner justifications first,
//!   pattern-based proof sketches second (C4).
//! - [`enumerator`] — walks the reasoner's closure across the three relation
//!   families and hands results to the sink (C5).
//! - [`reasoning`] — the bounded forward-chaining reasoner adapter (C6).
//! - [`sink`] — the CSV/JSON streaming output sink (C7).
//! - [`driver`] — the per-run driver tying the above together over a
//!   directory of ontology files (C8).
//! - [`parser`] — the Turtle ontology loader.
//! - [`cache`] — a small bounded, stats-tracking cache used to share `Arc<IRI>`
//!   instances.
//! - [`constants`] — vocabulary IRIs and default tunables.
//! - [`error`] — the crate-wide error type.

/// Crate-wide error type and result alias.
pub mod error;

/// IRI handling: storage, hashing, namespace-prefix resolution.
pub mod iri;

/// Vocabulary IRIs and default tunables.
pub mod constants;

/// OWL2 entities: classes, properties, individuals, literals, annotations.
pub mod entities;

/// The fourteen axiom kinds the enumeration and explanation pipeline covers.
pub mod axioms;

/// Ontology structure: entities, axioms, base IRI.
pub mod ontology;

/// Bounded, stats-tracking cache for shared `Arc<IRI>` instances.
pub mod cache;

/// Turtle ontology loading.
pub mod parser;

/// Entity-name resolver (C1).
pub mod resolver;

/// Process-wide deduplication register (C2).
pub mod register;

/// Axiom pretty-printer (C3).
pub mod pretty;

/// Explanation service (C4): reasoner justifications + pattern fallback.
pub mod explain;

/// Bounded forward-chaining reasoner and its opaque adapter (C6).
pub mod reasoning;

/// Inference enumerator (C5): the three relation-family walks.
pub mod enumerator;

/// Streaming CSV/JSON output sink (C7).
pub mod sink;

/// Per-run driver (C8): directory iteration, per-ontology orchestration.
pub mod driver;

pub use axioms::{Axiom, AxiomType};
pub use entities::{Class, DataProperty, Individual, NamedIndividual, ObjectProperty};
pub use error::{OwlError, OwlResult};
pub use iri::IRI;
pub use ontology::Ontology;
pub use parser::{OntologyParser, TurtleParser};
pub use reasoning::ReasonerAdapter;
pub use register::GlobalRegister;
pub use resolver::EntityResolver;
pub use sink::OutputSink;

/// Library name, from `Cargo.toml`.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library version, from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
