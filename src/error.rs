//! Error types for the inference-explanation engine

use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum OwlError {
    /// An entity reference did not resolve to a well-formed IRI
    #[error("Malformed IRI: {0}")]
    MalformedIri(String),

    /// An entity reference used an unknown namespace prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// An entity reference named something not present in the ontology
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    /// Failure while parsing an ontology document
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Ontology is inconsistent; entailments drawn from it are suspect
    #[error("Inconsistent ontology: {0}")]
    InconsistentOntology(String),

    /// The reasoner failed internally; callers treat this as "no information"
    #[error("Reasoner internal error: {0}")]
    ReasonerInternal(String),

    /// No justification could be produced for an entailment
    #[error("Justification unavailable for: {0}")]
    JustificationUnavailable(String),

    /// A single ontology failed in a way that aborts processing that file only
    #[error("Ontology {ontology} failed: {message}")]
    PerOntologyFatal { ontology: String, message: String },

    /// Configuration failure (bad CLI arguments, missing directories, ...)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O failure, always fatal and propagated to the process boundary
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV writer failure, fatal
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON writer failure, fatal
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Catch-all for anything not worth its own variant
    #[error("Error: {0}")]
    Other(String),
}

/// Result type used throughout the crate
pub type OwlResult<T> = Result<T, OwlError>;
