//! Entity-name resolver (C1): canonical bracketed forms, short display
//! names, and bare-fragment resolution against an ontology's base IRI.

use crate::error::{OwlError, OwlResult};
use crate::iri::IRI;
use crate::ontology::Ontology;

/// Resolves entity names for one ontology. Not reentrant across ontologies
/// by design (each load gets its own resolver, tied to that ontology's base
/// IRI), matching the scheduling note that the reasoner and resolver need
/// not survive across files.
pub struct EntityResolver {
    base_iri: Option<IRI>,
}

impl EntityResolver {
    pub fn new(base_iri: Option<IRI>) -> Self {
        Self { base_iri }
    }

    pub fn for_ontology(ontology: &Ontology) -> Self {
        Self::new(ontology.iri().cloned())
    }

    /// The canonical bracketed form: `<http://example.org/Person>`.
    pub fn full_iri(&self, iri: &IRI) -> String {
        format!("<{}>", iri.as_str())
    }

    /// A short human-facing form: `prefix:local` when the IRI carries a
    /// display prefix, otherwise the bracketed full form.
    pub fn display(&self, iri: &IRI) -> String {
        match iri.prefix() {
            Some(prefix) => format!("{prefix}:{}", iri.local_name()),
            None => self.full_iri(iri),
        }
    }

    /// Resolves `raw` to a canonical bracketed IRI. Accepts an
    /// already-bracketed IRI, an absolute URI, or a bare fragment (resolved
    /// against this ontology's base IRI).
    pub fn normalize(&self, raw: &str) -> OwlResult<String> {
        let trimmed = raw.trim();

        if let Some(inner) = trimmed.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
            let iri = IRI::new(inner)?;
            return Ok(format!("<{}>", iri.as_str()));
        }

        if trimmed.contains("://") {
            let iri = IRI::new(trimmed)?;
            return Ok(format!("<{}>", iri.as_str()));
        }

        let base = self
            .base_iri
            .as_ref()
            .ok_or_else(|| OwlError::MalformedIri(trimmed.to_string()))?;
        let base_str = base.as_str();
        let joined = if base_str.ends_with('#') || base_str.ends_with('/') {
            format!("{base_str}{trimmed}")
        } else {
            format!("{base_str}#{trimmed}")
        };
        let iri = IRI::new(joined)?;
        Ok(format!("<{}>", iri.as_str()))
    }
}
