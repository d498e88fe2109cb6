//! IRI handling for ontology entities
//!
//! Provides efficient IRI storage, comparison, and namespace-prefix lookup.

use crate::error::{OwlError, OwlResult};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use once_cell::sync::Lazy;

/// Internationalized Resource Identifier.
///
/// Every entity (class, property, individual) is identified by one of
/// these. Equality and hashing are by the full IRI string only; the
/// optional prefix is purely a display aid.
#[derive(Debug, Clone)]
pub struct IRI {
    iri: Arc<str>,
    prefix: Option<Arc<str>>,
    hash: u64,
}

impl PartialEq for IRI {
    fn eq(&self, other: &Self) -> bool {
        self.iri == other.iri
    }
}

impl Eq for IRI {}

impl PartialOrd for IRI {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IRI {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.iri.cmp(&other.iri)
    }
}

impl IRI {
    /// Create a new IRI from a string, rejecting obviously malformed input.
    pub fn new<S: Into<String>>(iri: S) -> OwlResult<Self> {
        let iri_str = iri.into();

        if iri_str.is_empty() {
            return Err(OwlError::MalformedIri("empty IRI".to_string()));
        }
        if iri_str.chars().any(|c| c.is_whitespace() || c == '<' || c == '>') {
            return Err(OwlError::MalformedIri(iri_str));
        }

        let hash = {
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            iri_str.hash(&mut hasher);
            hasher.finish()
        };

        Ok(IRI {
            iri: Arc::from(iri_str),
            prefix: None,
            hash,
        })
    }

    /// Create a new IRI carrying a display-only namespace prefix.
    pub fn with_prefix<S: Into<String>, P: Into<String>>(iri: S, prefix: P) -> OwlResult<Self> {
        let mut iri = Self::new(iri)?;
        iri.prefix = Some(Arc::from(prefix.into()));
        Ok(iri)
    }

    pub fn as_str(&self) -> &str {
        &self.iri
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The local name: everything after the last `#` or `/`.
    pub fn local_name(&self) -> &str {
        let iri = self.as_str();
        if let Some(hash_pos) = iri.rfind('#') {
            &iri[hash_pos + 1..]
        } else if let Some(slash_pos) = iri.rfind('/') {
            &iri[slash_pos + 1..]
        } else {
            iri
        }
    }

    /// The namespace part: everything up to and including the last `#` or `/`.
    pub fn namespace(&self) -> &str {
        let iri = self.as_str();
        if let Some(hash_pos) = iri.rfind('#') {
            &iri[..hash_pos + 1]
        } else if let Some(slash_pos) = iri.rfind('/') {
            &iri[..slash_pos + 1]
        } else {
            ""
        }
    }

    pub fn is_owl(&self) -> bool {
        self.as_str().starts_with("http://www.w3.org/2002/07/owl#")
    }

    pub fn is_rdf(&self) -> bool {
        self.as_str()
            .starts_with("http://www.w3.org/1999/02/22-rdf-syntax-ns#")
    }

    pub fn is_rdfs(&self) -> bool {
        self.as_str()
            .starts_with("http://www.w3.org/2000/01/rdf-schema#")
    }

    pub fn is_xsd(&self) -> bool {
        self.as_str()
            .starts_with("http://www.w3.org/2001/XMLSchema#")
    }
}

impl fmt::Display for IRI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, "{}:{}", prefix, self.local_name())
        } else {
            write!(f, "{}", self.iri)
        }
    }
}

impl Hash for IRI {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

/// The four vocabulary namespaces the explanation engine understands by name.
pub static OWL_IRIS: Lazy<IRIRegistry> = Lazy::new(|| {
    let mut registry = IRIRegistry::new();
    registry.register("owl", "http://www.w3.org/2002/07/owl#");
    registry.register("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
    registry.register("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
    registry.register("xsd", "http://www.w3.org/2001/XMLSchema#");
    registry
});

/// Maps namespace prefixes (as declared by an ontology's `@prefix` lines) to
/// full namespace IRIs.
#[derive(Debug, Clone, Default)]
pub struct IRIRegistry {
    prefixes: indexmap::IndexMap<String, String>,
}

impl IRIRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, prefix: &str, namespace: &str) {
        self.prefixes.insert(prefix.to_string(), namespace.to_string());
    }

    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Resolve a `prefix:local` pair to a full IRI.
    pub fn resolve(&self, prefix: &str, local_name: &str) -> OwlResult<IRI> {
        let namespace = self
            .namespace(prefix)
            .ok_or_else(|| OwlError::UnknownPrefix(prefix.to_string()))?;
        IRI::with_prefix(format!("{namespace}{local_name}"), prefix)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iri_creation() {
        let iri = IRI::new("http://example.org/Person").unwrap();
        assert_eq!(iri.as_str(), "http://example.org/Person");
        assert_eq!(iri.local_name(), "Person");
        assert_eq!(iri.namespace(), "http://example.org/");
    }

    #[test]
    fn iri_with_prefix() {
        let iri = IRI::with_prefix("http://example.org/Person", "ex").unwrap();
        assert_eq!(iri.as_str(), "http://example.org/Person");
        assert_eq!(iri.prefix(), Some("ex"));
    }

    #[test]
    fn iri_namespaces() {
        let owl_iri = IRI::new("http://www.w3.org/2002/07/owl#Class").unwrap();
        assert!(owl_iri.is_owl());
        assert!(!owl_iri.is_rdf());

        let rdf_iri = IRI::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#type").unwrap();
        assert!(rdf_iri.is_rdf());
        assert!(!rdf_iri.is_owl());
    }

    #[test]
    fn empty_iri_rejected() {
        assert!(IRI::new("").is_err());
    }

    #[test]
    fn registry_resolve() {
        let mut registry = IRIRegistry::new();
        registry.register("ex", "http://example.org/");
        let iri = registry.resolve("ex", "Person").unwrap();
        assert_eq!(iri.as_str(), "http://example.org/Person");
    }
}
