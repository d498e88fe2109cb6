//! Ontology entities: classes, properties, individuals, annotations.

use crate::cache::BoundedCache;
use crate::error::OwlResult;
use crate::iri::IRI;
use once_cell::sync::Lazy;
use smallvec::SmallVec;
use std::collections::HashSet;
use std::sync::Arc;

/// Shares `Arc<IRI>` instances across entity construction within a process,
/// so repeated mentions of the same entity across a large ontology don't
/// each allocate their own IRI.
static GLOBAL_ENTITY_CACHE: Lazy<BoundedCache<String, Arc<IRI>>> = Lazy::new(|| BoundedCache::new(5_000));

fn get_shared_iri<S: Into<String>>(iri: S) -> OwlResult<Arc<IRI>> {
    let iri_str = iri.into();
    if let Some(cached) = GLOBAL_ENTITY_CACHE.get(&iri_str) {
        return Ok(cached);
    }
    let arc_iri = Arc::new(IRI::new(iri_str.clone())?);
    GLOBAL_ENTITY_CACHE.insert(iri_str, arc_iri.clone());
    Ok(arc_iri)
}

/// A named class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Class {
    iri: Arc<IRI>,
    annotations: SmallVec<[Annotation; 4]>,
}

impl Class {
    pub fn new<S: Into<String>>(iri: S) -> OwlResult<Self> {
        Ok(Class {
            iri: get_shared_iri(iri)?,
            annotations: SmallVec::new(),
        })
    }

    pub fn iri(&self) -> &IRI {
        &self.iri
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub fn is_thing(&self) -> bool {
        self.iri.as_str() == crate::constants::OWL_THING
    }

    pub fn is_nothing(&self) -> bool {
        self.iri.as_str() == crate::constants::OWL_NOTHING
    }
}

/// An object property, with its OWL2 characteristics.
#[derive(Debug, Clone)]
pub struct ObjectProperty {
    iri: Arc<IRI>,
    annotations: SmallVec<[Annotation; 4]>,
    characteristics: HashSet<ObjectPropertyCharacteristic>,
}

impl ObjectProperty {
    pub fn new<S: Into<String>>(iri: S) -> OwlResult<Self> {
        Ok(ObjectProperty {
            iri: get_shared_iri(iri)?,
            annotations: SmallVec::new(),
            characteristics: HashSet::new(),
        })
    }

    pub fn iri(&self) -> &IRI {
        &self.iri
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn characteristics(&self) -> &HashSet<ObjectPropertyCharacteristic> {
        &self.characteristics
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub fn add_characteristic(&mut self, characteristic: ObjectPropertyCharacteristic) {
        self.characteristics.insert(characteristic);
    }

    pub fn has_characteristic(&self, characteristic: ObjectPropertyCharacteristic) -> bool {
        self.characteristics.contains(&characteristic)
    }

    pub fn is_functional(&self) -> bool {
        self.has_characteristic(ObjectPropertyCharacteristic::Functional)
    }

    pub fn is_transitive(&self) -> bool {
        self.has_characteristic(ObjectPropertyCharacteristic::Transitive)
    }

    pub fn is_symmetric(&self) -> bool {
        self.has_characteristic(ObjectPropertyCharacteristic::Symmetric)
    }
}

impl PartialEq for ObjectProperty {
    fn eq(&self, other: &Self) -> bool {
        self.iri == other.iri
    }
}

impl Eq for ObjectProperty {}

impl std::hash::Hash for ObjectProperty {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.iri.hash(state);
    }
}

/// Characteristics an object property may be declared to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectPropertyCharacteristic {
    Functional,
    InverseFunctional,
    Transitive,
    Symmetric,
    Asymmetric,
    Reflexive,
    Irreflexive,
}

/// A data property.
#[derive(Debug, Clone)]
pub struct DataProperty {
    iri: Arc<IRI>,
    annotations: SmallVec<[Annotation; 4]>,
    characteristics: HashSet<DataPropertyCharacteristic>,
}

impl DataProperty {
    pub fn new<S: Into<String>>(iri: S) -> OwlResult<Self> {
        Ok(DataProperty {
            iri: get_shared_iri(iri)?,
            annotations: SmallVec::new(),
            characteristics: HashSet::new(),
        })
    }

    pub fn iri(&self) -> &IRI {
        &self.iri
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn characteristics(&self) -> &HashSet<DataPropertyCharacteristic> {
        &self.characteristics
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub fn add_characteristic(&mut self, characteristic: DataPropertyCharacteristic) {
        self.characteristics.insert(characteristic);
    }

    pub fn is_functional(&self) -> bool {
        self.characteristics
            .contains(&DataPropertyCharacteristic::Functional)
    }
}

impl PartialEq for DataProperty {
    fn eq(&self, other: &Self) -> bool {
        self.iri == other.iri
    }
}

impl Eq for DataProperty {}

impl std::hash::Hash for DataProperty {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.iri.hash(state);
    }
}

/// Characteristics a data property may be declared to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataPropertyCharacteristic {
    Functional,
}

/// A named individual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedIndividual {
    iri: Arc<IRI>,
    annotations: SmallVec<[Annotation; 4]>,
}

impl NamedIndividual {
    pub fn new<S: Into<String>>(iri: S) -> OwlResult<Self> {
        Ok(NamedIndividual {
            iri: get_shared_iri(iri)?,
            annotations: SmallVec::new(),
        })
    }

    pub fn iri(&self) -> &IRI {
        &self.iri
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }
}

/// An annotation attached to an entity or axiom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    property: Arc<IRI>,
    value: AnnotationValue,
}

impl Annotation {
    pub fn new<V: Into<AnnotationValue>>(property: Arc<IRI>, value: V) -> Self {
        Annotation {
            property,
            value: value.into(),
        }
    }

    pub fn property(&self) -> &IRI {
        &self.property
    }

    pub fn value(&self) -> &AnnotationValue {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationValue {
    Iri(IRI),
    Literal(Literal),
    AnonymousIndividual(String),
}

impl From<IRI> for AnnotationValue {
    fn from(iri: IRI) -> Self {
        AnnotationValue::Iri(iri)
    }
}

impl From<Literal> for AnnotationValue {
    fn from(literal: Literal) -> Self {
        AnnotationValue::Literal(literal)
    }
}

impl From<String> for AnnotationValue {
    fn from(s: String) -> Self {
        AnnotationValue::Literal(Literal::simple(s))
    }
}

/// A literal value (string, typed, or language-tagged).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    lexical_form: String,
    datatype: IRI,
    language_tag: Option<String>,
}

impl Literal {
    pub fn simple<S: Into<String>>(value: S) -> Self {
        Literal {
            lexical_form: value.into(),
            datatype: IRI::new("http://www.w3.org/2001/XMLSchema#string")
                .expect("xsd:string is a well-formed IRI"),
            language_tag: None,
        }
    }

    pub fn typed<S: Into<String>>(value: S, datatype: IRI) -> Self {
        Literal {
            lexical_form: value.into(),
            datatype,
            language_tag: None,
        }
    }

    pub fn lang_tagged<S: Into<String>, L: Into<String>>(value: S, language: L) -> Self {
        Literal {
            lexical_form: value.into(),
            datatype: IRI::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#langString")
                .expect("rdf:langString is a well-formed IRI"),
            language_tag: Some(language.into()),
        }
    }

    pub fn lexical_form(&self) -> &str {
        &self.lexical_form
    }

    pub fn datatype(&self) -> &IRI {
        &self.datatype
    }

    pub fn language_tag(&self) -> Option<&str> {
        self.language_tag.as_deref()
    }

    pub fn is_plain(&self) -> bool {
        self.datatype.as_str() == "http://www.w3.org/2001/XMLSchema#string" && self.language_tag.is_none()
    }

    pub fn is_lang_tagged(&self) -> bool {
        self.language_tag.is_some()
    }
}

/// Anonymous individual (blank node).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnonymousIndividual {
    node_id: String,
    annotations: SmallVec<[Annotation; 4]>,
}

impl AnonymousIndividual {
    pub fn new<S: Into<String>>(node_id: S) -> Self {
        AnonymousIndividual {
            node_id: node_id.into(),
            annotations: SmallVec::new(),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }
}

/// Any individual, named or anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Individual {
    Named(NamedIndividual),
    Anonymous(AnonymousIndividual),
}

impl From<NamedIndividual> for Individual {
    fn from(individual: NamedIndividual) -> Self {
        Individual::Named(individual)
    }
}

impl From<AnonymousIndividual> for Individual {
    fn from(individual: AnonymousIndividual) -> Self {
        Individual::Anonymous(individual)
    }
}

impl Individual {
    pub fn iri(&self) -> Option<&IRI> {
        match self {
            Individual::Named(named) => Some(named.iri()),
            Individual::Anonymous(_) => None,
        }
    }

    pub fn node_id(&self) -> Option<&str> {
        match self {
            Individual::Named(_) => None,
            Individual::Anonymous(anonymous) => Some(anonymous.node_id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_creation() {
        let person_class = Class::new("http://example.org/Person").unwrap();
        assert_eq!(person_class.iri().as_str(), "http://example.org/Person");
    }

    #[test]
    fn owl_classes() {
        let thing = Class::new(crate::constants::OWL_THING).unwrap();
        let nothing = Class::new(crate::constants::OWL_NOTHING).unwrap();
        assert!(thing.is_thing());
        assert!(nothing.is_nothing());
    }

    #[test]
    fn object_property_characteristics() {
        let mut has_ancestor = ObjectProperty::new("http://example.org/hasAncestor").unwrap();
        assert!(!has_ancestor.is_transitive());
        has_ancestor.add_characteristic(ObjectPropertyCharacteristic::Transitive);
        assert!(has_ancestor.is_transitive());
    }

    #[test]
    fn data_property_characteristics() {
        let mut has_name = DataProperty::new("http://example.org/hasName").unwrap();
        has_name.add_characteristic(DataPropertyCharacteristic::Functional);
        assert!(has_name.is_functional());
    }

    #[test]
    fn literal_forms() {
        let simple_lit = Literal::simple("hello");
        assert!(simple_lit.is_plain());
        let lang_lit = Literal::lang_tagged("bonjour", "fr");
        assert!(lang_lit.is_lang_tagged());
    }

    #[test]
    fn shared_iri_cache_reuses_allocations() {
        let a = Class::new("http://example.org/Shared").unwrap();
        let b = Class::new("http://example.org/Shared").unwrap();
        assert!(Arc::ptr_eq(&a.iri, &b.iri));
    }
}
