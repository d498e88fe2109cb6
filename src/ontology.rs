//! Ontology structure: entities, axioms, and the base IRI used for
//! fragment normalization.

use crate::axioms::{Axiom, AxiomType};
use crate::entities::*;
use crate::iri::{IRIRegistry, IRI};
use std::collections::HashSet;
use std::sync::Arc;

/// A loaded ontology: its entities, its axioms, and enough namespace state
/// to resolve bare fragments back to full IRIs.
#[derive(Debug, Clone, Default)]
pub struct Ontology {
    iri: Option<Arc<IRI>>,
    imports: HashSet<Arc<IRI>>,

    classes: HashSet<Arc<Class>>,
    object_properties: HashSet<Arc<ObjectProperty>>,
    data_properties: HashSet<Arc<DataProperty>>,
    named_individuals: HashSet<Arc<NamedIndividual>>,

    axioms: Vec<Axiom>,

    iri_registry: IRIRegistry,
}

impl Ontology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_iri(&mut self, iri: IRI) {
        self.iri = Some(Arc::new(iri));
    }

    pub fn iri(&self) -> Option<&IRI> {
        self.iri.as_deref()
    }

    pub fn add_import(&mut self, import_iri: IRI) {
        self.imports.insert(Arc::new(import_iri));
    }

    pub fn imports(&self) -> &HashSet<Arc<IRI>> {
        &self.imports
    }

    pub fn add_class(&mut self, class: Class) {
        self.classes.insert(Arc::new(class));
    }

    pub fn classes(&self) -> &HashSet<Arc<Class>> {
        &self.classes
    }

    pub fn add_object_property(&mut self, property: ObjectProperty) {
        self.object_properties.insert(Arc::new(property));
    }

    pub fn object_properties(&self) -> &HashSet<Arc<ObjectProperty>> {
        &self.object_properties
    }

    pub fn add_data_property(&mut self, property: DataProperty) {
        self.data_properties.insert(Arc::new(property));
    }

    pub fn data_properties(&self) -> &HashSet<Arc<DataProperty>> {
        &self.data_properties
    }

    pub fn add_named_individual(&mut self, individual: NamedIndividual) {
        self.named_individuals.insert(Arc::new(individual));
    }

    pub fn named_individuals(&self) -> &HashSet<Arc<NamedIndividual>> {
        &self.named_individuals
    }

    pub fn add_axiom(&mut self, axiom: Axiom) {
        self.axioms.push(axiom);
    }

    pub fn axioms(&self) -> &[Axiom] {
        &self.axioms
    }

    pub fn iri_registry_mut(&mut self) -> &mut IRIRegistry {
        &mut self.iri_registry
    }

    pub fn iri_registry(&self) -> &IRIRegistry {
        &self.iri_registry
    }

    pub fn entity_count(&self) -> usize {
        self.classes.len()
            + self.object_properties.len()
            + self.data_properties.len()
            + self.named_individuals.len()
    }

    pub fn axiom_count(&self) -> usize {
        self.axioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0 && self.axiom_count() == 0
    }

    /// Number of schema (TBox) axioms: everything but class/property assertions.
    pub fn tbox_size(&self) -> usize {
        self.axioms
            .iter()
            .filter(|a| a.axiom_type().is_tbox())
            .count()
    }

    /// Number of instance-data (ABox) axioms: class and property assertions.
    pub fn abox_size(&self) -> usize {
        self.axioms
            .iter()
            .filter(|a| !a.axiom_type().is_tbox())
            .count()
    }

    /// True if `axiom` (compared structurally) appears verbatim among the
    /// ontology's axioms — used by the explanation service's "Directly
    /// asserted" checks.
    pub fn has_axiom(&self, axiom: &Axiom) -> bool {
        self.axioms.contains(axiom)
    }

    pub fn axioms_of_type(&self, ty: AxiomType) -> impl Iterator<Item = &Axiom> {
        self.axioms.iter().filter(move |a| a.axiom_type() == ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(s: &str) -> IRI {
        IRI::new(s).unwrap()
    }

    #[test]
    fn ontology_creation() {
        let ontology = Ontology::new();
        assert!(ontology.is_empty());
    }

    #[test]
    fn tbox_abox_counts() {
        let mut ontology = Ontology::new();
        ontology.add_axiom(Axiom::SubClassOf {
            sub_class: iri("http://example.org/Parent"),
            super_class: iri("http://example.org/Person"),
        });
        ontology.add_axiom(Axiom::ClassAssertion {
            individual: iri("http://example.org/john"),
            class: iri("http://example.org/Person"),
        });
        assert_eq!(ontology.tbox_size(), 1);
        assert_eq!(ontology.abox_size(), 1);
        assert_eq!(ontology.axiom_count(), 2);
    }

    #[test]
    fn add_entities() {
        let mut ontology = Ontology::new();
        ontology.add_class(Class::new("http://example.org/Person").unwrap());
        ontology.add_object_property(ObjectProperty::new("http://example.org/hasParent").unwrap());
        assert_eq!(ontology.entity_count(), 2);
    }

    #[test]
    fn imports() {
        let mut ontology = Ontology::new();
        ontology.add_import(iri("http://example.org/import1"));
        assert_eq!(ontology.imports().len(), 1);
    }
}
