//! Axioms: the logical statements the enumerator reasons over and the
//! pretty-printer renders.
//!
//! Class expressions are intentionally not modelled here beyond named
//! classes: every axiom kind the engine deals with relates named classes,
//! named properties, and individuals, so a flat, directly-IRI-addressed
//! representation is enough and keeps the pretty-printer a simple match.

use crate::entities::Literal;
use crate::iri::IRI;

/// Discriminant for [`Axiom`], used for TBox/ABox counting and indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxiomType {
    ClassAssertion,
    PropertyAssertion,
    DataPropertyAssertion,
    SubClassOf,
    EquivalentClasses,
    SubObjectPropertyOf,
    ObjectPropertyDomain,
    ObjectPropertyRange,
    TransitiveObjectProperty,
    SymmetricObjectProperty,
    FunctionalObjectProperty,
    InverseObjectProperties,
    EquivalentObjectProperties,
    SubPropertyChainOf,
}

impl AxiomType {
    /// TBox axioms describe the schema; ABox axioms describe instance data.
    pub fn is_tbox(self) -> bool {
        !matches!(
            self,
            AxiomType::ClassAssertion | AxiomType::PropertyAssertion | AxiomType::DataPropertyAssertion
        )
    }
}

/// A single OWL2 axiom, restricted to the fourteen kinds the enumeration
/// and explanation pipeline understands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Axiom {
    /// `a rdf:type C`
    ClassAssertion { individual: IRI, class: IRI },
    /// `(a, b) ∈ P`
    PropertyAssertion { subject: IRI, property: IRI, object: IRI },
    /// `(a, v) ∈ P` where `v` is a literal
    DataPropertyAssertion { subject: IRI, property: IRI, value: Literal },
    /// `C ⊑ D`
    SubClassOf { sub_class: IRI, super_class: IRI },
    /// `C₁ ≡ C₂ ≡ … `
    EquivalentClasses { classes: Vec<IRI> },
    /// `P ⊑ Q`
    SubObjectPropertyOf { sub_property: IRI, super_property: IRI },
    /// `rdfs:domain(P) = C`
    ObjectPropertyDomain { property: IRI, class: IRI },
    /// `rdfs:range(P) = C`
    ObjectPropertyRange { property: IRI, class: IRI },
    /// `P⁺ ⊑ P`
    TransitiveObjectProperty { property: IRI },
    /// `P ≡ P⁻`
    SymmetricObjectProperty { property: IRI },
    /// `⊤ ⊑ ≤1 P`
    FunctionalObjectProperty { property: IRI },
    /// `P ≡ Q⁻`
    InverseObjectProperties { property: IRI, inverse: IRI },
    /// `P₁ ≡ P₂ ≡ …`
    EquivalentObjectProperties { properties: Vec<IRI> },
    /// `P₁ ∘ … ∘ Pₙ ⊑ Q`
    SubPropertyChainOf { chain: Vec<IRI>, super_property: IRI },
}

impl Axiom {
    pub fn axiom_type(&self) -> AxiomType {
        match self {
            Axiom::ClassAssertion { .. } => AxiomType::ClassAssertion,
            Axiom::PropertyAssertion { .. } => AxiomType::PropertyAssertion,
            Axiom::DataPropertyAssertion { .. } => AxiomType::DataPropertyAssertion,
            Axiom::SubClassOf { .. } => AxiomType::SubClassOf,
            Axiom::EquivalentClasses { .. } => AxiomType::EquivalentClasses,
            Axiom::SubObjectPropertyOf { .. } => AxiomType::SubObjectPropertyOf,
            Axiom::ObjectPropertyDomain { .. } => AxiomType::ObjectPropertyDomain,
            Axiom::ObjectPropertyRange { .. } => AxiomType::ObjectPropertyRange,
            Axiom::TransitiveObjectProperty { .. } => AxiomType::TransitiveObjectProperty,
            Axiom::SymmetricObjectProperty { .. } => AxiomType::SymmetricObjectProperty,
            Axiom::FunctionalObjectProperty { .. } => AxiomType::FunctionalObjectProperty,
            Axiom::InverseObjectProperties { .. } => AxiomType::InverseObjectProperties,
            Axiom::EquivalentObjectProperties { .. } => AxiomType::EquivalentObjectProperties,
            Axiom::SubPropertyChainOf { .. } => AxiomType::SubPropertyChainOf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(s: &str) -> IRI {
        IRI::new(s).unwrap()
    }

    #[test]
    fn axiom_type_classification() {
        let a = Axiom::ClassAssertion {
            individual: iri("http://example.org/john"),
            class: iri("http://example.org/Person"),
        };
        assert_eq!(a.axiom_type(), AxiomType::ClassAssertion);
        assert!(!a.axiom_type().is_tbox());

        let b = Axiom::SubClassOf {
            sub_class: iri("http://example.org/Person"),
            super_class: iri("http://example.org/Animal"),
        };
        assert!(b.axiom_type().is_tbox());
    }
}
