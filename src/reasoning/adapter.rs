//! Reasoner adapter (C6): the opaque interface the enumerator and
//! explanation service consult, backed by the eager [`Closure`].

use crate::axioms::Axiom;
use crate::iri::IRI;
use crate::ontology::Ontology;
use crate::reasoning::closure::Closure;
use hashbrown::HashSet;

/// A prepared reasoner over one ontology. Construction computes the full
/// closure eagerly; every query afterwards is a cheap lookup.
pub struct ReasonerAdapter {
    closure: Closure,
}

impl ReasonerAdapter {
    /// Prepares the reasoner: computes the closure and enables explanation
    /// tracking (trivial here, since justifications only ever look at
    /// directly-asserted axioms — there's no extra state to track).
    pub fn prepare(ontology: &Ontology) -> Self {
        Self {
            closure: Closure::build(ontology),
        }
    }

    /// Always `true`: clash detection is explicitly out of scope.
    pub fn is_consistent(&self) -> bool {
        true
    }

    /// Always empty: unsatisfiability detection is explicitly out of scope.
    pub fn unsatisfiable_classes(&self) -> HashSet<IRI> {
        HashSet::new()
    }

    pub fn entails(&self, axiom: &Axiom) -> bool {
        self.closure.entails(axiom)
    }

    pub fn types(&self, individual: &IRI, direct: bool) -> HashSet<IRI> {
        self.closure.types(individual, direct)
    }

    pub fn property_values(&self, subject: &IRI, property: &IRI) -> HashSet<IRI> {
        self.closure.property_values(subject, property)
    }

    pub fn super_classes(&self, class: &IRI, direct: bool) -> HashSet<IRI> {
        self.closure.super_classes(class, direct)
    }

    /// A justification is only ever produced when `axiom` is itself
    /// verbatim among the ontology's asserted axioms — deeper entailments
    /// return an empty sequence by design, pushing the interesting
    /// explanation work to the pattern-based fallback in `explain.rs`.
    pub fn justifications(&self, axiom: &Axiom, max: usize) -> Vec<Vec<Axiom>> {
        if max == 0 || !self.closure.is_asserted(axiom) {
            return Vec::new();
        }
        vec![vec![axiom.clone()]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::Ontology;

    fn iri(s: &str) -> IRI {
        IRI::new(s).unwrap()
    }

    #[test]
    fn trivial_consistency() {
        let reasoner = ReasonerAdapter::prepare(&Ontology::new());
        assert!(reasoner.is_consistent());
        assert!(reasoner.unsatisfiable_classes().is_empty());
    }

    #[test]
    fn justification_only_for_asserted_axioms() {
        let mut ontology = Ontology::new();
        let axiom = Axiom::SubClassOf {
            sub_class: iri("http://ex/Student"),
            super_class: iri("http://ex/Person"),
        };
        ontology.add_axiom(axiom.clone());
        ontology.add_axiom(Axiom::SubClassOf {
            sub_class: iri("http://ex/Person"),
            super_class: iri("http://ex/Animal"),
        });
        let reasoner = ReasonerAdapter::prepare(&ontology);

        let direct = reasoner.justifications(&axiom, 5);
        assert_eq!(direct, vec![vec![axiom]]);

        let transitive = Axiom::SubClassOf {
            sub_class: iri("http://ex/Student"),
            super_class: iri("http://ex/Animal"),
        };
        assert!(reasoner.entails(&transitive));
        assert!(reasoner.justifications(&transitive, 5).is_empty());
    }
}
