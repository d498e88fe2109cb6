//! Axiom pretty-printer (C3): one deterministic line per axiom.
//!
//! Deterministic means no iteration over unordered collections without
//! sorting first — `EquivalentClasses`/`EquivalentObjectProperties` members
//! are rendered in the order they're stored, which is insertion order from
//! parsing, so logically-equal axioms from the same input always print
//! byte-identical lines.

use crate::axioms::Axiom;
use crate::entities::Literal;
use crate::resolver::EntityResolver;
use itertools::Itertools;

pub fn render(axiom: &Axiom, resolver: &EntityResolver) -> String {
    let d = |iri: &crate::iri::IRI| resolver.display(iri);

    match axiom {
        Axiom::ClassAssertion { individual, class } => {
            format!("{} rdf:type {}", d(individual), d(class))
        }
        Axiom::PropertyAssertion { subject, property, object } => {
            format!("{} {} {}", d(subject), d(property), d(object))
        }
        Axiom::DataPropertyAssertion { subject, property, value } => {
            format!("{} {} {}", d(subject), d(property), render_literal(value, resolver))
        }
        Axiom::SubClassOf { sub_class, super_class } => {
            format!("{} rdfs:subClassOf {}", d(sub_class), d(super_class))
        }
        Axiom::EquivalentClasses { classes } => classes.iter().map(d).join(" owl:equivalentClass "),
        Axiom::SubObjectPropertyOf { sub_property, super_property } => {
            format!("{} rdfs:subPropertyOf {}", d(sub_property), d(super_property))
        }
        Axiom::ObjectPropertyDomain { property, class } => {
            format!("domain({}) = {}", d(property), d(class))
        }
        Axiom::ObjectPropertyRange { property, class } => {
            format!("range({}) = {}", d(property), d(class))
        }
        Axiom::TransitiveObjectProperty { property } => {
            format!("TransitiveObjectProperty({})", d(property))
        }
        Axiom::SymmetricObjectProperty { property } => {
            format!("SymmetricObjectProperty({})", d(property))
        }
        Axiom::FunctionalObjectProperty { property } => {
            format!("FunctionalObjectProperty({})", d(property))
        }
        Axiom::InverseObjectProperties { property, inverse } => {
            format!("{} owl:inverseOf {}", d(property), d(inverse))
        }
        Axiom::EquivalentObjectProperties { properties } => {
            properties.iter().map(d).join(" owl:equivalentProperty ")
        }
        Axiom::SubPropertyChainOf { chain, super_property } => {
            let chain_str = chain.iter().map(d).join(" \u{2218} ");
            format!("{chain_str} \u{2291} {}", d(super_property))
        }
    }
}

fn render_literal(literal: &Literal, resolver: &EntityResolver) -> String {
    if let Some(lang) = literal.language_tag() {
        format!("\"{}\"@{}", literal.lexical_form(), lang)
    } else if literal.is_plain() {
        format!("\"{}\"", literal.lexical_form())
    } else {
        format!(
            "\"{}\"^^{}",
            literal.lexical_form(),
            resolver.display(literal.datatype())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iri::IRI;

    fn iri(s: &str) -> IRI {
        IRI::new(s).unwrap()
    }

    #[test]
    fn renders_class_assertion() {
        let resolver = EntityResolver::new(None);
        let axiom = Axiom::ClassAssertion {
            individual: iri("http://ex/john"),
            class: iri("http://ex/Person"),
        };
        assert_eq!(
            render(&axiom, &resolver),
            "<http://ex/john> rdf:type <http://ex/Person>"
        );
    }

    #[test]
    fn renders_equivalent_classes_n_ary() {
        let resolver = EntityResolver::new(None);
        let axiom = Axiom::EquivalentClasses {
            classes: vec![iri("http://ex/A"), iri("http://ex/B"), iri("http://ex/C")],
        };
        assert_eq!(
            render(&axiom, &resolver),
            "<http://ex/A> owl:equivalentClass <http://ex/B> owl:equivalentClass <http://ex/C>"
        );
    }

    #[test]
    fn renders_domain_and_range() {
        let resolver = EntityResolver::new(None);
        let domain = Axiom::ObjectPropertyDomain {
            property: iri("http://ex/hasAdvisor"),
            class: iri("http://ex/Student"),
        };
        assert_eq!(
            render(&domain, &resolver),
            "domain(<http://ex/hasAdvisor>) = <http://ex/Student>"
        );
    }

    #[test]
    fn renders_property_chain() {
        let resolver = EntityResolver::new(None);
        let axiom = Axiom::SubPropertyChainOf {
            chain: vec![iri("http://ex/hasParent"), iri("http://ex/hasParent")],
            super_property: iri("http://ex/hasGrandparent"),
        };
        assert_eq!(
            render(&axiom, &resolver),
            "<http://ex/hasParent> \u{2218} <http://ex/hasParent> \u{2291} <http://ex/hasGrandparent>"
        );
    }

    #[test]
    fn is_deterministic_for_equal_axioms() {
        let resolver = EntityResolver::new(None);
        let a = Axiom::SubClassOf {
            sub_class: iri("http://ex/Student"),
            super_class: iri("http://ex/Person"),
        };
        let b = a.clone();
        assert_eq!(render(&a, &resolver), render(&b, &resolver));
    }
}
