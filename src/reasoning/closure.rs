//! Bounded forward-chaining closure engine.
//!
//! Computed once, eagerly, for the whole ontology (the "eager/full-hierarchy"
//! resolution of the reasoner's Open Question) rather than lazily per query.
//! Grounded on the fixpoint-iteration shape of the teacher's
//! `ClassHierarchy`/`ClassificationEngine`, generalised from class-hierarchy
//! closure alone to also cover property-value and type closure.

use crate::axioms::Axiom;
use crate::iri::IRI;
use crate::ontology::Ontology;
use hashbrown::{HashMap, HashSet};

/// Caps the fixpoint loop so a malformed or adversarial ontology can't hang
/// the driver; mirrors the teacher's `ClassificationConfig::max_iterations`.
const MAX_FIXPOINT_ITERATIONS: usize = 1000;

/// The derived facts an ontology entails, computed once and queried many
/// times by the enumerator and explanation service.
#[derive(Debug, Default)]
pub struct Closure {
    /// class -> its (transitive) superclasses, not including itself.
    subclass_of: HashMap<IRI, HashSet<IRI>>,
    /// property -> its (transitive) superproperties, not including itself.
    subproperty_of: HashMap<IRI, HashSet<IRI>>,
    /// individual -> its (transitive) classes.
    class_assertions: HashMap<IRI, HashSet<IRI>>,
    /// subject -> property -> objects (closure, not just asserted).
    property_assertions: HashMap<IRI, HashMap<IRI, HashSet<IRI>>>,
    /// asserted class assertions only, for `direct=true` queries.
    asserted_class_assertions: HashMap<IRI, HashSet<IRI>>,
    /// asserted subclass edges only, for `direct=true` queries.
    asserted_subclass_of: HashMap<IRI, HashSet<IRI>>,
    /// property -> inverse property, from `owl:inverseOf`.
    inverse_of: HashMap<IRI, IRI>,
    transitive_properties: HashSet<IRI>,
    symmetric_properties: HashSet<IRI>,
    /// every axiom asserted verbatim, used by `entails`/`justifications`.
    asserted_axioms: HashSet<Axiom>,
}

impl Closure {
    pub fn build(ontology: &Ontology) -> Self {
        let mut c = Closure::default();

        for axiom in ontology.axioms() {
            c.asserted_axioms.insert(axiom.clone());
            match axiom {
                Axiom::SubClassOf { sub_class, super_class } => {
                    c.asserted_subclass_of
                        .entry(sub_class.clone())
                        .or_default()
                        .insert(super_class.clone());
                    edge(&mut c.subclass_of, sub_class.clone(), super_class.clone());
                }
                Axiom::EquivalentClasses { classes } => {
                    for a in classes {
                        for b in classes {
                            if a != b {
                                edge(&mut c.subclass_of, a.clone(), b.clone());
                            }
                        }
                    }
                }
                Axiom::SubObjectPropertyOf { sub_property, super_property } => {
                    edge(&mut c.subproperty_of, sub_property.clone(), super_property.clone());
                }
                Axiom::EquivalentObjectProperties { properties } => {
                    for a in properties {
                        for b in properties {
                            if a != b {
                                edge(&mut c.subproperty_of, a.clone(), b.clone());
                            }
                        }
                    }
                }
                Axiom::InverseObjectProperties { property, inverse } => {
                    c.inverse_of.insert(property.clone(), inverse.clone());
                    c.inverse_of.insert(inverse.clone(), property.clone());
                }
                Axiom::TransitiveObjectProperty { property } => {
                    c.transitive_properties.insert(property.clone());
                }
                Axiom::SymmetricObjectProperty { property } => {
                    c.symmetric_properties.insert(property.clone());
                }
                Axiom::ClassAssertion { individual, class } => {
                    c.asserted_class_assertions
                        .entry(individual.clone())
                        .or_default()
                        .insert(class.clone());
                    c.class_assertions
                        .entry(individual.clone())
                        .or_default()
                        .insert(class.clone());
                }
                Axiom::PropertyAssertion { subject, property, object } => {
                    c.property_assertions
                        .entry(subject.clone())
                        .or_default()
                        .entry(property.clone())
                        .or_default()
                        .insert(object.clone());
                }
                _ => {}
            }
        }

        c.saturate_subclass_of();
        c.saturate_subproperty_of();
        c.saturate_properties_and_types(ontology);
        c
    }

    fn saturate_subclass_of(&mut self) {
        saturate(&mut self.subclass_of);
    }

    fn saturate_subproperty_of(&mut self) {
        saturate(&mut self.subproperty_of);
    }

    fn saturate_properties_and_types(&mut self, ontology: &Ontology) {
        let domains: HashMap<IRI, IRI> = ontology
            .axioms_of_type(crate::axioms::AxiomType::ObjectPropertyDomain)
            .filter_map(|a| match a {
                Axiom::ObjectPropertyDomain { property, class } => {
                    Some((property.clone(), class.clone()))
                }
                _ => None,
            })
            .collect();
        let ranges: HashMap<IRI, IRI> = ontology
            .axioms_of_type(crate::axioms::AxiomType::ObjectPropertyRange)
            .filter_map(|a| match a {
                Axiom::ObjectPropertyRange { property, class } => {
                    Some((property.clone(), class.clone()))
                }
                _ => None,
            })
            .collect();
        let chains: Vec<(Vec<IRI>, IRI)> = ontology
            .axioms_of_type(crate::axioms::AxiomType::SubPropertyChainOf)
            .filter_map(|a| match a {
                Axiom::SubPropertyChainOf { chain, super_property } => {
                    Some((chain.clone(), super_property.clone()))
                }
                _ => None,
            })
            .collect();

        for _ in 0..MAX_FIXPOINT_ITERATIONS {
            let mut changed = false;

            // Sub-property propagation: s p o, p subproperty-of q => s q o.
            let snapshot: Vec<(IRI, IRI, IRI)> = self.all_property_triples();
            for (s, p, o) in &snapshot {
                if let Some(supers) = self.subproperty_of.get(p).cloned() {
                    for q in supers {
                        changed |= self.add_property_triple(s.clone(), q, o.clone());
                    }
                }
                if self.symmetric_properties.contains(p) {
                    changed |= self.add_property_triple(o.clone(), p.clone(), s.clone());
                }
                if let Some(inv) = self.inverse_of.get(p).cloned() {
                    changed |= self.add_property_triple(o.clone(), inv, s.clone());
                }
                if let Some(class) = domains.get(p) {
                    changed |= self.add_class_assertion(s.clone(), class.clone());
                }
                if let Some(class) = ranges.get(p) {
                    changed |= self.add_class_assertion(o.clone(), class.clone());
                }
            }

            // Transitivity: s p m, m p o, p transitive => s p o.
            for p in self.transitive_properties.clone() {
                let pairs: Vec<(IRI, IRI)> = self
                    .property_assertions
                    .iter()
                    .filter_map(|(s, by_prop)| {
                        by_prop.get(&p).map(|objs| {
                            objs.iter().map(move |o| (s.clone(), o.clone()))
                        })
                    })
                    .flatten()
                    .collect();
                for (s, m) in &pairs {
                    if let Some(seconds) = self
                        .property_assertions
                        .get(m)
                        .and_then(|by_prop| by_prop.get(&p))
                        .cloned()
                    {
                        for o in seconds {
                            changed |= self.add_property_triple(s.clone(), p.clone(), o);
                        }
                    }
                }
            }

            // Property chains: p1 ∘ ... ∘ pn ⊑ q.
            for (chain, super_property) in &chains {
                for start in self.property_assertions.keys().cloned().collect::<Vec<_>>() {
                    if let Some(ends) = self.walk_chain(&start, chain) {
                        for end in ends {
                            changed |= self.add_property_triple(
                                start.clone(),
                                super_property.clone(),
                                end,
                            );
                        }
                    }
                }
            }

            // Lift class assertions through the subclass closure.
            let class_snapshot: Vec<(IRI, IRI)> = self
                .class_assertions
                .iter()
                .flat_map(|(ind, classes)| classes.iter().map(move |c| (ind.clone(), c.clone())))
                .collect();
            for (ind, class) in &class_snapshot {
                if let Some(supers) = self.subclass_of.get(class).cloned() {
                    for super_class in supers {
                        changed |= self.add_class_assertion(ind.clone(), super_class);
                    }
                }
            }

            if !changed {
                break;
            }
        }
    }

    fn all_property_triples(&self) -> Vec<(IRI, IRI, IRI)> {
        self.property_assertions
            .iter()
            .flat_map(|(s, by_prop)| {
                by_prop.iter().flat_map(move |(p, objs)| {
                    objs.iter().map(move |o| (s.clone(), p.clone(), o.clone()))
                })
            })
            .collect()
    }

    fn add_property_triple(&mut self, s: IRI, p: IRI, o: IRI) -> bool {
        self.property_assertions
            .entry(s)
            .or_default()
            .entry(p)
            .or_default()
            .insert(o)
    }

    fn add_class_assertion(&mut self, ind: IRI, class: IRI) -> bool {
        self.class_assertions.entry(ind).or_default().insert(class)
    }

    /// Walks a property chain `p1 ∘ ... ∘ pn` from `start`, returning every
    /// individual reachable by following one asserted/derived edge per
    /// chain element in order.
    fn walk_chain(&self, start: &IRI, chain: &[IRI]) -> Option<HashSet<IRI>> {
        let mut frontier: HashSet<IRI> = [start.clone()].into_iter().collect();
        for property in chain {
            let mut next = HashSet::new();
            for node in &frontier {
                if let Some(objs) = self
                    .property_assertions
                    .get(node)
                    .and_then(|by_prop| by_prop.get(property))
                {
                    next.extend(objs.iter().cloned());
                }
            }
            if next.is_empty() {
                return None;
            }
            frontier = next;
        }
        Some(frontier)
    }

    pub fn super_classes(&self, class: &IRI, direct: bool) -> HashSet<IRI> {
        if direct {
            self.asserted_subclass_of.get(class).cloned().unwrap_or_default()
        } else {
            self.subclass_of.get(class).cloned().unwrap_or_default()
        }
    }

    pub fn types(&self, individual: &IRI, direct: bool) -> HashSet<IRI> {
        if direct {
            self.asserted_class_assertions
                .get(individual)
                .cloned()
                .unwrap_or_default()
        } else {
            self.class_assertions.get(individual).cloned().unwrap_or_default()
        }
    }

    pub fn property_values(&self, subject: &IRI, property: &IRI) -> HashSet<IRI> {
        self.property_assertions
            .get(subject)
            .and_then(|by_prop| by_prop.get(property))
            .cloned()
            .unwrap_or_default()
    }

    pub fn entails(&self, axiom: &Axiom) -> bool {
        match axiom {
            Axiom::ClassAssertion { individual, class } => self
                .class_assertions
                .get(individual)
                .is_some_and(|classes| classes.contains(class)),
            Axiom::PropertyAssertion { subject, property, object } => self
                .property_assertions
                .get(subject)
                .and_then(|by_prop| by_prop.get(property))
                .is_some_and(|objs| objs.contains(object)),
            Axiom::SubClassOf { sub_class, super_class } => self
                .subclass_of
                .get(sub_class)
                .is_some_and(|supers| supers.contains(super_class)),
            other => self.asserted_axioms.contains(other),
        }
    }

    pub fn is_asserted(&self, axiom: &Axiom) -> bool {
        self.asserted_axioms.contains(axiom)
    }
}

fn edge(graph: &mut HashMap<IRI, HashSet<IRI>>, from: IRI, to: IRI) {
    graph.entry(from).or_default().insert(to);
}

/// Computes the transitive closure of `graph` in place via repeated
/// relaxation, bounded by [`MAX_FIXPOINT_ITERATIONS`].
fn saturate(graph: &mut HashMap<IRI, HashSet<IRI>>) {
    for _ in 0..MAX_FIXPOINT_ITERATIONS {
        let mut changed = false;
        let nodes: Vec<IRI> = graph.keys().cloned().collect();
        for node in &nodes {
            let direct: Vec<IRI> = graph.get(node).into_iter().flatten().cloned().collect();
            for mid in &direct {
                let transitive: Vec<IRI> = graph.get(mid).into_iter().flatten().cloned().collect();
                for target in transitive {
                    if target != *node {
                        changed |= graph.entry(node.clone()).or_default().insert(target);
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
}
