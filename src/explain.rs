//! Explanation service (C4): reasoner-justification track first, then a
//! pattern-based proof-sketch fallback when the reasoner has nothing to
//! offer (which, per this crate's reasoner, is whenever the goal isn't a
//! single directly-asserted axiom).

use crate::axioms::Axiom;
use crate::constants::{DEFAULT_MAX_EXPLANATIONS, DEFAULT_MAX_RECURSION_DEPTH};
use crate::iri::IRI;
use crate::ontology::Ontology;
use crate::pretty;
use crate::reasoning::adapter::ReasonerAdapter;
use crate::resolver::EntityResolver;
use std::collections::HashSet;

pub struct ExplanationService<'a> {
    ontology: &'a Ontology,
    reasoner: &'a ReasonerAdapter,
    resolver: &'a EntityResolver,
    max_explanations: usize,
    max_depth: usize,
}

/// One block of the rendered explanation: a group of premise lines that
/// together justify the goal via one pattern or one reasoner justification.
type Block = Vec<String>;

impl<'a> ExplanationService<'a> {
    pub fn new(
        ontology: &'a Ontology,
        reasoner: &'a ReasonerAdapter,
        resolver: &'a EntityResolver,
    ) -> Self {
        Self::with_limits(
            ontology,
            reasoner,
            resolver,
            DEFAULT_MAX_EXPLANATIONS,
            DEFAULT_MAX_RECURSION_DEPTH,
        )
    }

    /// Same as [`ExplanationService::new`], but with the *max-explanations*
    /// and recursion-depth bounds taken from the run configuration instead
    /// of the crate defaults.
    pub fn with_limits(
        ontology: &'a Ontology,
        reasoner: &'a ReasonerAdapter,
        resolver: &'a EntityResolver,
        max_explanations: usize,
        max_depth: usize,
    ) -> Self {
        Self {
            ontology,
            reasoner,
            resolver,
            max_explanations,
            max_depth,
        }
    }

    pub fn explain_property_relationship(&self, s: &IRI, p: &IRI, o: &IRI) -> String {
        let goal = Axiom::PropertyAssertion {
            subject: s.clone(),
            property: p.clone(),
            object: o.clone(),
        };
        let mut memo = HashSet::new();
        let blocks = self.reasoner_blocks(&goal).unwrap_or_else(|| {
            self.property_patterns(s, p, o, 0, &mut memo)
        });
        render_blocks(blocks)
    }

    pub fn explain_type_inference(&self, ind: &IRI, cls: &IRI) -> String {
        let goal = Axiom::ClassAssertion {
            individual: ind.clone(),
            class: cls.clone(),
        };
        let mut memo = HashSet::new();
        let blocks = self
            .reasoner_blocks(&goal)
            .unwrap_or_else(|| self.type_patterns(ind, cls, 0, &mut memo));
        render_blocks(blocks)
    }

    pub fn explain_class_relationship(&self, sub: &IRI, sup: &IRI) -> String {
        let goal = Axiom::SubClassOf {
            sub_class: sub.clone(),
            super_class: sup.clone(),
        };
        let mut memo = HashSet::new();
        let blocks = self
            .reasoner_blocks(&goal)
            .unwrap_or_else(|| self.subclass_patterns(sub, sup, 0, &mut memo));
        render_blocks(blocks)
    }

    /// Counts distinct rendered premise lines across all blocks in `text`.
    pub fn explanation_size(text: &str) -> usize {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<HashSet<_>>()
            .len()
    }

    fn reasoner_blocks(&self, goal: &Axiom) -> Option<Vec<Block>> {
        let justifications = self.reasoner.justifications(goal, self.max_explanations);
        if justifications.is_empty() {
            return None;
        }
        let mut seen = HashSet::new();
        let mut blocks = Vec::new();
        for justification in justifications {
            let lines: Vec<String> = justification
                .iter()
                .map(|axiom| pretty::render(axiom, self.resolver))
                .collect();
            let mut sorted = lines.clone();
            sorted.sort();
            if seen.insert(sorted) {
                blocks.push(lines);
            }
        }
        Some(blocks)
    }

    fn render_axiom(&self, axiom: &Axiom) -> String {
        pretty::render(axiom, self.resolver)
    }

    // ---- property goal: 7 patterns, tried in order ----

    fn property_patterns(
        &self,
        s: &IRI,
        p: &IRI,
        o: &IRI,
        depth: usize,
        memo: &mut HashSet<String>,
    ) -> Vec<Block> {
        if depth > self.max_depth {
            return Vec::new();
        }
        let key = format!("prop:{s}|{p}|{o}");
        if !memo.insert(key.clone()) {
            return Vec::new();
        }

        let mut blocks = Vec::new();

        // 1. Direct assertion.
        let direct = Axiom::PropertyAssertion {
            subject: s.clone(),
            property: p.clone(),
            object: o.clone(),
        };
        if self.ontology.has_axiom(&direct) {
            blocks.push(vec![self.render_axiom(&direct)]);
        }

        // 2. Inverse.
        for axiom in self.ontology.axioms() {
            if let Axiom::InverseObjectProperties { property, inverse } = axiom {
                let q = if property == p {
                    Some(inverse)
                } else if inverse == p {
                    Some(property)
                } else {
                    None
                };
                if let Some(q) = q {
                    let witness = Axiom::PropertyAssertion {
                        subject: o.clone(),
                        property: q.clone(),
                        object: s.clone(),
                    };
                    if self.ontology.has_axiom(&witness) {
                        blocks.push(vec![self.render_axiom(axiom), self.render_axiom(&witness)]);
                    }
                }
            }
        }

        // 3. Symmetry.
        let symmetric = Axiom::SymmetricObjectProperty { property: p.clone() };
        if self.ontology.has_axiom(&symmetric) {
            let witness = Axiom::PropertyAssertion {
                subject: o.clone(),
                property: p.clone(),
                object: s.clone(),
            };
            if self.ontology.has_axiom(&witness) {
                blocks.push(vec![self.render_axiom(&symmetric), self.render_axiom(&witness)]);
            }
        }

        // 4. Sub-property.
        for axiom in self.ontology.axioms() {
            if let Axiom::PropertyAssertion { subject, property: q, object } = axiom {
                if subject == s && object == o && q != p {
                    if let Some(path) = subproperty_path(self.ontology, q, p) {
                        let mut lines = vec![self.render_axiom(axiom)];
                        lines.extend(path.iter().map(|a| self.render_axiom(a)));
                        blocks.push(lines);
                    }
                }
            }
        }

        // 5. Transitivity.
        let transitive = Axiom::TransitiveObjectProperty { property: p.clone() };
        if self.ontology.has_axiom(&transitive) {
            let firsts = self.reasoner.property_values(s, p);
            for m in &firsts {
                if m == s || m == o {
                    continue;
                }
                if self.reasoner.property_values(m, p).contains(o) {
                    let left = self.property_patterns(s, p, m, depth + 1, memo);
                    let right = self.property_patterns(m, p, o, depth + 1, memo);
                    if !left.is_empty() && !right.is_empty() {
                        let mut lines = vec![self.render_axiom(&transitive)];
                        lines.extend(left.into_iter().flatten());
                        lines.extend(right.into_iter().flatten());
                        blocks.push(lines);
                        break;
                    }
                }
            }
        }

        // 6. Property chain.
        for axiom in self.ontology.axioms() {
            if let Axiom::SubPropertyChainOf { chain, super_property } = axiom {
                if super_property == p {
                    if let Some(witnesses) = chain_witnesses(self.ontology, s, chain, o) {
                        let mut lines = vec![self.render_axiom(axiom)];
                        lines.extend(witnesses.iter().map(|a| self.render_axiom(a)));
                        blocks.push(lines);
                    }
                }
            }
        }

        // 7. Equivalent property.
        for axiom in self.ontology.axioms() {
            if let Axiom::EquivalentObjectProperties { properties } = axiom {
                if properties.contains(p) {
                    for q in properties.iter().filter(|q| *q != p) {
                        let witness = Axiom::PropertyAssertion {
                            subject: s.clone(),
                            property: q.clone(),
                            object: o.clone(),
                        };
                        if self.ontology.has_axiom(&witness) {
                            blocks.push(vec![self.render_axiom(axiom), self.render_axiom(&witness)]);
                        }
                    }
                }
            }
        }

        blocks
    }

    // ---- type goal: 5 patterns, tried in order ----

    fn type_patterns(
        &self,
        ind: &IRI,
        cls: &IRI,
        depth: usize,
        memo: &mut HashSet<String>,
    ) -> Vec<Block> {
        if depth > self.max_depth {
            return Vec::new();
        }
        let key = format!("type:{ind}|{cls}");
        if !memo.insert(key.clone()) {
            return Vec::new();
        }

        let mut blocks = Vec::new();

        // 1. Direct assertion.
        let direct = Axiom::ClassAssertion {
            individual: ind.clone(),
            class: cls.clone(),
        };
        if self.ontology.has_axiom(&direct) {
            blocks.push(vec![self.render_axiom(&direct)]);
        }

        // 2. Subsumption lift.
        for axiom in self.ontology.axioms() {
            if let Axiom::ClassAssertion { individual, class: d } = axiom {
                if individual == ind && d != cls {
                    if let Some(path) = subclass_path(self.ontology, d, cls) {
                        let mut lines = vec![self.render_axiom(axiom)];
                        lines.extend(path.iter().map(|a| self.render_axiom(a)));
                        blocks.push(lines);
                    }
                }
            }
        }

        // 3. Equivalent class.
        for axiom in self.ontology.axioms() {
            if let Axiom::EquivalentClasses { classes } = axiom {
                if classes.contains(cls) {
                    for e in classes.iter().filter(|e| *e != cls) {
                        let sub = self.type_patterns(ind, e, depth + 1, memo);
                        if !sub.is_empty() {
                            let mut lines = vec![self.render_axiom(axiom)];
                            lines.extend(sub.into_iter().flatten());
                            blocks.push(lines);
                        }
                    }
                }
            }
        }

        // 4. Domain inference.
        for axiom in self.ontology.axioms() {
            if let Axiom::ObjectPropertyDomain { property, class } = axiom {
                if class == cls {
                    if let Some(witness) = self
                        .ontology
                        .axioms()
                        .iter()
                        .find(|a| matches!(a, Axiom::PropertyAssertion { subject, property: q, .. } if subject == ind && q == property))
                    {
                        blocks.push(vec![self.render_axiom(axiom), self.render_axiom(witness)]);
                    }
                }
            }
        }

        // 5. Range inference.
        for axiom in self.ontology.axioms() {
            if let Axiom::ObjectPropertyRange { property, class } = axiom {
                if class == cls {
                    if let Some(witness) = self.ontology.axioms().iter().find(
                        |a| matches!(a, Axiom::PropertyAssertion { object, property: q, .. } if object == ind && q == property),
                    ) {
                        blocks.push(vec![self.render_axiom(axiom), self.render_axiom(witness)]);
                    }
                }
            }
        }

        blocks
    }

    // ---- sub-class goal: 3 patterns, tried in order ----

    fn subclass_patterns(
        &self,
        sub: &IRI,
        sup: &IRI,
        depth: usize,
        memo: &mut HashSet<String>,
    ) -> Vec<Block> {
        if depth > self.max_depth {
            return Vec::new();
        }
        let key = format!("subclass:{sub}|{sup}");
        if !memo.insert(key.clone()) {
            return Vec::new();
        }

        let mut blocks = Vec::new();

        // 1. Direct assertion.
        let direct = Axiom::SubClassOf {
            sub_class: sub.clone(),
            super_class: sup.clone(),
        };
        if self.ontology.has_axiom(&direct) {
            blocks.push(vec![self.render_axiom(&direct)]);
        }

        // 2. Equivalence lift, sub side.
        for axiom in self.ontology.axioms() {
            if let Axiom::EquivalentClasses { classes } = axiom {
                if classes.contains(sub) {
                    for e in classes.iter().filter(|e| *e != sub) {
                        if let Some(path) = subclass_path(self.ontology, e, sup) {
                            let mut lines = vec![self.render_axiom(axiom)];
                            lines.extend(path.iter().map(|a| self.render_axiom(a)));
                            blocks.push(lines);
                        }
                    }
                }
            }
        }

        // 2b. Equivalence lift, sup side.
        for axiom in self.ontology.axioms() {
            if let Axiom::EquivalentClasses { classes } = axiom {
                if classes.contains(sup) {
                    for e in classes.iter().filter(|e| *e != sup) {
                        if let Some(path) = subclass_path(self.ontology, sub, e) {
                            let mut lines = vec![self.render_axiom(axiom)];
                            lines.extend(path.iter().map(|a| self.render_axiom(a)));
                            blocks.push(lines);
                        }
                    }
                }
            }
        }

        // 3. Transitive chain.
        if let Some(path) = subclass_path(self.ontology, sub, sup) {
            if path.len() > 1 {
                blocks.push(path.iter().map(|a| self.render_axiom(a)).collect());
            }
        }

        blocks
    }
}

fn render_blocks(blocks: Vec<Block>) -> String {
    blocks
        .into_iter()
        .filter(|b| !b.is_empty())
        .map(|b| b.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// BFS over asserted `rdfs:subClassOf` edges from `from` to `to`, returning
/// the path of axioms traversed, or `None` if unreachable.
fn subclass_path(ontology: &Ontology, from: &IRI, to: &IRI) -> Option<Vec<Axiom>> {
    bfs_path(ontology, from, to, |axiom| match axiom {
        Axiom::SubClassOf { sub_class, super_class } => Some((sub_class.clone(), super_class.clone())),
        _ => None,
    })
}

/// BFS over asserted `rdfs:subPropertyOf` edges.
fn subproperty_path(ontology: &Ontology, from: &IRI, to: &IRI) -> Option<Vec<Axiom>> {
    bfs_path(ontology, from, to, |axiom| match axiom {
        Axiom::SubObjectPropertyOf { sub_property, super_property } => {
            Some((sub_property.clone(), super_property.clone()))
        }
        _ => None,
    })
}

fn bfs_path(
    ontology: &Ontology,
    from: &IRI,
    to: &IRI,
    edge_of: impl Fn(&Axiom) -> Option<(IRI, IRI)>,
) -> Option<Vec<Axiom>> {
    use std::collections::{HashMap, VecDeque};

    if from == to {
        return Some(Vec::new());
    }

    let mut adjacency: HashMap<IRI, Vec<(IRI, Axiom)>> = HashMap::new();
    for axiom in ontology.axioms() {
        if let Some((from_node, to_node)) = edge_of(axiom) {
            adjacency
                .entry(from_node)
                .or_default()
                .push((to_node, axiom.clone()));
        }
    }

    let mut visited: HashSet<IRI> = [from.clone()].into_iter().collect();
    let mut queue: VecDeque<IRI> = [from.clone()].into_iter().collect();
    let mut predecessor: HashMap<IRI, (IRI, Axiom)> = HashMap::new();

    while let Some(node) = queue.pop_front() {
        if let Some(edges) = adjacency.get(&node) {
            for (next, axiom) in edges {
                if visited.insert(next.clone()) {
                    predecessor.insert(next.clone(), (node.clone(), axiom.clone()));
                    if next == to {
                        let mut path = Vec::new();
                        let mut cursor = next.clone();
                        while let Some((prev, axiom)) = predecessor.get(&cursor) {
                            path.push(axiom.clone());
                            cursor = prev.clone();
                        }
                        path.reverse();
                        return Some(path);
                    }
                    queue.push_back(next.clone());
                }
            }
        }
    }
    None
}

/// Walks an asserted-only property chain from `start`, returning the
/// specific `PropertyAssertion` axioms used if `end` is reachable by
/// following one hop per chain element.
fn chain_witnesses(ontology: &Ontology, start: &IRI, chain: &[IRI], end: &IRI) -> Option<Vec<Axiom>> {
    let mut frontier: Vec<(IRI, Vec<Axiom>)> = vec![(start.clone(), Vec::new())];
    for property in chain {
        let mut next = Vec::new();
        for (node, path) in &frontier {
            for axiom in ontology.axioms() {
                if let Axiom::PropertyAssertion { subject, property: p, object } = axiom {
                    if subject == node && p == property {
                        let mut extended = path.clone();
                        extended.push(axiom.clone());
                        next.push((object.clone(), extended));
                    }
                }
            }
        }
        if next.is_empty() {
            return None;
        }
        frontier = next;
    }
    frontier
        .into_iter()
        .find(|(node, _)| node == end)
        .map(|(_, path)| path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::Ontology;

    fn iri(s: &str) -> IRI {
        IRI::new(s).unwrap()
    }

    #[test]
    fn direct_assertion_explanation() {
        let mut ontology = Ontology::new();
        ontology.add_axiom(Axiom::ClassAssertion {
            individual: iri("http://ex/john"),
            class: iri("http://ex/Person"),
        });
        let reasoner = ReasonerAdapter::prepare(&ontology);
        let resolver = EntityResolver::for_ontology(&ontology);
        let service = ExplanationService::new(&ontology, &reasoner, &resolver);

        let text = service.explain_type_inference(&iri("http://ex/john"), &iri("http://ex/Person"));
        assert_eq!(text, "<http://ex/john> rdf:type <http://ex/Person>");
        assert_eq!(ExplanationService::explanation_size(&text), 1);
    }

    #[test]
    fn subsumption_lift_explanation() {
        let mut ontology = Ontology::new();
        ontology.add_axiom(Axiom::SubClassOf {
            sub_class: iri("http://ex/Student"),
            super_class: iri("http://ex/Person"),
        });
        ontology.add_axiom(Axiom::ClassAssertion {
            individual: iri("http://ex/john"),
            class: iri("http://ex/Student"),
        });
        let reasoner = ReasonerAdapter::prepare(&ontology);
        let resolver = EntityResolver::for_ontology(&ontology);
        let service = ExplanationService::new(&ontology, &reasoner, &resolver);

        let text = service.explain_type_inference(&iri("http://ex/john"), &iri("http://ex/Person"));
        assert!(text.contains("rdf:type <http://ex/Student>"));
        assert!(text.contains("rdfs:subClassOf <http://ex/Person>"));
    }

    #[test]
    fn no_explanation_is_empty() {
        let ontology = Ontology::new();
        let reasoner = ReasonerAdapter::prepare(&ontology);
        let resolver = EntityResolver::for_ontology(&ontology);
        let service = ExplanationService::new(&ontology, &reasoner, &resolver);

        let text = service.explain_type_inference(&iri("http://ex/john"), &iri("http://ex/Person"));
        assert_eq!(text, "");
        assert_eq!(ExplanationService::explanation_size(&text), 0);
    }

    #[test]
    fn domain_inference_explanation() {
        let mut ontology = Ontology::new();
        ontology.add_axiom(Axiom::ObjectPropertyDomain {
            property: iri("http://ex/hasAdvisor"),
            class: iri("http://ex/Student"),
        });
        ontology.add_axiom(Axiom::PropertyAssertion {
            subject: iri("http://ex/john"),
            property: iri("http://ex/hasAdvisor"),
            object: iri("http://ex/mary"),
        });
        let reasoner = ReasonerAdapter::prepare(&ontology);
        let resolver = EntityResolver::for_ontology(&ontology);
        let service = ExplanationService::new(&ontology, &reasoner, &resolver);

        let text = service.explain_type_inference(&iri("http://ex/john"), &iri("http://ex/Student"));
        assert!(text.contains("domain(<http://ex/hasAdvisor>)"));
    }
}
