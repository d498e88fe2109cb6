//! Inference enumerator (C5): walks the reasoner's closure across the
//! three relation families, deduplicates against the global register, and
//! hands every first-seen result to the output sink.
//!
//! Intra-ontology parallelism follows the teacher's `rayon`-per-outer-loop
//! idiom: one `rayon` task per individual (property-assertion and
//! membership families) or per class (subsumption family), matching
//! §5's "data-parallel over the outer loop of each enumeration" scheduling
//! model. A per-ontology deadline is checked between tasks, not
//! pre-emptively, since the reasoner call itself is treated as atomic.

use crate::axioms::Axiom;
use crate::constants::{RDF_TYPE, RDFS_SUBCLASS_OF};
use crate::entities::{Class, NamedIndividual, ObjectProperty};
use crate::error::{OwlError, OwlResult};
use crate::explain::ExplanationService;
use crate::iri::IRI;
use crate::ontology::Ontology;
use crate::reasoning::ReasonerAdapter;
use crate::register::GlobalRegister;
use crate::resolver::EntityResolver;
use crate::sink::{Family, OutputSink};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

/// An answer accumulated for one multi-choice (`SELECT`) query: the display
/// form of the bound value, its rendered explanation, and the explanation's
/// size, in the order enumeration completed them.
type Answer = (String, String, usize);

/// Why a `rayon` task fan-out stopped early: either the per-ontology
/// deadline passed (not an error — just stop scheduling more work), or the
/// sink hit a genuine I/O failure, which must propagate and abort the run
/// per §7.
enum Stop {
    Deadline,
    Io(OwlError),
}

/// Runs one `try_for_each` fan-out, turning a deadline stop into `Ok(())`
/// and a sink I/O failure into the propagated error.
fn run_fanout<T: Sync>(
    items: &[T],
    task: impl Fn(&T) -> OwlResult<()> + Sync,
    past_deadline: impl Fn() -> bool + Sync,
) -> OwlResult<()> {
    let result = items.par_iter().try_for_each(|item| -> Result<(), Stop> {
        if past_deadline() {
            return Err(Stop::Deadline);
        }
        task(item).map_err(Stop::Io)
    });
    match result {
        Ok(()) | Err(Stop::Deadline) => Ok(()),
        Err(Stop::Io(err)) => Err(err),
    }
}

/// Walks one already-loaded, already-reasoned ontology across the three
/// relation families, writing every newly-admitted inference to `sink`.
pub struct Enumerator<'a> {
    ontology: &'a Ontology,
    reasoner: &'a ReasonerAdapter,
    resolver: &'a EntityResolver,
    register: &'a Arc<GlobalRegister>,
    sink: &'a Arc<OutputSink>,
    max_explanations: usize,
    max_depth: usize,
    deadline: Instant,
}

impl<'a> Enumerator<'a> {
    pub fn new(
        ontology: &'a Ontology,
        reasoner: &'a ReasonerAdapter,
        resolver: &'a EntityResolver,
        register: &'a Arc<GlobalRegister>,
        sink: &'a Arc<OutputSink>,
        max_explanations: usize,
        max_depth: usize,
        deadline: Instant,
    ) -> Self {
        Self {
            ontology,
            reasoner,
            resolver,
            register,
            sink,
            max_explanations,
            max_depth,
            deadline,
        }
    }

    fn explanation_service(&self) -> ExplanationService<'a> {
        ExplanationService::with_limits(
            self.ontology,
            self.reasoner,
            self.resolver,
            self.max_explanations,
            self.max_depth,
        )
    }

    fn past_deadline(&self) -> bool {
        Instant::now() > self.deadline
    }

    /// §4.5 "Property-assertion enumeration": every `(individual,
    /// object-property)` pair is one task; its candidate objects are
    /// `reasoner.propertyValues(s, p)`. Returns the first sink I/O error
    /// encountered, if any — fatal to the run per §7.
    pub fn enumerate_property_assertions(&self) -> OwlResult<()> {
        let individuals: Vec<&Arc<NamedIndividual>> = self.ontology.named_individuals().iter().collect();
        let properties: Vec<&Arc<ObjectProperty>> = self.ontology.object_properties().iter().collect();
        let tasks: Vec<(&Arc<NamedIndividual>, &Arc<ObjectProperty>)> = individuals
            .iter()
            .flat_map(|s| properties.iter().map(move |p| (*s, *p)))
            .collect();

        run_fanout(
            &tasks,
            |(s, p)| self.property_assertion_task(s.iri(), p.iri()),
            || self.past_deadline(),
        )
    }

    fn property_assertion_task(&self, s: &IRI, p: &IRI) -> OwlResult<()> {
        let explain = self.explanation_service();
        let values = self.reasoner.property_values(s, p);
        let predicate_full = self.resolver.full_iri(p);
        let predicate_display = self.resolver.display(p);

        let mut answers: Vec<Answer> = Vec::new();
        for o in &values {
            if o == s {
                continue;
            }
            let key = canonical_key(self.resolver, s, p, o);
            if !self.register.admit_triple(key) {
                continue;
            }

            let asserted = self.ontology.has_axiom(&Axiom::PropertyAssertion {
                subject: s.clone(),
                property: p.clone(),
                object: o.clone(),
            });
            let explanation = if asserted {
                "Directly asserted".to_string()
            } else {
                explain.explain_property_relationship(s, p, o)
            };
            let size = ExplanationService::explanation_size(&explanation);

            let ask = ask_query(&self.resolver.full_iri(s), &predicate_full, &self.resolver.full_iri(o));
            if self.register.admit_query(ask.clone()) {
                self.sink.write_binary(
                    Family::PropertyAssertion,
                    &ask,
                    &predicate_display,
                    true,
                    &explanation,
                    size,
                )?;
            }

            answers.push((self.resolver.full_iri(o), explanation, size));
        }

        if !answers.is_empty() {
            let select = select_query(&self.resolver.full_iri(s), &predicate_full, "?object");
            if self.register.admit_query(select.clone()) {
                self.sink
                    .write_grouped_multi_choice(Family::PropertyAssertion, &select, &predicate_display, &answers)?;
            }
        }

        Ok(())
    }

    /// §4.5 "Membership enumeration": one task per individual, excluding
    /// `owl:Thing`/`owl:Nothing` from the computed type set.
    pub fn enumerate_membership(&self) -> OwlResult<()> {
        let individuals: Vec<&Arc<NamedIndividual>> = self.ontology.named_individuals().iter().collect();

        run_fanout(
            &individuals,
            |ind| self.membership_task(ind.iri()),
            || self.past_deadline(),
        )
    }

    fn membership_task(&self, ind: &IRI) -> OwlResult<()> {
        let explain = self.explanation_service();
        let types = self.reasoner.types(ind, false);
        let rdf_type = IRI::new(RDF_TYPE).expect("rdf:type is a well-formed IRI");

        let mut answers: Vec<Answer> = Vec::new();
        for cls in &types {
            if is_thing_or_nothing(cls) {
                continue;
            }
            let key = canonical_key(self.resolver, ind, &rdf_type, cls);
            if !self.register.admit_triple(key) {
                continue;
            }

            let asserted = self.ontology.has_axiom(&Axiom::ClassAssertion {
                individual: ind.clone(),
                class: cls.clone(),
            });
            let explanation = if asserted {
                "Directly asserted".to_string()
            } else {
                explain.explain_type_inference(ind, cls)
            };
            let size = ExplanationService::explanation_size(&explanation);

            let ask = ask_query(&self.resolver.full_iri(ind), &self.resolver.full_iri(&rdf_type), &self.resolver.full_iri(cls));
            if self.register.admit_query(ask.clone()) {
                self.sink
                    .write_binary(Family::ClassMembership, &ask, "rdf:type", true, &explanation, size)?;
            }

            answers.push((self.resolver.full_iri(cls), explanation, size));
        }

        if !answers.is_empty() {
            let select = select_query(&self.resolver.full_iri(ind), &self.resolver.full_iri(&rdf_type), "?class");
            if self.register.admit_query(select.clone()) {
                self.sink
                    .write_grouped_multi_choice(Family::ClassMembership, &select, "rdf:type", &answers)?;
            }
        }

        Ok(())
    }

    /// §4.5 "Subsumption enumeration": one task per class, no multi-choice
    /// form.
    pub fn enumerate_subsumption(&self) -> OwlResult<()> {
        let classes: Vec<&Arc<Class>> = self.ontology.classes().iter().collect();

        run_fanout(
            &classes,
            |cls| {
                if is_thing_or_nothing(cls.iri()) {
                    Ok(())
                } else {
                    self.subsumption_task(cls.iri())
                }
            },
            || self.past_deadline(),
        )
    }

    fn subsumption_task(&self, a: &IRI) -> OwlResult<()> {
        let explain = self.explanation_service();
        let supers = self.reasoner.super_classes(a, false);
        let rdfs_subclass_of = IRI::new(RDFS_SUBCLASS_OF).expect("rdfs:subClassOf is a well-formed IRI");

        for b in &supers {
            if is_thing_or_nothing(b) {
                continue;
            }
            let key = canonical_key(self.resolver, a, &rdfs_subclass_of, b);
            if !self.register.admit_triple(key) {
                continue;
            }

            let asserted = self.ontology.has_axiom(&Axiom::SubClassOf {
                sub_class: a.clone(),
                super_class: b.clone(),
            });
            let explanation = if asserted {
                "Directly asserted".to_string()
            } else {
                explain.explain_class_relationship(a, b)
            };
            let size = ExplanationService::explanation_size(&explanation);

            let ask = ask_query(
                &self.resolver.full_iri(a),
                &self.resolver.full_iri(&rdfs_subclass_of),
                &self.resolver.full_iri(b),
            );
            if self.register.admit_query(ask.clone()) {
                self.sink.write_binary(
                    Family::ClassSubsumption,
                    &ask,
                    "rdfs:subClassOf",
                    true,
                    &explanation,
                    size,
                )?;
            }
        }

        Ok(())
    }
}

fn is_thing_or_nothing(iri: &IRI) -> bool {
    iri.as_str() == crate::constants::OWL_THING || iri.as_str() == crate::constants::OWL_NOTHING
}

/// The canonical triple key: `fullIRI(s) | fullIRI(p) | fullIRI(o)`.
fn canonical_key(resolver: &EntityResolver, s: &IRI, p: &IRI, o: &IRI) -> String {
    format!("{}|{}|{}", resolver.full_iri(s), resolver.full_iri(p), resolver.full_iri(o))
}

/// `ASK WHERE { <s> <p> <o> }`, single-space separated, no trailing
/// whitespace — the canonical binary query form from §6.
fn ask_query(s: &str, p: &str, o: &str) -> String {
    format!("ASK WHERE {{ {s} {p} {o} }}")
}

/// `SELECT ?var WHERE { <s> <p> ?var }`, the canonical multi-choice form.
fn select_query(s: &str, p: &str, var: &str) -> String {
    format!("SELECT {var} WHERE {{ {s} {p} {var} }}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::*;
    use crate::ontology::Ontology;
    use crate::sink::OutputSink;

    fn iri(s: &str) -> IRI {
        IRI::new(s).unwrap()
    }

    fn fresh_sink() -> (Arc<OutputSink>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(OutputSink::create(dir.path()).unwrap());
        (sink, dir)
    }

    #[test]
    fn transitive_property_scenario() {
        let mut ontology = Ontology::new();
        ontology.add_axiom(Axiom::TransitiveObjectProperty { property: iri("http://ex/p") });
        ontology.add_axiom(Axiom::PropertyAssertion {
            subject: iri("http://ex/a"),
            property: iri("http://ex/p"),
            object: iri("http://ex/b"),
        });
        ontology.add_axiom(Axiom::PropertyAssertion {
            subject: iri("http://ex/b"),
            property: iri("http://ex/p"),
            object: iri("http://ex/c"),
        });
        for name in ["a", "b", "c"] {
            ontology.add_named_individual(NamedIndividual::new(format!("http://ex/{name}")).unwrap());
        }
        ontology.add_object_property(ObjectProperty::new("http://ex/p").unwrap());

        let reasoner = ReasonerAdapter::prepare(&ontology);
        let resolver = EntityResolver::for_ontology(&ontology);
        let register = Arc::new(GlobalRegister::new());
        let (sink, _dir) = fresh_sink();
        sink.set_ontology_context("transitive".to_string(), ontology.tbox_size(), ontology.abox_size());

        let enumerator = Enumerator::new(
            &ontology,
            &reasoner,
            &resolver,
            &register,
            &sink,
            5,
            8,
            Instant::now() + std::time::Duration::from_secs(5),
        );
        enumerator.enumerate_property_assertions().unwrap();

        assert!(!register.admit_triple("<http://ex/a>|<http://ex/p>|<http://ex/c>".to_string()));
    }

    #[test]
    fn dedup_across_two_calls() {
        let mut ontology = Ontology::new();
        ontology.add_axiom(Axiom::PropertyAssertion {
            subject: iri("http://ex/a"),
            property: iri("http://ex/p"),
            object: iri("http://ex/b"),
        });
        ontology.add_named_individual(NamedIndividual::new("http://ex/a").unwrap());
        ontology.add_named_individual(NamedIndividual::new("http://ex/b").unwrap());
        ontology.add_object_property(ObjectProperty::new("http://ex/p").unwrap());

        let reasoner = ReasonerAdapter::prepare(&ontology);
        let resolver = EntityResolver::for_ontology(&ontology);
        let register = Arc::new(GlobalRegister::new());
        let (sink, _dir) = fresh_sink();
        sink.set_ontology_context("f1".to_string(), ontology.tbox_size(), ontology.abox_size());

        let deadline = Instant::now() + std::time::Duration::from_secs(5);
        let enumerator = Enumerator::new(&ontology, &reasoner, &resolver, &register, &sink, 5, 8, deadline);
        enumerator.enumerate_property_assertions().unwrap();
        let first_triple_count = register.triple_count();

        // Same ontology again, simulating a second file with identical triples.
        sink.set_ontology_context("f2".to_string(), ontology.tbox_size(), ontology.abox_size());
        let enumerator2 = Enumerator::new(&ontology, &reasoner, &resolver, &register, &sink, 5, 8, deadline);
        enumerator2.enumerate_property_assertions().unwrap();

        assert_eq!(register.triple_count(), first_triple_count);
    }
}
