//! Line-oriented Turtle parser.
//!
//! One physical line is one RDF statement (after stripping a trailing `.`
//! and comments) — predicate lists spread across `;`-continuations are not
//! supported, matching the rest of this loader's "enough to drive the
//! enumerator end to end" scope rather than a full Turtle grammar.

use crate::axioms::Axiom;
use crate::entities::*;
use crate::error::{OwlError, OwlResult};
use crate::iri::IRI;
use crate::ontology::Ontology;
use crate::parser::{common::ParserConfig, OntologyParser};
use std::collections::HashMap;
use std::path::Path;

const OWL: &str = "http://www.w3.org/2002/07/owl#";
const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";

pub struct TurtleParser {
    config: ParserConfig,
}

impl TurtleParser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    fn parse_content(&self, content: &str) -> OwlResult<Ontology> {
        if self.config.strict_validation && content.trim().is_empty() {
            return Err(OwlError::ParseError(
                "ontology contains no statements".to_string(),
            ));
        }

        let mut ontology = Ontology::new();
        let mut prefixes: HashMap<String, String> = self.config.prefixes.clone();
        prefixes
            .entry("owl".to_string())
            .or_insert_with(|| OWL.to_string());
        prefixes
            .entry("rdf".to_string())
            .or_insert_with(|| RDF.to_string());
        prefixes
            .entry("rdfs".to_string())
            .or_insert_with(|| RDFS.to_string());
        prefixes
            .entry("xsd".to_string())
            .or_insert_with(|| "http://www.w3.org/2001/XMLSchema#".to_string());

        for (line_num, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with("@prefix") || line.starts_with("PREFIX") {
                let (prefix, namespace) = parse_prefix_declaration(line)?;
                prefixes.insert(prefix, namespace);
                continue;
            }

            let stmt = line.split('#').next().unwrap_or("").trim_end();
            if stmt.is_empty() {
                continue;
            }

            if self.config.strict_validation
                && !(stmt.ends_with('.') || stmt.ends_with(';') || stmt.ends_with(','))
            {
                return Err(OwlError::ParseError(format!(
                    "line {}: expected statement to end with '.'",
                    line_num + 1
                )));
            }

            match parse_statement(stmt, &prefixes) {
                Ok(Some((subject, predicate, object))) => {
                    process_triple(&mut ontology, &subject, &predicate, object)?;
                }
                Ok(None) => continue,
                Err(e) if self.config.strict_validation => {
                    return Err(OwlError::ParseError(format!("line {}: {}", line_num + 1, e)))
                }
                Err(_) => continue,
            }
        }

        if self.config.strict_validation {
            validate_ontology(&ontology)?;
        }

        Ok(ontology)
    }
}

impl Default for TurtleParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OntologyParser for TurtleParser {
    fn parse_str(&self, content: &str) -> OwlResult<Ontology> {
        self.parse_content(content)
    }

    fn parse_file(&self, path: &Path) -> OwlResult<Ontology> {
        use std::fs;
        use std::io::Read;

        if self.config.max_file_size > 0 {
            let metadata = fs::metadata(path)?;
            if metadata.len() > self.config.max_file_size as u64 {
                return Err(OwlError::ParseError(format!(
                    "file exceeds maximum size of {} bytes",
                    self.config.max_file_size
                )));
            }
        }

        let mut file = fs::File::open(path)?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        self.parse_str(&content)
    }

    fn format_name(&self) -> &'static str {
        "Turtle"
    }
}

fn parse_prefix_declaration(line: &str) -> OwlResult<(String, String)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(OwlError::ParseError("malformed @prefix".to_string()));
    }
    let prefix_token = parts[1];
    let ns_token = parts[2];

    if !prefix_token.ends_with(':') {
        return Err(OwlError::ParseError(
            "@prefix token must end with ':'".to_string(),
        ));
    }
    if !(ns_token.starts_with('<') && ns_token.ends_with('>')) {
        return Err(OwlError::ParseError(
            "@prefix namespace must be enclosed in <>".to_string(),
        ));
    }

    let prefix = prefix_token.trim_end_matches(':').to_string();
    let namespace = ns_token[1..ns_token.len() - 1].to_string();
    Ok((prefix, namespace))
}

/// A parsed RDF object: a resource, a literal, or an ordered `( ... )`
/// collection (used only for `owl:propertyChainAxiom`).
enum ObjectValue {
    Iri(IRI),
    Literal(Literal),
    Collection(Vec<IRI>),
}

/// Split a statement into whitespace-delimited tokens, keeping quoted
/// literals and parenthesised collections intact as single tokens.
fn tokenize(stmt: &str) -> Vec<String> {
    let stmt = stmt.trim_end_matches(['.', ';', ',']);
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut paren_depth = 0usize;

    for c in stmt.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            '(' if !in_quotes => {
                paren_depth += 1;
                current.push(c);
            }
            ')' if !in_quotes => {
                paren_depth = paren_depth.saturating_sub(1);
                current.push(c);
                if paren_depth == 0 {
                    tokens.push(current.clone());
                    current.clear();
                }
            }
            c if c.is_whitespace() && !in_quotes && paren_depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn parse_curie_or_iri(token: &str, prefixes: &HashMap<String, String>) -> OwlResult<IRI> {
    if let Some(stripped) = token.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        return IRI::new(stripped);
    }
    if let Some(colon_pos) = token.find(':') {
        let prefix = &token[..colon_pos];
        let local = &token[colon_pos + 1..];
        if let Some(namespace) = prefixes.get(prefix) {
            return IRI::with_prefix(format!("{namespace}{local}"), prefix);
        }
        return Err(OwlError::UnknownPrefix(prefix.to_string()));
    }
    IRI::new(token)
}

fn parse_literal_token(token: &str, prefixes: &HashMap<String, String>) -> OwlResult<Literal> {
    if !token.starts_with('"') {
        return Err(OwlError::ParseError(format!("not a literal: {token}")));
    }
    let closing = token[1..]
        .find('"')
        .ok_or_else(|| OwlError::ParseError("unterminated literal".to_string()))?;
    let value = token[1..1 + closing].to_string();
    let rest = &token[2 + closing..];

    if let Some(lang) = rest.strip_prefix('@') {
        return Ok(Literal::lang_tagged(value, lang.to_string()));
    }
    if let Some(dt) = rest.strip_prefix("^^") {
        let dt_iri = parse_curie_or_iri(dt, prefixes)?;
        return Ok(Literal::typed(value, dt_iri));
    }
    Ok(Literal::simple(value))
}

fn parse_object(token: &str, prefixes: &HashMap<String, String>) -> OwlResult<ObjectValue> {
    if token.starts_with('"') {
        Ok(ObjectValue::Literal(parse_literal_token(token, prefixes)?))
    } else if let Some(inner) = token.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        let items = inner
            .split_whitespace()
            .map(|t| parse_curie_or_iri(t, prefixes))
            .collect::<OwlResult<Vec<_>>>()?;
        Ok(ObjectValue::Collection(items))
    } else {
        Ok(ObjectValue::Iri(parse_curie_or_iri(token, prefixes)?))
    }
}

fn parse_statement(
    stmt: &str,
    prefixes: &HashMap<String, String>,
) -> OwlResult<Option<(IRI, IRI, ObjectValue)>> {
    let tokens = tokenize(stmt);
    if tokens.len() < 3 {
        return Ok(None);
    }
    if tokens[0].starts_with("_:") || tokens[0].starts_with('[') {
        // Blank-node subjects are out of scope for this loader.
        return Ok(None);
    }

    let subject = parse_curie_or_iri(&tokens[0], prefixes)?;
    let predicate = if tokens[1] == "a" {
        IRI::new(format!("{RDF}type"))?
    } else {
        parse_curie_or_iri(&tokens[1], prefixes)?
    };
    let object = parse_object(&tokens[2], prefixes)?;
    Ok(Some((subject, predicate, object)))
}

fn process_triple(
    ontology: &mut Ontology,
    subject: &IRI,
    predicate: &IRI,
    object: ObjectValue,
) -> OwlResult<()> {
    match predicate.as_str() {
        p if p == format!("{RDF}type") => process_type(ontology, subject, object)?,
        p if p == format!("{RDFS}subClassOf") => {
            if let ObjectValue::Iri(super_class) = object {
                ontology.add_axiom(Axiom::SubClassOf {
                    sub_class: subject.clone(),
                    super_class,
                });
            }
        }
        p if p == format!("{OWL}equivalentClass") => {
            if let ObjectValue::Iri(other) = object {
                ontology.add_axiom(Axiom::EquivalentClasses {
                    classes: vec![subject.clone(), other],
                });
            }
        }
        p if p == format!("{RDFS}subPropertyOf") => {
            if let ObjectValue::Iri(super_property) = object {
                ontology.add_axiom(Axiom::SubObjectPropertyOf {
                    sub_property: subject.clone(),
                    super_property,
                });
            }
        }
        p if p == format!("{OWL}equivalentProperty") => {
            if let ObjectValue::Iri(other) = object {
                ontology.add_axiom(Axiom::EquivalentObjectProperties {
                    properties: vec![subject.clone(), other],
                });
            }
        }
        p if p == format!("{OWL}inverseOf") => {
            if let ObjectValue::Iri(inverse) = object {
                ontology.add_axiom(Axiom::InverseObjectProperties {
                    property: subject.clone(),
                    inverse,
                });
            }
        }
        p if p == format!("{RDFS}domain") => {
            if let ObjectValue::Iri(class) = object {
                ontology.add_axiom(Axiom::ObjectPropertyDomain {
                    property: subject.clone(),
                    class,
                });
            }
        }
        p if p == format!("{RDFS}range") => {
            if let ObjectValue::Iri(class) = object {
                ontology.add_axiom(Axiom::ObjectPropertyRange {
                    property: subject.clone(),
                    class,
                });
            }
        }
        p if p == format!("{OWL}propertyChainAxiom") => {
            if let ObjectValue::Collection(chain) = object {
                if !chain.is_empty() {
                    ontology.add_axiom(Axiom::SubPropertyChainOf {
                        chain,
                        super_property: subject.clone(),
                    });
                }
            }
        }
        p if p == format!("{OWL}imports") => {
            if let ObjectValue::Iri(target) = object {
                ontology.add_import(target);
            }
        }
        p if p == format!("{OWL}disjointWith") => {
            // Disjointness is outside the fourteen axiom kinds this loader
            // feeds into the enumerator; recorded nowhere.
            log::debug!("skipping owl:disjointWith triple for {subject}");
        }
        _ => process_assertion(ontology, subject, predicate, object)?,
    }
    Ok(())
}

fn process_type(ontology: &mut Ontology, subject: &IRI, object: ObjectValue) -> OwlResult<()> {
    let ObjectValue::Iri(type_iri) = object else {
        return Ok(());
    };

    match type_iri.as_str() {
        t if t == format!("{OWL}Ontology") => ontology.set_iri(subject.clone()),
        t if t == format!("{OWL}Class") => ontology.add_class(Class::new(subject.as_str())?),
        t if t == format!("{OWL}ObjectProperty") => {
            ontology.add_object_property(ObjectProperty::new(subject.as_str())?)
        }
        t if t == format!("{OWL}DatatypeProperty") => {
            ontology.add_data_property(DataProperty::new(subject.as_str())?)
        }
        t if t == format!("{OWL}NamedIndividual") => {
            ontology.add_named_individual(NamedIndividual::new(subject.as_str())?)
        }
        t if t == format!("{OWL}TransitiveProperty") => {
            let mut property = ObjectProperty::new(subject.as_str())?;
            property.add_characteristic(ObjectPropertyCharacteristic::Transitive);
            ontology.add_object_property(property);
            ontology.add_axiom(Axiom::TransitiveObjectProperty {
                property: subject.clone(),
            });
        }
        t if t == format!("{OWL}SymmetricProperty") => {
            let mut property = ObjectProperty::new(subject.as_str())?;
            property.add_characteristic(ObjectPropertyCharacteristic::Symmetric);
            ontology.add_object_property(property);
            ontology.add_axiom(Axiom::SymmetricObjectProperty {
                property: subject.clone(),
            });
        }
        t if t == format!("{OWL}FunctionalProperty") => {
            let mut property = ObjectProperty::new(subject.as_str())?;
            property.add_characteristic(ObjectPropertyCharacteristic::Functional);
            ontology.add_object_property(property);
            ontology.add_axiom(Axiom::FunctionalObjectProperty {
                property: subject.clone(),
            });
        }
        t if t == format!("{OWL}InverseFunctionalProperty") => {
            let mut property = ObjectProperty::new(subject.as_str())?;
            property.add_characteristic(ObjectPropertyCharacteristic::InverseFunctional);
            ontology.add_object_property(property);
        }
        _ => {
            // Anything else is treated as a class assertion: `subject` is a
            // named individual whose type is `type_iri`.
            ontology.add_named_individual(NamedIndividual::new(subject.as_str())?);
            ontology.add_class(Class::new(type_iri.as_str())?);
            ontology.add_axiom(Axiom::ClassAssertion {
                individual: subject.clone(),
                class: type_iri,
            });
        }
    }
    Ok(())
}

fn process_assertion(
    ontology: &mut Ontology,
    subject: &IRI,
    predicate: &IRI,
    object: ObjectValue,
) -> OwlResult<()> {
    match object {
        ObjectValue::Iri(object_iri) => {
            ontology.add_named_individual(NamedIndividual::new(subject.as_str())?);
            ontology.add_named_individual(NamedIndividual::new(object_iri.as_str())?);
            ontology.add_object_property(ObjectProperty::new(predicate.as_str())?);
            ontology.add_axiom(Axiom::PropertyAssertion {
                subject: subject.clone(),
                property: predicate.clone(),
                object: object_iri,
            });
        }
        ObjectValue::Literal(value) => {
            ontology.add_named_individual(NamedIndividual::new(subject.as_str())?);
            ontology.add_data_property(DataProperty::new(predicate.as_str())?);
            ontology.add_axiom(Axiom::DataPropertyAssertion {
                subject: subject.clone(),
                property: predicate.clone(),
                value,
            });
        }
        ObjectValue::Collection(_) => {
            log::debug!("skipping collection-valued assertion for predicate {predicate}");
        }
    }
    Ok(())
}

fn validate_ontology(ontology: &Ontology) -> OwlResult<()> {
    if ontology.is_empty() && ontology.imports().is_empty() {
        return Err(OwlError::ParseError(
            "ontology contains no entities, axioms, or imports".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_declarations() {
        let content = r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix ex: <http://example.org/> .

ex:Person a owl:Class .
ex:Animal a owl:Class .
ex:hasParent a owl:ObjectProperty .
"#;
        let parser = TurtleParser::new();
        let ontology = parser.parse_str(content).unwrap();
        assert_eq!(ontology.classes().len(), 2);
        assert_eq!(ontology.object_properties().len(), 1);
    }

    #[test]
    fn subclass_and_domain_range() {
        let content = r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix ex: <http://example.org/> .

ex:Student rdfs:subClassOf ex:Person .
ex:hasAdvisor rdfs:domain ex:Student .
ex:hasAdvisor rdfs:range ex:Person .
"#;
        let parser = TurtleParser::new();
        let ontology = parser.parse_str(content).unwrap();
        assert_eq!(ontology.tbox_size(), 3);
    }

    #[test]
    fn property_chain_axiom() {
        let content = r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix ex: <http://example.org/> .

ex:hasGrandparent owl:propertyChainAxiom ( ex:hasParent ex:hasParent ) .
"#;
        let parser = TurtleParser::new();
        let ontology = parser.parse_str(content).unwrap();
        assert_eq!(ontology.tbox_size(), 1);
    }

    #[test]
    fn data_property_assertion() {
        let content = r#"
@prefix ex: <http://example.org/> .

ex:john ex:age "42" .
"#;
        let parser = TurtleParser::new();
        let ontology = parser.parse_str(content).unwrap();
        assert_eq!(ontology.abox_size(), 1);
    }

    #[test]
    fn imports_recorded_not_resolved() {
        let content = r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix ex: <http://example.org/> .

ex:MyOntology a owl:Ontology .
ex:MyOntology owl:imports <http://example.org/other-ontology> .
"#;
        let parser = TurtleParser::new();
        let ontology = parser.parse_str(content).unwrap();
        assert_eq!(ontology.imports().len(), 1);
    }

    #[test]
    fn empty_content_rejected() {
        let parser = TurtleParser::new();
        assert!(parser.parse_str("").is_err());
    }
}
