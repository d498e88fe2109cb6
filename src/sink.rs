//! Streaming output sink (C7): a CSV summary writer and a line-delimited
//! JSON explanations writer, both append-only and safe under the
//! concurrent calls the enumerator's `rayon` workers make.

use crate::error::OwlResult;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Which of the three relation families a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    PropertyAssertion,
    ClassMembership,
    ClassSubsumption,
}

impl Family {
    fn task_type(self) -> &'static str {
        match self {
            Family::PropertyAssertion => "object_property_assertion",
            Family::ClassMembership => "class_membership",
            Family::ClassSubsumption => "class_subsumption",
        }
    }
}

/// Separator used to join grouped multi-choice answers in the CSV `answer`
/// column. Not a valid substring of any rendered IRI display form or
/// explanation line, so it round-trips unambiguously.
const GROUPED_ANSWER_SEPARATOR: &str = " ; ";

#[derive(Debug, Clone, Default)]
struct OntologyContext {
    root_entity: String,
    tbox_size: usize,
    abox_size: usize,
}

#[derive(Serialize)]
struct JsonAnswer<'a> {
    answer: &'a str,
    explanation: &'a str,
    size: usize,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    task_type: &'a str,
    query: &'a str,
    root_entity: &'a str,
    tbox_size: usize,
    abox_size: usize,
    answers: Vec<JsonAnswer<'a>>,
}

/// Two append-only streams per run, each behind its own writer mutex, plus
/// the current ontology's root-entity label and TBox/ABox counts, which the
/// driver sets before running the enumerator over that ontology.
pub struct OutputSink {
    csv: Mutex<csv::Writer<File>>,
    json: Mutex<BufWriter<File>>,
    context: RwLock<OntologyContext>,
}

impl OutputSink {
    /// Opens `csv_summary.csv` and `explanations.jsonl` inside `output_dir`,
    /// creating the directory if necessary, and writes the CSV header.
    pub fn create(output_dir: &Path) -> OwlResult<Self> {
        std::fs::create_dir_all(output_dir)?;

        let csv_path = output_dir.join("csv_summary.csv");
        let mut csv_writer = csv::Writer::from_path(csv_path)?;
        csv_writer.write_record([
            "task_type",
            "query",
            "predicate",
            "answer",
            "explanation_size",
            "root_entity",
            "tbox_size",
            "abox_size",
        ])?;
        csv_writer.flush()?;

        let json_path = output_dir.join("explanations.jsonl");
        let json_file = File::create(json_path)?;

        Ok(Self {
            csv: Mutex::new(csv_writer),
            json: Mutex::new(BufWriter::new(json_file)),
            context: RwLock::new(OntologyContext::default()),
        })
    }

    /// Sets the root-entity label and TBox/ABox axiom counts attached to
    /// every record emitted until the next call. Called once per ontology,
    /// before the enumerator runs.
    pub fn set_ontology_context(&self, root_entity: String, tbox_size: usize, abox_size: usize) {
        *self.context.write() = OntologyContext {
            root_entity,
            tbox_size,
            abox_size,
        };
    }

    /// One CSV row plus one JSON record for a binary (`ASK`) result.
    ///
    /// An I/O failure writing either stream is fatal to the current run
    /// (§7): propagated to the caller rather than swallowed.
    pub fn write_binary(
        &self,
        family: Family,
        query: &str,
        predicate_display: &str,
        answer: bool,
        explanation: &str,
        size: usize,
    ) -> OwlResult<()> {
        let context = self.context.read().clone();
        let answer_str = if answer { "true" } else { "false" };

        self.write_csv_row(
            family.task_type(),
            query,
            predicate_display,
            answer_str,
            size,
            &context,
        )?;

        self.write_json_record(JsonRecord {
            task_type: family.task_type(),
            query,
            root_entity: &context.root_entity,
            tbox_size: context.tbox_size,
            abox_size: context.abox_size,
            answers: vec![JsonAnswer {
                answer: answer_str,
                explanation,
                size,
            }],
        })
    }

    /// One CSV row plus one JSON record for a single, non-grouped
    /// multi-choice answer. Exposed for interface completeness (§4.7 lists
    /// it alongside the grouped form); the bundled enumerator always groups
    /// multi-choice answers before emitting (§4.5).
    pub fn write_multi_choice(
        &self,
        family: Family,
        query: &str,
        predicate_display: &str,
        answer_short: &str,
        explanation: &str,
        size: usize,
    ) -> OwlResult<()> {
        let context = self.context.read().clone();

        self.write_csv_row(
            family.task_type(),
            query,
            predicate_display,
            answer_short,
            size,
            &context,
        )?;

        self.write_json_record(JsonRecord {
            task_type: family.task_type(),
            query,
            root_entity: &context.root_entity,
            tbox_size: context.tbox_size,
            abox_size: context.abox_size,
            answers: vec![JsonAnswer {
                answer: answer_short,
                explanation,
                size,
            }],
        })
    }

    /// One CSV row (answers joined by [`GROUPED_ANSWER_SEPARATOR`]) plus one
    /// JSON record with an N-element `answers` array, for a multi-choice
    /// query whose answers were collected across one enumeration pass.
    pub fn write_grouped_multi_choice(
        &self,
        family: Family,
        query: &str,
        predicate_display: &str,
        answers: &[(String, String, usize)],
    ) -> OwlResult<()> {
        let context = self.context.read().clone();

        let joined_answer = answers
            .iter()
            .map(|(a, _, _)| a.as_str())
            .collect::<Vec<_>>()
            .join(GROUPED_ANSWER_SEPARATOR);
        let total_size: usize = answers.iter().map(|(_, _, size)| size).sum();

        self.write_csv_row(
            family.task_type(),
            query,
            predicate_display,
            &joined_answer,
            total_size,
            &context,
        )?;

        self.write_json_record(JsonRecord {
            task_type: family.task_type(),
            query,
            root_entity: &context.root_entity,
            tbox_size: context.tbox_size,
            abox_size: context.abox_size,
            answers: answers
                .iter()
                .map(|(answer, explanation, size)| JsonAnswer {
                    answer,
                    explanation,
                    size: *size,
                })
                .collect(),
        })
    }

    fn write_csv_row(
        &self,
        task_type: &str,
        query: &str,
        predicate: &str,
        answer: &str,
        explanation_size: usize,
        context: &OntologyContext,
    ) -> OwlResult<()> {
        let mut writer = self.csv.lock();
        writer.write_record([
            task_type,
            query,
            predicate,
            answer,
            &explanation_size.to_string(),
            &context.root_entity,
            &context.tbox_size.to_string(),
            &context.abox_size.to_string(),
        ])?;
        Ok(())
    }

    fn write_json_record(&self, record: JsonRecord) -> OwlResult<()> {
        let line = serde_json::to_string(&record)?;
        let mut writer = self.json.lock();
        writeln!(writer, "{line}")?;
        Ok(())
    }

    /// Flushes both streams. Called once, after the driver has processed
    /// every ontology file.
    pub fn close(&self) -> OwlResult<()> {
        self.csv.lock().flush()?;
        self.json.lock().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufRead;

    #[test]
    fn binary_row_and_json_record() {
        let dir = tempfile::tempdir().unwrap();
        let sink = OutputSink::create(dir.path()).unwrap();
        sink.set_ontology_context("onto1".to_string(), 3, 5);
        sink.write_binary(
            Family::ClassMembership,
            "ASK WHERE { <http://ex/a> rdf:type <http://ex/B> }",
            "rdf:type",
            true,
            "Directly asserted",
            1,
        )
        .unwrap();
        sink.close().unwrap();

        let csv_content = std::fs::read_to_string(dir.path().join("csv_summary.csv")).unwrap();
        assert!(csv_content.contains("class_membership"));
        assert!(csv_content.contains("onto1"));
        assert!(csv_content.contains("true"));

        let json_content = std::fs::read_to_string(dir.path().join("explanations.jsonl")).unwrap();
        let line = json_content.lines().next().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(parsed["task_type"], "class_membership");
        assert_eq!(parsed["answers"][0]["size"], 1);
    }

    #[test]
    fn grouped_multi_choice_joins_answers() {
        let dir = tempfile::tempdir().unwrap();
        let sink = OutputSink::create(dir.path()).unwrap();
        sink.set_ontology_context("onto2".to_string(), 0, 0);
        sink.write_grouped_multi_choice(
            Family::PropertyAssertion,
            "SELECT ?object WHERE { <http://ex/a> <http://ex/p> ?object }",
            "p",
            &[
                ("<http://ex/b>".to_string(), "Directly asserted".to_string(), 1),
                ("<http://ex/c>".to_string(), "line1\nline2".to_string(), 2),
            ],
        )
        .unwrap();
        sink.close().unwrap();

        let csv_content = std::fs::read_to_string(dir.path().join("csv_summary.csv")).unwrap();
        assert!(csv_content.contains("<http://ex/b> ; <http://ex/c>"));

        let json_content = std::fs::read_to_string(dir.path().join("explanations.jsonl")).unwrap();
        let line = json_content.lines().next().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(parsed["answers"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn header_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let sink = OutputSink::create(dir.path()).unwrap();
        sink.close().unwrap();
        let mut lines = std::io::BufReader::new(File::open(dir.path().join("csv_summary.csv")).unwrap()).lines();
        let header = lines.next().unwrap().unwrap();
        assert_eq!(
            header,
            "task_type,query,predicate,answer,explanation_size,root_entity,tbox_size,abox_size"
        );
    }
}
