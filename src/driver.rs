//! Per-run driver (C8): iterates a directory of ontology files, loading and
//! reasoning over exactly one at a time (inter-ontology is strictly
//! sequential per §5), while the enumerator parallelises within each file.

use crate::constants::{
    DEFAULT_LOG_EVERY_N_FILES, DEFAULT_MAX_EXPLANATIONS, DEFAULT_MAX_RECURSION_DEPTH,
    DEFAULT_ONTOLOGY_TIMEOUT_SECS,
};
use crate::enumerator::Enumerator;
use crate::error::{OwlError, OwlResult};
use crate::ontology::Ontology;
use crate::parser::{OntologyParser, TurtleParser};
use crate::reasoning::ReasonerAdapter;
use crate::register::GlobalRegister;
use crate::resolver::EntityResolver;
use crate::sink::OutputSink;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Run-wide configuration: CLI args plus the tunables §4.9 names as
/// defaults. No external config-file format, mirroring the teacher's
/// `ParserConfig`/`ReasoningConfig` pattern of plain `Default`-implementing
/// structs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub ontologies_dir: PathBuf,
    pub output_dir: PathBuf,
    pub log_every_n_files: usize,
    pub ontology_timeout: Duration,
    pub max_explanations: usize,
    pub max_recursion_depth: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ontologies_dir: PathBuf::from("./ontologies"),
            output_dir: PathBuf::from("./output"),
            log_every_n_files: DEFAULT_LOG_EVERY_N_FILES,
            ontology_timeout: Duration::from_secs(DEFAULT_ONTOLOGY_TIMEOUT_SECS),
            max_explanations: DEFAULT_MAX_EXPLANATIONS,
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }
}

/// What happened over the whole run: how many ontology files were
/// processed versus failed, and the final size of the global register.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
    pub triple_count: usize,
    pub query_count: usize,
}

/// Runs the whole pipeline: discovers `.ttl`/`.nt` files under
/// `config.ontologies_dir`, sorted by filename for deterministic iteration
/// order, and processes them one at a time against the shared sink and
/// register. A per-ontology failure is logged and does not abort the run;
/// an I/O failure opening the output sink does.
pub fn run(config: &RunConfig) -> OwlResult<RunSummary> {
    // Best-effort: size the shared rayon pool to the available cores. Ignored
    // if a pool is already installed (e.g. a second `run()` in the same
    // process, as the test suite does).
    let _ = rayon::ThreadPoolBuilder::new()
        .num_threads(num_cpus::get())
        .build_global();

    let register = Arc::new(GlobalRegister::new());
    let sink = Arc::new(OutputSink::create(&config.output_dir)?);
    let parser = TurtleParser::new();

    let mut files: Vec<PathBuf> = std::fs::read_dir(&config.ontologies_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("ttl") || ext.eq_ignore_ascii_case("nt"))
        })
        .collect();
    files.sort();

    let mut summary = RunSummary::default();

    for (index, path) in files.iter().enumerate() {
        let root_entity = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        match process_ontology(&parser, path, &root_entity, &register, &sink, config) {
            Ok(()) => {
                summary.processed += 1;
                log::info!("processed ontology {root_entity}");
            }
            Err(err) => {
                summary.failed += 1;
                log::warn!("ontology {root_entity} failed, continuing with next file: {err}");
            }
        }

        if (index + 1) % config.log_every_n_files.max(1) == 0 {
            log::info!(
                "register: {} triples, {} queries seen so far",
                register.triple_count(),
                register.query_count()
            );
        }
    }

    sink.close()?;

    summary.triple_count = register.triple_count();
    summary.query_count = register.query_count();
    log::info!(
        "run complete: {} processed, {} failed, register holds {} triples and {} queries",
        summary.processed,
        summary.failed,
        summary.triple_count,
        summary.query_count
    );

    Ok(summary)
}

/// Loads, reasons over, and enumerates one ontology file. Any failure here
/// is a §7 `per-ontology-fatal` error: it aborts processing of this file
/// only, never the run.
fn process_ontology(
    parser: &TurtleParser,
    path: &PathBuf,
    root_entity: &str,
    register: &Arc<GlobalRegister>,
    sink: &Arc<OutputSink>,
    config: &RunConfig,
) -> OwlResult<()> {
    let ontology: Ontology = parser.parse_file(path).map_err(|err| OwlError::PerOntologyFatal {
        ontology: root_entity.to_string(),
        message: err.to_string(),
    })?;

    let reasoner = ReasonerAdapter::prepare(&ontology);
    if !reasoner.is_consistent() {
        log::warn!(
            "ontology {root_entity} is inconsistent; unsatisfiable classes: {:?}",
            reasoner.unsatisfiable_classes()
        );
    }

    let resolver = EntityResolver::for_ontology(&ontology);
    let tbox_size = ontology.tbox_size();
    let abox_size = ontology.abox_size();
    sink.set_ontology_context(root_entity.to_string(), tbox_size, abox_size);
    log::debug!("{root_entity}: tbox={tbox_size} abox={abox_size}");

    let deadline = Instant::now() + config.ontology_timeout;
    let enumerator = Enumerator::new(
        &ontology,
        &reasoner,
        &resolver,
        register,
        sink,
        config.max_explanations,
        config.max_recursion_depth,
        deadline,
    );
    enumerator.enumerate_property_assertions()?;
    enumerator.enumerate_membership()?;
    enumerator.enumerate_subsumption()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_ontology(dir: &Path, name: &str, content: &str) {
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    use std::path::Path;

    #[test]
    fn processes_directory_and_writes_outputs() {
        let ontologies_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();

        write_ontology(
            ontologies_dir.path(),
            "family.ttl",
            r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix ex: <http://example.org/family#> .

ex:Student rdfs:subClassOf ex:Person .
ex:Person rdfs:subClassOf ex:Animal .
"#,
        );

        let config = RunConfig {
            ontologies_dir: ontologies_dir.path().to_path_buf(),
            output_dir: output_dir.path().to_path_buf(),
            ..RunConfig::default()
        };

        let summary = run(&config).unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.failed, 0);
        assert!(summary.triple_count > 0);

        let csv_content = std::fs::read_to_string(output_dir.path().join("csv_summary.csv")).unwrap();
        assert!(csv_content.contains("family"));
    }

    #[test]
    fn per_ontology_failure_does_not_abort_run() {
        let ontologies_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();

        write_ontology(ontologies_dir.path(), "broken.ttl", "this is not turtle");
        write_ontology(
            ontologies_dir.path(),
            "ok.ttl",
            r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix ex: <http://example.org/ok#> .

ex:Thing1 a owl:Class .
"#,
        );

        let config = RunConfig {
            ontologies_dir: ontologies_dir.path().to_path_buf(),
            output_dir: output_dir.path().to_path_buf(),
            ..RunConfig::default()
        };

        let summary = run(&config).unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.failed, 1);
    }
}
