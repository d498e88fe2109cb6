//! CLI front-end: `owl-explain [ontologies-dir [output-dir]]`.

use anyhow::Context;
use clap::Parser;
use owl_explain::driver::{self, RunConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "owl-explain",
    about = "Enumerates reasoner-inferred triples for a directory of OWL ontologies, with proof-sketch explanations"
)]
struct Cli {
    /// Directory containing ontology files (.ttl / .nt), one ontology per file.
    #[arg(default_value = "./ontologies")]
    ontologies_dir: PathBuf,

    /// Directory the CSV summary and JSON explanations files are written to.
    #[arg(default_value = "./output")]
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if !cli.ontologies_dir.is_dir() {
        anyhow::bail!(
            "ontologies directory {} does not exist or is not a directory",
            cli.ontologies_dir.display()
        );
    }

    let config = RunConfig {
        ontologies_dir: cli.ontologies_dir,
        output_dir: cli.output_dir,
        ..RunConfig::default()
    };

    let summary = driver::run(&config).context("run failed")?;
    log::info!(
        "done: {} processed, {} failed, {} triples, {} queries in the register",
        summary.processed,
        summary.failed,
        summary.triple_count,
        summary.query_count
    );

    Ok(())
}
