//! `kin infer` — age heuristic only, for previewing suggestions.

use std::path::PathBuf;

use serde::Serialize;

use kindred_engine::inference::{infer_household, suggest_relationships};
use kindred_engine::model::{InferredHousehold, Relationship};

use crate::exit_codes::EXIT_RUNTIME;
use crate::tree::load_job;
use crate::CliError;

#[derive(Serialize)]
struct InferOutput {
    inferred: InferredHousehold,
    suggested: Vec<Relationship>,
}

pub fn cmd_infer(config_path: PathBuf) -> Result<(), CliError> {
    let (job, base_dir) = load_job(&config_path)?;
    let input = job.load_input(&base_dir).map_err(|e| CliError {
        code: EXIT_RUNTIME,
        message: e.to_string(),
        hint: None,
    })?;

    let today = job
        .engine
        .reference_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let inferred = infer_household(&input.persons, &job.engine.tolerance, today);
    let suggested = suggest_relationships(&inferred);

    eprintln!(
        "inferred {} parent(s), {} child(ren); {} suggested edge(s)",
        inferred.parents.len(),
        inferred.children.len(),
        suggested.len(),
    );

    let out = InferOutput { inferred, suggested };
    let json_str = serde_json::to_string_pretty(&out).map_err(|e| CliError {
        code: EXIT_RUNTIME,
        message: format!("JSON serialization error: {e}"),
        hint: None,
    })?;
    println!("{json_str}");

    Ok(())
}
