//! `kin tree` / `kin validate` — job-file-driven pipeline runs.

use std::path::{Path, PathBuf};

use crate::exit_codes::{EXIT_INVALID_CONFIG, EXIT_RUNTIME};
use crate::job::HouseholdJob;
use crate::CliError;

fn config_err(msg: impl Into<String>) -> CliError {
    CliError { code: EXIT_INVALID_CONFIG, message: msg.into(), hint: None }
}

fn runtime_err(msg: impl Into<String>) -> CliError {
    CliError { code: EXIT_RUNTIME, message: msg.into(), hint: None }
}

pub fn load_job(config_path: &Path) -> Result<(HouseholdJob, PathBuf), CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| runtime_err(format!("cannot read {}: {e}", config_path.display())))?;
    let job = HouseholdJob::from_toml(&config_str).map_err(|e| config_err(e.to_string()))?;
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
    Ok((job, base_dir))
}

pub fn cmd_tree(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let (job, base_dir) = load_job(&config_path)?;
    let input = job.load_input(&base_dir).map_err(|e| runtime_err(e.to_string()))?;

    let result =
        kindred_engine::run(&job.engine, &input).map_err(|e| runtime_err(e.to_string()))?;

    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| runtime_err(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| runtime_err(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "{}: {} members — {} placed ({} grandparents, {} parents, {} children), {} unplaced, {} of {} edges drawn",
        if result.meta.config_name.is_empty() { "household" } else { result.meta.config_name.as_str() },
        s.total_members,
        s.placed,
        s.grandparents,
        s.parents,
        s.children,
        s.unplaced,
        s.drawn_edges,
        s.active_edges,
    );

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let (_, _) = load_job(&config_path)?;
    eprintln!("{}: OK", config_path.display());
    Ok(())
}
