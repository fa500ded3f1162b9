//! `kin roles` — tabular member/role listing.

use std::path::PathBuf;

use kindred_engine::model::{FamilyMember, FamilyRole};
use kindred_engine::role::resolve_all_roles;

use crate::exit_codes::EXIT_RUNTIME;
use crate::tree::load_job;
use crate::CliError;

pub fn cmd_roles(config_path: PathBuf) -> Result<(), CliError> {
    let (job, base_dir) = load_job(&config_path)?;
    let input = job.load_input(&base_dir).map_err(|e| CliError {
        code: EXIT_RUNTIME,
        message: e.to_string(),
        hint: None,
    })?;

    let members: Vec<FamilyMember> = input
        .persons
        .iter()
        .map(|p| FamilyMember { person: p.clone(), role: FamilyRole::Other })
        .collect();
    let rows = resolve_all_roles(&members, &input.relationships);

    let id_width = rows.iter().map(|r| r.person_id.len()).max().unwrap_or(2).max(2);
    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(4).max(4);

    println!("{:id_width$}  {:name_width$}  {:8}  {}", "id", "name", "role", "category");
    for row in &rows {
        // to_string first: width specifiers don't reach the Display impls
        println!(
            "{:id_width$}  {:name_width$}  {:8}  {}",
            row.person_id,
            row.name,
            row.role.to_string(),
            row.category,
        );
    }

    Ok(())
}
