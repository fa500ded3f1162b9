use crate::classify::classify_generations;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::layout::layout_tree;
use crate::model::{
    DisplayRole, FamilyInput, FamilyMember, FamilyRole, FamilyTreeResult, RunMeta,
};
use crate::role::resolve_all_roles;
use crate::summary::compute_summary;

/// Run the full pipeline over one household snapshot: validate, resolve
/// roles, classify generations, lay out the tree, summarize.
///
/// Display classification is driven entirely by explicit relationship
/// edges; the age heuristic (see [`crate::inference`]) only produces
/// suggestions for an editing flow and never feeds this path.
pub fn run(config: &EngineConfig, input: &FamilyInput) -> Result<FamilyTreeResult, EngineError> {
    validate_input(input)?;

    // Tag members from the edge-resolved roles so tabular and graphical
    // views agree on who counts as what.
    let mut members: Vec<FamilyMember> = input
        .persons
        .iter()
        .map(|p| FamilyMember { person: p.clone(), role: FamilyRole::Other })
        .collect();
    let roles = resolve_all_roles(&members, &input.relationships);
    for (member, row) in members.iter_mut().zip(&roles) {
        member.role = match row.role {
            DisplayRole::Parent => FamilyRole::Parent,
            DisplayRole::Child => FamilyRole::Child,
            DisplayRole::Spouse | DisplayRole::Other => FamilyRole::Other,
        };
    }

    let generations = classify_generations(&members, &input.relationships, &config.caps);
    let layout = layout_tree(&generations, &input.relationships, &config.layout);
    let summary = compute_summary(&members, &generations, &layout, &input.relationships, &roles);

    Ok(FamilyTreeResult {
        meta: RunMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            reference_date: config.reference_date,
        },
        roles,
        generations,
        layout,
        summary,
    })
}

/// Boundary precondition: every person carries a stable id. Records
/// failing this are rejected here, before any classification runs.
fn validate_input(input: &FamilyInput) -> Result<(), EngineError> {
    for (index, person) in input.persons.iter().enumerate() {
        if person.id.trim().is_empty() {
            return Err(EngineError::MissingPersonId { index });
        }
    }
    Ok(())
}
