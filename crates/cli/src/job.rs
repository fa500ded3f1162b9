//! Job file: the CLI-side config wrapping the engine config with input
//! file paths, resolved relative to the job file's directory.

use std::path::Path;

use serde::Deserialize;

use kindred_engine::feed::parse_relationship_feed;
use kindred_engine::roster::{load_roster, RosterColumns};
use kindred_engine::{EngineConfig, EngineError, FamilyInput};

#[derive(Debug, Deserialize)]
pub struct HouseholdJob {
    /// Roster CSV path.
    pub roster: String,
    /// Relationship feed JSON path (bare array or paginated envelope).
    #[serde(default)]
    pub relationships: Option<String>,
    #[serde(default)]
    pub columns: RosterColumns,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl HouseholdJob {
    pub fn from_toml(input: &str) -> Result<Self, EngineError> {
        let job: HouseholdJob =
            toml::from_str(input).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        job.engine.validate()?;
        Ok(job)
    }

    /// Load roster and relationship data, paths relative to `base_dir`.
    pub fn load_input(&self, base_dir: &Path) -> Result<FamilyInput, EngineError> {
        let roster_path = base_dir.join(&self.roster);
        let csv_data = std::fs::read_to_string(&roster_path)
            .map_err(|e| EngineError::Io(format!("cannot read {}: {e}", roster_path.display())))?;
        let persons = load_roster(&csv_data, &self.columns)?;

        let relationships = match &self.relationships {
            Some(feed_file) => {
                let feed_path = base_dir.join(feed_file);
                let feed_json = std::fs::read_to_string(&feed_path).map_err(|e| {
                    EngineError::Io(format!("cannot read {}: {e}", feed_path.display()))
                })?;
                parse_relationship_feed(&feed_json)?
            }
            None => Vec::new(),
        };

        Ok(FamilyInput { persons, relationships })
    }
}
