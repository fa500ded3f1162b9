use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub name: String,
    /// Drives age computation; when absent the caller supplies the date.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    #[serde(default)]
    pub tolerance: AgeTolerance,
    #[serde(default)]
    pub caps: GenerationCaps,
    #[serde(default)]
    pub layout: LayoutMetrics,
}

// ---------------------------------------------------------------------------
// Tolerance
// ---------------------------------------------------------------------------

/// Age-gap thresholds for the inference heuristic.
///
/// `parent_age_gap` is the single authoritative "parent-worthy" age
/// difference; nothing else restates the number.
#[derive(Debug, Clone, Deserialize)]
pub struct AgeTolerance {
    #[serde(default = "default_parent_age_gap")]
    pub parent_age_gap: u32,
    /// Max age difference between co-parents.
    #[serde(default = "default_co_parent_age_gap")]
    pub co_parent_age_gap: u32,
}

fn default_parent_age_gap() -> u32 {
    15
}

fn default_co_parent_age_gap() -> u32 {
    5
}

impl Default for AgeTolerance {
    fn default() -> Self {
        Self {
            parent_age_gap: default_parent_age_gap(),
            co_parent_age_gap: default_co_parent_age_gap(),
        }
    }
}

// ---------------------------------------------------------------------------
// Generation caps
// ---------------------------------------------------------------------------

/// Bucket bounds. These keep layout tractable; they are not a domain rule.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationCaps {
    #[serde(default = "default_grandparent_cap")]
    pub grandparents: usize,
    #[serde(default = "default_parent_cap")]
    pub parents: usize,
    #[serde(default = "default_child_cap")]
    pub children: usize,
}

fn default_grandparent_cap() -> usize {
    4
}

fn default_parent_cap() -> usize {
    4
}

fn default_child_cap() -> usize {
    12
}

impl Default for GenerationCaps {
    fn default() -> Self {
        Self {
            grandparents: default_grandparent_cap(),
            parents: default_parent_cap(),
            children: default_child_cap(),
        }
    }
}

// ---------------------------------------------------------------------------
// Layout metrics
// ---------------------------------------------------------------------------

/// Fixed node footprint and spacing constants. Together with the member and
/// relationship sets these fully determine every coordinate.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutMetrics {
    #[serde(default = "default_node_width")]
    pub node_width: f64,
    #[serde(default = "default_node_height")]
    pub node_height: f64,
    /// Vertical distance between generation bands.
    #[serde(default = "default_level_spacing")]
    pub level_spacing: f64,
    /// Horizontal distance between node origins within a band.
    #[serde(default = "default_node_spacing")]
    pub node_spacing: f64,
    #[serde(default = "default_margin")]
    pub margin: f64,
    /// Child tier wraps into rows past this column count.
    #[serde(default = "default_columns_per_row")]
    pub columns_per_row: usize,
    #[serde(default = "default_row_gap")]
    pub row_gap: f64,
    /// Horizontal center each band is balanced around.
    #[serde(default = "default_center_x")]
    pub center_x: f64,
    #[serde(default = "default_min_canvas_width")]
    pub min_canvas_width: f64,
    #[serde(default = "default_min_canvas_height")]
    pub min_canvas_height: f64,
}

fn default_node_width() -> f64 {
    120.0
}

fn default_node_height() -> f64 {
    80.0
}

fn default_level_spacing() -> f64 {
    150.0
}

fn default_node_spacing() -> f64 {
    150.0
}

fn default_margin() -> f64 {
    50.0
}

fn default_columns_per_row() -> usize {
    6
}

fn default_row_gap() -> f64 {
    30.0
}

fn default_center_x() -> f64 {
    400.0
}

fn default_min_canvas_width() -> f64 {
    800.0
}

fn default_min_canvas_height() -> f64 {
    600.0
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            node_width: default_node_width(),
            node_height: default_node_height(),
            level_spacing: default_level_spacing(),
            node_spacing: default_node_spacing(),
            margin: default_margin(),
            columns_per_row: default_columns_per_row(),
            row_gap: default_row_gap(),
            center_x: default_center_x(),
            min_canvas_width: default_min_canvas_width(),
            min_canvas_height: default_min_canvas_height(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl EngineConfig {
    pub fn from_toml(input: &str) -> Result<Self, EngineError> {
        let config: EngineConfig =
            toml::from_str(input).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.tolerance.parent_age_gap == 0 {
            return Err(EngineError::ConfigValidation(
                "tolerance.parent_age_gap must be at least 1".into(),
            ));
        }

        if self.caps.grandparents == 0 || self.caps.parents == 0 || self.caps.children == 0 {
            return Err(EngineError::ConfigValidation(
                "generation caps must all be at least 1".into(),
            ));
        }

        if self.layout.columns_per_row == 0 {
            return Err(EngineError::ConfigValidation(
                "layout.columns_per_row must be at least 1".into(),
            ));
        }

        if self.layout.node_width <= 0.0 || self.layout.node_height <= 0.0 {
            return Err(EngineError::ConfigValidation(
                "layout node footprint must be positive".into(),
            ));
        }

        if self.layout.node_spacing <= 0.0 || self.layout.level_spacing <= 0.0 {
            return Err(EngineError::ConfigValidation(
                "layout spacing must be positive".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tolerance.parent_age_gap, 15);
        assert_eq!(config.tolerance.co_parent_age_gap, 5);
        assert_eq!(config.caps.grandparents, 4);
        assert_eq!(config.caps.parents, 4);
        assert_eq!(config.caps.children, 12);
        assert_eq!(config.layout.columns_per_row, 6);
    }

    #[test]
    fn parse_empty_toml_uses_defaults() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config.tolerance.parent_age_gap, 15);
        assert_eq!(config.layout.node_width, 120.0);
        assert!(config.reference_date.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
name = "Smith household"
reference_date = "2026-08-07"

[tolerance]
parent_age_gap = 10
co_parent_age_gap = 7

[caps]
grandparents = 4
parents = 6
children = 12

[layout]
node_width = 100
columns_per_row = 4
"#;
        let config = EngineConfig::from_toml(toml).unwrap();
        assert_eq!(config.name, "Smith household");
        assert_eq!(config.tolerance.parent_age_gap, 10);
        assert_eq!(config.tolerance.co_parent_age_gap, 7);
        assert_eq!(config.caps.parents, 6);
        assert_eq!(config.layout.node_width, 100.0);
        // untouched sections keep their defaults
        assert_eq!(config.layout.node_height, 80.0);
        assert_eq!(
            config.reference_date,
            NaiveDate::from_ymd_opt(2026, 8, 7)
        );
    }

    #[test]
    fn partial_section_keeps_sibling_defaults() {
        let toml = r#"
[tolerance]
parent_age_gap = 10
"#;
        let config = EngineConfig::from_toml(toml).unwrap();
        assert_eq!(config.tolerance.parent_age_gap, 10);
        assert_eq!(config.tolerance.co_parent_age_gap, 5);
    }

    #[test]
    fn reject_zero_age_gap() {
        let err = EngineConfig::from_toml("[tolerance]\nparent_age_gap = 0\n").unwrap_err();
        assert!(err.to_string().contains("parent_age_gap"));
    }

    #[test]
    fn reject_zero_cap() {
        let err = EngineConfig::from_toml("[caps]\nchildren = 0\n").unwrap_err();
        assert!(err.to_string().contains("caps"));
    }

    #[test]
    fn reject_zero_columns() {
        let err = EngineConfig::from_toml("[layout]\ncolumns_per_row = 0\n").unwrap_err();
        assert!(err.to_string().contains("columns_per_row"));
    }

    #[test]
    fn reject_bad_toml() {
        let err = EngineConfig::from_toml("caps = ").unwrap_err();
        assert!(matches!(err, EngineError::ConfigParse(_)));
    }
}
