use serde::Deserialize;

use crate::error::EngineError;
use crate::model::Relationship;

/// Paginated envelope some persistence backends wrap relationship lists in.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipPage {
    pub items: Vec<Relationship>,
    #[serde(default)]
    pub total: Option<usize>,
    #[serde(default)]
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RelationshipFeed {
    Bare(Vec<Relationship>),
    Envelope(RelationshipPage),
}

/// Extract the relationship payload from a feed response, which may be a
/// bare JSON array or a paginated envelope.
pub fn parse_relationship_feed(json: &str) -> Result<Vec<Relationship>, EngineError> {
    let feed: RelationshipFeed =
        serde_json::from_str(json).map_err(|e| EngineError::FeedParse(e.to_string()))?;
    Ok(match feed {
        RelationshipFeed::Bare(items) => items,
        RelationshipFeed::Envelope(page) => page.items,
    })
}
