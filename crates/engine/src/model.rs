use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Default for Gender {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One directory entry. Supplied externally, immutable for a session.
///
/// `age` is the authoritative field when present; `date_of_birth` is a
/// fallback source only (calendar drift makes derived ages less reliable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    Parent,
    Child,
    Spouse,
    Sibling,
    Grandparent,
    Grandchild,
    AuntUncle,
    NieceNephew,
    Cousin,
    Other,
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parent => write!(f, "parent"),
            Self::Child => write!(f, "child"),
            Self::Spouse => write!(f, "spouse"),
            Self::Sibling => write!(f, "sibling"),
            Self::Grandparent => write!(f, "grandparent"),
            Self::Grandchild => write!(f, "grandchild"),
            Self::AuntUncle => write!(f, "aunt_uncle"),
            Self::NieceNephew => write!(f, "niece_nephew"),
            Self::Cousin => write!(f, "cousin"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A typed edge between two persons. Directional in storage (`person1` is
/// *kind* of `person2`), but its identity for merge/dedup is the unordered
/// pair — see [`PairKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    pub person1: String,
    pub person2: String,
    pub kind: RelationshipKind,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Relationship {
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(&self.person1, &self.person2)
    }
}

/// Unordered-pair identity of a relationship: the lesser id first.
/// Two edges between the same pair of persons are the same edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    pub a: String,
    pub b: String,
}

impl PairKey {
    pub fn new(p1: &str, p2: &str) -> Self {
        if p1 <= p2 {
            Self { a: p1.to_string(), b: p2.to_string() }
        } else {
            Self { a: p2.to_string(), b: p1.to_string() }
        }
    }
}

/// Pre-loaded engine input: one household snapshot.
#[derive(Debug, Clone, Default)]
pub struct FamilyInput {
    pub persons: Vec<PersonRecord>,
    pub relationships: Vec<Relationship>,
}

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

/// Coarse role tag assigned by the age heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyRole {
    Parent,
    Child,
    Other,
}

impl std::fmt::Display for FamilyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parent => write!(f, "parent"),
            Self::Child => write!(f, "child"),
            Self::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FamilyMember {
    pub person: PersonRecord,
    pub role: FamilyRole,
}

/// Output of the age heuristic. At most two parents, everyone else a child.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InferredHousehold {
    pub parents: Vec<FamilyMember>,
    pub children: Vec<FamilyMember>,
}

impl InferredHousehold {
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty() && self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parents.len() + self.children.len()
    }
}

// ---------------------------------------------------------------------------
// Generations
// ---------------------------------------------------------------------------

/// Display tier, not a genealogical fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Generation {
    Grandparent,
    Parent,
    Child,
}

impl Generation {
    /// Vertical band index, top to bottom.
    pub fn band_index(&self) -> usize {
        match self {
            Self::Grandparent => 0,
            Self::Parent => 1,
            Self::Child => 2,
        }
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grandparent => write!(f, "grandparent"),
            Self::Parent => write!(f, "parent"),
            Self::Child => write!(f, "child"),
        }
    }
}

/// Capped generation buckets. Members squeezed out by a cap land in
/// `unplaced`: visible in the output, excluded from layout.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationBuckets {
    pub grandparents: Vec<FamilyMember>,
    pub parents: Vec<FamilyMember>,
    pub children: Vec<FamilyMember>,
    pub unplaced: Vec<FamilyMember>,
}

impl GenerationBuckets {
    pub fn placed_count(&self) -> usize {
        self.grandparents.len() + self.parents.len() + self.children.len()
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Positioned node. Derived on every recompute, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub id: String,
    pub person_id: String,
    pub generation: Generation,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TreeNode {
    pub fn top_center(&self) -> Point {
        Point { x: self.x + self.width / 2.0, y: self.y }
    }

    pub fn bottom_center(&self) -> Point {
        Point { x: self.x + self.width / 2.0, y: self.y + self.height }
    }

    pub fn left_middle(&self) -> Point {
        Point { x: self.x, y: self.y + self.height / 2.0 }
    }

    pub fn right_middle(&self) -> Point {
        Point { x: self.x + self.width, y: self.y + self.height / 2.0 }
    }
}

/// Positioned edge between two placed nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeEdge {
    pub id: String,
    pub from_node: String,
    pub to_node: String,
    pub kind: RelationshipKind,
    pub from_point: Point,
    pub to_point: Point,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TreeLayout {
    pub nodes: Vec<TreeNode>,
    pub edges: Vec<TreeEdge>,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Coarse display role for tabular views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayRole {
    Parent,
    Child,
    Spouse,
    Other,
}

impl std::fmt::Display for DisplayRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parent => write!(f, "parent"),
            Self::Child => write!(f, "child"),
            Self::Spouse => write!(f, "spouse"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Display category paired with a role, one per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    Guardian,
    Dependent,
    Partner,
    Household,
}

impl std::fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guardian => write!(f, "guardian"),
            Self::Dependent => write!(f, "dependent"),
            Self::Partner => write!(f, "partner"),
            Self::Household => write!(f, "household"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedRole {
    pub role: DisplayRole,
    pub category: RoleCategory,
}

/// One row of the tabular role listing.
#[derive(Debug, Clone, Serialize)]
pub struct MemberRole {
    pub person_id: String,
    pub name: String,
    pub role: DisplayRole,
    pub category: RoleCategory,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct HouseholdSummary {
    pub total_members: usize,
    pub placed: usize,
    pub unplaced: usize,
    pub grandparents: usize,
    pub parents: usize,
    pub children: usize,
    pub total_edges: usize,
    pub active_edges: usize,
    pub drawn_edges: usize,
    pub dropped_edges: usize,
    pub role_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FamilyTreeResult {
    pub meta: RunMeta,
    pub roles: Vec<MemberRole>,
    pub generations: GenerationBuckets,
    pub layout: TreeLayout,
    pub summary: HouseholdSummary,
}
