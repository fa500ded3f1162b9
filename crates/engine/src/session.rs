use std::collections::BTreeSet;

use serde::Serialize;

use crate::merge::merge_relationships;
use crate::model::{PairKey, Relationship};

/// Persistence lifecycle of an interactively created relationship.
///
/// `LocalOnly → PendingPersist → Confirmed`, with `PendingPersist →
/// LocalOnly` on persist failure so a retry starts from a known state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    LocalOnly,
    PendingPersist,
    Confirmed,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackedRelationship {
    pub relationship: Relationship,
    pub state: SyncState,
}

/// Source/target pick while building a relationship interactively.
/// Scoped session state, passed by the caller, never global.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub source: Option<String>,
    pub target: Option<String>,
}

impl SelectionState {
    /// First pick fills the source, second the target. Re-picking the
    /// current source deselects it.
    pub fn select(&mut self, person_id: &str) {
        match &self.source {
            None => self.source = Some(person_id.to_string()),
            Some(source) if source == person_id => self.clear(),
            Some(_) => self.target = Some(person_id.to_string()),
        }
    }

    /// Consume a completed pair, clearing the selection.
    pub fn take_pair(&mut self) -> Option<(String, String)> {
        match (self.source.take(), self.target.take()) {
            (Some(source), Some(target)) => Some((source, target)),
            (source, _) => {
                // Incomplete pick: restore and wait for the second pick.
                self.source = source;
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.source = None;
        self.target = None;
    }
}

/// Optimistic-edit-then-reconcile session for one household's
/// relationships: local creations are tracked through persistence and
/// reconciled against refetched server state via the merge rule.
#[derive(Debug, Clone, Serialize)]
pub struct EditSession {
    pub group_id: String,
    tracked: Vec<TrackedRelationship>,
    pub selection: SelectionState,
}

impl EditSession {
    pub fn new(group_id: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            tracked: Vec::new(),
            selection: SelectionState::default(),
        }
    }

    /// Stage a local edit. A relationship with the same pair key replaces
    /// the earlier one — pair uniqueness holds inside a session too.
    pub fn stage(&mut self, relationship: Relationship) {
        let key = relationship.pair_key();
        self.tracked.retain(|t| t.relationship.pair_key() != key);
        self.tracked.push(TrackedRelationship { relationship, state: SyncState::LocalOnly });
    }

    /// A persist call went out for this relationship.
    pub fn mark_pending(&mut self, relationship_id: &str) -> bool {
        self.transition(relationship_id, SyncState::LocalOnly, SyncState::PendingPersist)
    }

    /// The persist call succeeded.
    pub fn confirm(&mut self, relationship_id: &str) -> bool {
        self.transition(relationship_id, SyncState::PendingPersist, SyncState::Confirmed)
    }

    /// The persist call failed; back to local so the caller can retry.
    pub fn revert_failed(&mut self, relationship_id: &str) -> bool {
        self.transition(relationship_id, SyncState::PendingPersist, SyncState::LocalOnly)
    }

    fn transition(&mut self, relationship_id: &str, from: SyncState, to: SyncState) -> bool {
        match self
            .tracked
            .iter_mut()
            .find(|t| t.relationship.id == relationship_id && t.state == from)
        {
            Some(tracked) => {
                tracked.state = to;
                true
            }
            None => false,
        }
    }

    /// Reconcile a refetched confirmed set into the session. Fetched state
    /// wins per pair (the merge rule); local-only edits survive with their
    /// current lifecycle state, and every pair present in the fetch is
    /// marked confirmed.
    pub fn absorb_confirmed(&mut self, fetched: &[Relationship]) {
        let local: Vec<Relationship> =
            self.tracked.iter().map(|t| t.relationship.clone()).collect();
        let merged = merge_relationships(&local, fetched);

        let confirmed_keys: BTreeSet<PairKey> = fetched.iter().map(|r| r.pair_key()).collect();
        let previous = std::mem::take(&mut self.tracked);

        self.tracked = merged
            .into_iter()
            .map(|relationship| {
                let key = relationship.pair_key();
                let state = if confirmed_keys.contains(&key) {
                    SyncState::Confirmed
                } else {
                    previous
                        .iter()
                        .find(|t| t.relationship.pair_key() == key)
                        .map(|t| t.state)
                        .unwrap_or(SyncState::LocalOnly)
                };
                TrackedRelationship { relationship, state }
            })
            .collect();
    }

    /// The session's current relationship snapshot, ready for
    /// classification and layout.
    pub fn relationships(&self) -> Vec<Relationship> {
        self.tracked.iter().map(|t| t.relationship.clone()).collect()
    }

    pub fn tracked(&self) -> &[TrackedRelationship] {
        &self.tracked
    }
}
