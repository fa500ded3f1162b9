use std::collections::BTreeMap;

use crate::model::{
    FamilyMember, GenerationBuckets, HouseholdSummary, MemberRole, Relationship, TreeLayout,
};

/// Compute summary statistics for one engine run.
pub fn compute_summary(
    members: &[FamilyMember],
    buckets: &GenerationBuckets,
    layout: &TreeLayout,
    relationships: &[Relationship],
    roles: &[MemberRole],
) -> HouseholdSummary {
    let active_edges = relationships.iter().filter(|r| r.active).count();
    let drawn_edges = layout.edges.len();

    let mut role_counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in roles {
        *role_counts.entry(row.role.to_string()).or_insert(0) += 1;
    }

    HouseholdSummary {
        total_members: members.len(),
        placed: buckets.placed_count(),
        unplaced: buckets.unplaced.len(),
        grandparents: buckets.grandparents.len(),
        parents: buckets.parents.len(),
        children: buckets.children.len(),
        total_edges: relationships.len(),
        active_edges,
        drawn_edges,
        dropped_edges: active_edges - drawn_edges,
        role_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_generations;
    use crate::config::{GenerationCaps, LayoutMetrics};
    use crate::layout::layout_tree;
    use crate::model::{FamilyRole, Gender, PersonRecord, RelationshipKind};
    use crate::role::resolve_all_roles;

    fn member(id: &str) -> FamilyMember {
        FamilyMember {
            person: PersonRecord {
                id: id.into(),
                name: id.to_uppercase(),
                age: None,
                date_of_birth: None,
                gender: Gender::Unknown,
                contact: None,
                address: None,
            },
            role: FamilyRole::Other,
        }
    }

    fn rel(id: &str, p1: &str, p2: &str, kind: RelationshipKind) -> Relationship {
        Relationship {
            id: id.into(),
            person1: p1.into(),
            person2: p2.into(),
            kind,
            notes: None,
            active: true,
        }
    }

    #[test]
    fn counts_line_up() {
        let members = vec![member("a"), member("b"), member("c")];
        let rels = vec![
            rel("r1", "a", "c", RelationshipKind::Parent),
            rel("r2", "a", "ghost", RelationshipKind::Parent),
        ];
        let buckets = classify_generations(&members, &rels, &GenerationCaps::default());
        let layout = layout_tree(&buckets, &rels, &LayoutMetrics::default());
        let roles = resolve_all_roles(&members, &rels);

        let summary = compute_summary(&members, &buckets, &layout, &rels, &roles);
        assert_eq!(summary.total_members, 3);
        assert_eq!(summary.placed, 3);
        assert_eq!(summary.unplaced, 0);
        assert_eq!(summary.children, 1);
        assert_eq!(summary.total_edges, 2);
        assert_eq!(summary.active_edges, 2);
        // the ghost edge resolves no node pair
        assert_eq!(summary.drawn_edges, 1);
        assert_eq!(summary.dropped_edges, 1);
        assert_eq!(summary.role_counts.get("parent"), Some(&1));
        assert_eq!(summary.role_counts.get("child"), Some(&1));
        assert_eq!(summary.role_counts.get("other"), Some(&1));
    }

    #[test]
    fn empty_household_all_zero() {
        let buckets = GenerationBuckets::default();
        let layout = layout_tree(&buckets, &[], &LayoutMetrics::default());
        let summary = compute_summary(&[], &buckets, &layout, &[], &[]);
        assert_eq!(summary.total_members, 0);
        assert_eq!(summary.placed, 0);
        assert_eq!(summary.drawn_edges, 0);
        assert!(summary.role_counts.is_empty());
    }
}
