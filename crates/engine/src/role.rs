use crate::model::{
    DisplayRole, FamilyMember, MemberRole, Relationship, RelationshipKind, ResolvedRole,
    RoleCategory,
};

/// Resolve one member's display role from the relationship set, falling
/// back to the member's coarse tag when no edge says anything. Ambiguous
/// or unresolvable cases default to `Other`.
pub fn resolve_role(
    person_id: &str,
    members: &[FamilyMember],
    relationships: &[Relationship],
) -> ResolvedRole {
    let originates_parent = relationships
        .iter()
        .any(|r| r.active && r.kind == RelationshipKind::Parent && r.person1 == person_id);
    if originates_parent {
        return resolved(DisplayRole::Parent);
    }

    let targeted_as_child = relationships
        .iter()
        .any(|r| r.active && r.kind == RelationshipKind::Parent && r.person2 == person_id);
    if targeted_as_child {
        return resolved(DisplayRole::Child);
    }

    let in_spouse_edge = relationships.iter().any(|r| {
        r.active
            && r.kind == RelationshipKind::Spouse
            && (r.person1 == person_id || r.person2 == person_id)
    });
    if in_spouse_edge {
        return resolved(DisplayRole::Spouse);
    }

    // No edge verdict: fall back to whatever tag the member carries.
    let fallback = members
        .iter()
        .find(|m| m.person.id == person_id)
        .map(|m| match m.role {
            crate::model::FamilyRole::Parent => DisplayRole::Parent,
            crate::model::FamilyRole::Child => DisplayRole::Child,
            crate::model::FamilyRole::Other => DisplayRole::Other,
        })
        .unwrap_or(DisplayRole::Other);
    resolved(fallback)
}

/// Role rows for every member, in member order.
pub fn resolve_all_roles(
    members: &[FamilyMember],
    relationships: &[Relationship],
) -> Vec<MemberRole> {
    members
        .iter()
        .map(|m| {
            let r = resolve_role(&m.person.id, members, relationships);
            MemberRole {
                person_id: m.person.id.clone(),
                name: m.person.name.clone(),
                role: r.role,
                category: r.category,
            }
        })
        .collect()
}

fn resolved(role: DisplayRole) -> ResolvedRole {
    ResolvedRole { role, category: category_for(role) }
}

/// One display category per role.
pub fn category_for(role: DisplayRole) -> RoleCategory {
    match role {
        DisplayRole::Parent => RoleCategory::Guardian,
        DisplayRole::Child => RoleCategory::Dependent,
        DisplayRole::Spouse => RoleCategory::Partner,
        DisplayRole::Other => RoleCategory::Household,
    }
}
