use crate::config::GenerationCaps;
use crate::model::{FamilyMember, Generation, GenerationBuckets, Relationship, RelationshipKind};

/// Bucket members into display generations from explicit edges.
///
/// Edge-driven and independent of the age heuristic: only confirmed
/// relationships decide placement here.
///
/// - grandparent: an active `grandparent` edge originates from the member
/// - child: an active `parent` edge targets the member
/// - otherwise the member is a root and lands in the parent tier
///
/// A member matching both rules is a grandparent; originating a
/// grandparent edge is the stronger signal. Members with no stable id are
/// skipped entirely. Bucket caps exist to keep layout tractable; overflow
/// goes to `unplaced` rather than disappearing.
pub fn classify_generations(
    members: &[FamilyMember],
    relationships: &[Relationship],
    caps: &GenerationCaps,
) -> GenerationBuckets {
    let mut buckets = GenerationBuckets::default();

    for member in members {
        let id = member.person.id.as_str();
        if id.is_empty() {
            continue;
        }

        let generation = classify_member(id, relationships);
        let (bucket, cap) = match generation {
            Generation::Grandparent => (&mut buckets.grandparents, caps.grandparents),
            Generation::Parent => (&mut buckets.parents, caps.parents),
            Generation::Child => (&mut buckets.children, caps.children),
        };

        if bucket.len() < cap {
            bucket.push(member.clone());
        } else {
            buckets.unplaced.push(member.clone());
        }
    }

    buckets
}

/// Generation of a single member under the edge rules, ignoring caps.
pub fn classify_member(person_id: &str, relationships: &[Relationship]) -> Generation {
    let originates_grandparent = relationships.iter().any(|r| {
        r.active && r.kind == RelationshipKind::Grandparent && r.person1 == person_id
    });
    if originates_grandparent {
        return Generation::Grandparent;
    }

    let targeted_as_child = relationships
        .iter()
        .any(|r| r.active && r.kind == RelationshipKind::Parent && r.person2 == person_id);
    if targeted_as_child {
        return Generation::Child;
    }

    Generation::Parent
}
