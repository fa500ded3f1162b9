use chrono::NaiveDate;

use crate::age::effective_age;
use crate::config::AgeTolerance;
use crate::model::{
    FamilyMember, FamilyRole, InferredHousehold, PersonRecord, Relationship, RelationshipKind,
};

/// Partition a household into probable parents and children from age data
/// alone. Best-effort heuristic: at most two parents, everyone else a child,
/// and anyone without usable age data is a child unconditionally.
///
/// Total over incomplete input; input order does not matter.
pub fn infer_household(
    persons: &[PersonRecord],
    tolerance: &AgeTolerance,
    today: NaiveDate,
) -> InferredHousehold {
    if persons.is_empty() {
        return InferredHousehold::default();
    }

    let gap = tolerance.parent_age_gap;

    let mut with_age: Vec<(u32, &PersonRecord)> = Vec::new();
    let mut without_age: Vec<&PersonRecord> = Vec::new();
    for person in persons {
        match effective_age(person, today) {
            Some(age) => with_age.push((age, person)),
            None => without_age.push(person),
        }
    }
    // Descending by age; ties broken by id so input order never leaks in.
    with_age.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.id.cmp(&b.1.id)));

    let mut parents: Vec<(u32, &PersonRecord)> = Vec::new();
    let mut children: Vec<(u32, &PersonRecord)> = Vec::new();
    let mut undecided: Vec<(u32, &PersonRecord)> = Vec::new();

    if let Some(&(eldest_age, eldest)) = with_age.first() {
        // Seed pass: the eldest is a provisional sole parent. Anyone a full
        // age gap below them is a child; the rest stay undecided (siblings
        // and co-parents are indistinguishable at this point).
        for &(age, person) in &with_age[1..] {
            if eldest_age - age >= gap {
                children.push((age, person));
            } else {
                undecided.push((age, person));
            }
        }

        if children.is_empty() {
            // Nobody cleared the gap: no parent identified, eldest included.
            children.push((eldest_age, eldest));
        } else {
            parents.push((eldest_age, eldest));
        }

        // Second pass: an undecided person becomes a parent only if they
        // out-age every current child by the full gap and a slot is open.
        for &(age, person) in &undecided {
            let parent_worthy = children.iter().all(|&(child_age, _)| age >= child_age + gap);
            if parent_worthy && parents.len() < 2 {
                parents.push((age, person));
            } else {
                children.push((age, person));
            }
        }

        // Co-parent promotion: a lone parent takes the first child whose age
        // is within the co-parent tolerance as the second parent.
        if parents.len() == 1 {
            let parent_age = parents[0].0;
            if let Some(pos) = children
                .iter()
                .position(|&(age, _)| age.abs_diff(parent_age) <= tolerance.co_parent_age_gap)
            {
                let promoted = children.remove(pos);
                parents.push(promoted);
            }
        }
    }

    let mut out = InferredHousehold::default();
    for (_, person) in parents {
        out.parents.push(FamilyMember { person: person.clone(), role: FamilyRole::Parent });
    }
    for (_, person) in children {
        out.children.push(FamilyMember { person: person.clone(), role: FamilyRole::Child });
    }
    // No usable age: always a child.
    for person in without_age {
        out.children.push(FamilyMember { person: person.clone(), role: FamilyRole::Child });
    }
    out
}

/// Convert an inferred partition into proposed relationship edges for an
/// editing flow. Suggestions only; display classification stays driven by
/// explicitly confirmed edges.
pub fn suggest_relationships(inferred: &InferredHousehold) -> Vec<Relationship> {
    let mut suggested = Vec::new();

    for parent in &inferred.parents {
        for child in &inferred.children {
            suggested.push(Relationship {
                id: format!("suggested_{}_{}", parent.person.id, child.person.id),
                person1: parent.person.id.clone(),
                person2: child.person.id.clone(),
                kind: RelationshipKind::Parent,
                notes: None,
                active: true,
            });
        }
    }

    if let [first, second] = inferred.parents.as_slice() {
        suggested.push(Relationship {
            id: format!("suggested_{}_{}", first.person.id, second.person.id),
            person1: first.person.id.clone(),
            person2: second.person.id.clone(),
            kind: RelationshipKind::Spouse,
            notes: None,
            active: true,
        });
    }

    suggested
}
