use std::collections::HashMap;

use crate::config::LayoutMetrics;
use crate::model::{
    FamilyMember, Generation, GenerationBuckets, Relationship, RelationshipKind, TreeEdge,
    TreeLayout, TreeNode,
};

/// Assign coordinates to every placed member and resolve relationship
/// edges to positioned connections.
///
/// Deterministic: identical buckets, relationships, and metrics yield
/// bit-identical output. Each generation occupies one horizontal band;
/// the child band wraps into rows past `columns_per_row`. An edge whose
/// endpoint has no node (capped out or unknown person) is dropped, not an
/// error.
pub fn layout_tree(
    buckets: &GenerationBuckets,
    relationships: &[Relationship],
    metrics: &LayoutMetrics,
) -> TreeLayout {
    let mut nodes = Vec::new();
    place_band(&mut nodes, &buckets.grandparents, Generation::Grandparent, metrics);
    place_band(&mut nodes, &buckets.parents, Generation::Parent, metrics);
    place_child_band(&mut nodes, &buckets.children, metrics);

    let edges = build_edges(&nodes, relationships);

    let (canvas_width, canvas_height) = canvas_bounds(&nodes, metrics);

    TreeLayout { nodes, edges, canvas_width, canvas_height }
}

fn band_y(generation: Generation, metrics: &LayoutMetrics) -> f64 {
    metrics.margin + generation.band_index() as f64 * metrics.level_spacing
}

/// One row of nodes centered on `center_x`.
fn place_row(
    nodes: &mut Vec<TreeNode>,
    row: &[FamilyMember],
    generation: Generation,
    y: f64,
    metrics: &LayoutMetrics,
) {
    let offset = row.len() as f64 * metrics.node_spacing / 2.0;
    let start_x = metrics.center_x - offset;

    for (i, member) in row.iter().enumerate() {
        let person_id = &member.person.id;
        nodes.push(TreeNode {
            id: format!("node_{person_id}"),
            person_id: person_id.clone(),
            generation,
            x: start_x + i as f64 * metrics.node_spacing,
            y,
            width: metrics.node_width,
            height: metrics.node_height,
        });
    }
}

fn place_band(
    nodes: &mut Vec<TreeNode>,
    members: &[FamilyMember],
    generation: Generation,
    metrics: &LayoutMetrics,
) {
    place_row(nodes, members, generation, band_y(generation, metrics), metrics);
}

/// The child tier wraps into rows of `columns_per_row`, each row centered
/// on its own occupancy.
fn place_child_band(nodes: &mut Vec<TreeNode>, members: &[FamilyMember], metrics: &LayoutMetrics) {
    let base_y = band_y(Generation::Child, metrics);

    // config validation rejects 0, but chunks() must never see it
    let columns = metrics.columns_per_row.max(1);
    for (row_index, row) in members.chunks(columns).enumerate() {
        let y = base_y + row_index as f64 * (metrics.node_height + metrics.row_gap);
        place_row(nodes, row, Generation::Child, y, metrics);
    }
}

fn build_edges(nodes: &[TreeNode], relationships: &[Relationship]) -> Vec<TreeEdge> {
    let by_person: HashMap<&str, &TreeNode> =
        nodes.iter().map(|n| (n.person_id.as_str(), n)).collect();

    let mut edges = Vec::new();
    for rel in relationships {
        if !rel.active {
            continue;
        }
        let (from, to) = match (
            by_person.get(rel.person1.as_str()),
            by_person.get(rel.person2.as_str()),
        ) {
            (Some(from), Some(to)) => (*from, *to),
            // Endpoint excluded by a cap, or unknown person: no edge.
            _ => continue,
        };

        let (from_point, to_point) = attach_points(from, to, rel.kind);
        edges.push(TreeEdge {
            id: format!("edge_{}", rel.id),
            from_node: from.id.clone(),
            to_node: to.id.clone(),
            kind: rel.kind,
            from_point,
            to_point,
        });
    }
    edges
}

/// Vertical kinds flow band-to-band and attach bottom-center to
/// top-center; everything else runs within a band and attaches at the
/// facing side midpoints.
fn attach_points(
    from: &TreeNode,
    to: &TreeNode,
    kind: RelationshipKind,
) -> (crate::model::Point, crate::model::Point) {
    match kind {
        RelationshipKind::Parent
        | RelationshipKind::Child
        | RelationshipKind::Grandparent
        | RelationshipKind::Grandchild => (from.bottom_center(), to.top_center()),
        _ => {
            if from.x <= to.x {
                (from.right_middle(), to.left_middle())
            } else {
                (from.left_middle(), to.right_middle())
            }
        }
    }
}

/// Bounding box over all nodes, floored at the minimum canvas so an empty
/// or tiny tree still renders a usable surface.
fn canvas_bounds(nodes: &[TreeNode], metrics: &LayoutMetrics) -> (f64, f64) {
    let mut width = metrics.min_canvas_width;
    let mut height = metrics.min_canvas_height;
    for node in nodes {
        width = width.max(node.x + node.width);
        height = height.max(node.y + node.height);
    }
    (width, height)
}
