use serde::Serialize;

use crate::model::{PathwayGraph, Point, Reaction, ReactionKind, Role, RoleEdge};

/// Reaction classes drawn without an end marker: the dashed set links and
/// placeholder reactions.
const UNMARKED_CLASSES: [&str; 3] = ["EntitySetAndMemberLink", "EntitySetAndEntitySetLink", "missing"];

/// What a segment's end marker is named after: the role of the connector
/// it belongs to, or the reaction kind for a reaction's own base line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Marker {
    Role(Role),
    Reaction(ReactionKind),
}

/// End glyph the drawing side should put on an arrowed segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Terminator {
    Arrow,
    Bar,
    Circle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub arrowed: bool,
    pub marker: Marker,
    pub reaction_id: String,
    pub reaction_class: String,
    pub failed: bool,
}

impl Segment {
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn terminator(&self) -> Option<Terminator> {
        if !self.arrowed {
            return None;
        }
        Some(match self.marker {
            Marker::Role(Role::Inhibitor) => Terminator::Bar,
            Marker::Role(Role::Catalyst) => Terminator::Circle,
            _ => Terminator::Arrow,
        })
    }
}

/// Anchor for the small reaction-type glyph drawn at a reaction center.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionLabel {
    pub x: f64,
    pub y: f64,
    pub reaction_kind: ReactionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub id: String,
}

fn is_unmarked_class(class: &str) -> bool {
    UNMARKED_CLASSES
        .iter()
        .any(|unmarked| unmarked.eq_ignore_ascii_case(class))
}

/// Collects the segments of one reaction.
struct SegmentSink<'a> {
    reaction: &'a Reaction,
    segments: &'a mut Vec<Segment>,
}

impl SegmentSink<'_> {
    fn push_path(&mut self, points: &[Point], marker: Marker) {
        let markable = !is_unmarked_class(&self.reaction.class)
            && self.reaction.kind != ReactionKind::Missing
            && marker != Marker::Reaction(ReactionKind::Missing);
        let last = points.len().saturating_sub(2);
        for (index, pair) in points.windows(2).enumerate() {
            self.segments.push(Segment {
                x1: pair[0].x,
                y1: pair[0].y,
                x2: pair[1].x,
                y2: pair[1].y,
                arrowed: markable && index == last,
                marker: marker.clone(),
                reaction_id: self.reaction.reactome_id.clone(),
                reaction_class: self.reaction.class.clone(),
                failed: self.reaction.failed,
            });
        }
    }
}

/// Build the connector path for one curated role edge. Returns `None` when
/// the edge has no curated points or its entity is not in the graph.
fn role_path<G: PathwayGraph + ?Sized>(
    graph: &G,
    reaction: &Reaction,
    node: &RoleEdge,
) -> Option<Vec<Point>> {
    if !node.has_curated_path() {
        return None;
    }
    let mut points = node.base.clone();
    match node.role {
        Role::Input => {
            let anchor = reaction.base.first().copied().unwrap_or(reaction.center);
            points.push(anchor);
            points[0] = graph.entity(&node.entity_id)?.visual_center();
        }
        Role::Output => {
            points.push(reaction.center);
            points.reverse();
        }
        Role::Activator | Role::Catalyst | Role::Inhibitor => {
            points.push(reaction.center);
            points[0] = graph.entity(&node.entity_id)?.visual_center();
        }
    }
    Some(points)
}

fn route_reaction<G: PathwayGraph + ?Sized>(
    graph: &G,
    reaction: &Reaction,
    segments: &mut Vec<Segment>,
) {
    let mut sink = SegmentSink { reaction, segments };
    let mut has_input = false;
    let mut has_output = false;

    for node in &reaction.nodes {
        let Some(points) = role_path(graph, reaction, node) else {
            continue;
        };
        sink.push_path(&points, Marker::Role(node.role));
        match node.role {
            Role::Input => has_input = true,
            Role::Output => has_output = true,
            _ => {}
        }
    }

    let mut base = reaction.base.clone();
    if !has_input {
        // Snap the uncurated base line onto the first listed input.
        let first_input = reaction
            .nodes
            .iter()
            .find(|node| node.role == Role::Input)
            .and_then(|node| graph.entity(&node.entity_id));
        if let (Some(entity), Some(first)) = (first_input, base.first_mut()) {
            *first = entity.visual_center();
        }
    }
    if has_output {
        // The output path already ends at this point.
        base.pop();
    }

    let marker = if has_output {
        Marker::Reaction(reaction.kind.clone())
    } else {
        Marker::Role(Role::Output)
    };
    sink.push_path(&base, marker);
}

/// Turn every reaction's curated point lists into drawable segments.
pub fn route<G: PathwayGraph + ?Sized>(graph: &G, reactions: &[Reaction]) -> Vec<Segment> {
    let mut segments = Vec::new();
    for reaction in reactions {
        route_reaction(graph, reaction, &mut segments);
    }
    tracing::debug!(
        reactions = reactions.len(),
        segments = segments.len(),
        "routed reaction edges"
    );
    segments
}

/// Order segments so those carrying end markers are drawn last, keeping
/// markers visible where paths overlap.
pub fn stack_arrowed_last(segments: &mut [Segment]) {
    segments.sort_by_key(|segment| segment.arrowed);
}

/// Label anchors for reactions that have at least one curated role edge.
pub fn reaction_labels(reactions: &[Reaction]) -> Vec<ReactionLabel> {
    reactions
        .iter()
        .filter(|reaction| reaction.nodes.iter().any(RoleEdge::has_curated_path))
        .map(|reaction| ReactionLabel {
            x: reaction.center.x,
            y: reaction.center.y,
            reaction_kind: reaction.kind.clone(),
            description: reaction.description.clone(),
            id: reaction.reactome_id.clone(),
        })
        .collect()
}
