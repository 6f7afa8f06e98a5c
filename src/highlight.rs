use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::model::PathwayGraph;
use crate::viewport::ZoomScope;

const COLLISION_TEXT: &str = "*";
const BADGE_HEIGHT: f64 = 15.0;
const BADGE_CHAR_WIDTH: f64 = 5.0;
const BADGE_PADDING: f64 = 10.0;
const BADGE_INSET: f64 = 10.0;
const BADGE_RAISE: f64 = 7.0;
const BADGE_TEXT_DX: f64 = 5.0;
const BADGE_TEXT_DY: f64 = 11.0;

/// Raw annotation that points at one or more biological objects.
pub trait HighlightSource {
    fn entity_refs(&self) -> &[String];

    fn magnitude(&self) -> f64;
}

/// Mutation count for a set of reactome ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationRecord {
    #[serde(alias = "dbIds")]
    pub entity_refs: Vec<String>,
    pub value: f64,
}

impl HighlightSource for MutationRecord {
    fn entity_refs(&self) -> &[String] {
        &self.entity_refs
    }

    fn magnitude(&self) -> f64 {
        self.value
    }
}

/// Compounds targeting a set of reactome ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugRecord {
    #[serde(alias = "dbIds")]
    pub entity_refs: Vec<String>,
    #[serde(default)]
    pub drugs: Vec<String>,
}

impl HighlightSource for DrugRecord {
    fn entity_refs(&self) -> &[String] {
        &self.entity_refs
    }

    fn magnitude(&self) -> f64 {
        self.drugs.len() as f64
    }
}

/// Value shown in an entity's annotation badge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DisplayValue {
    Count(f64),
    /// Several records claim the entity.
    Collision,
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Count(value) => write!(f, "{value}"),
            DisplayValue::Collision => f.write_str(COLLISION_TEXT),
        }
    }
}

impl Serialize for DisplayValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DisplayValue::Count(value) => serializer.serialize_f64(*value),
            DisplayValue::Collision => serializer.serialize_str(COLLISION_TEXT),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedHighlights {
    pub mutation_values: BTreeMap<String, DisplayValue>,
    pub drug_values: BTreeMap<String, DisplayValue>,
    pub overlapping_ids: BTreeSet<String>,
}

/// Expand records onto entity ids. Records outside the scope or with a
/// negative magnitude are skipped; an entity claimed twice gets
/// [`DisplayValue::Collision`].
pub fn resolve_values<G, R>(graph: &G, records: &[R], scope: &ZoomScope) -> BTreeMap<String, DisplayValue>
where
    G: PathwayGraph + ?Sized,
    R: HighlightSource,
{
    let mut values = BTreeMap::new();
    for record in records {
        let magnitude = record.magnitude();
        if !(magnitude >= 0.0) {
            tracing::warn!(magnitude, "skipping highlight with negative magnitude");
            continue;
        }
        for reference in record.entity_refs() {
            if !scope.admits(reference) {
                continue;
            }
            for entity in graph.entities_by_reactome_id(reference) {
                values
                    .entry(entity.id.clone())
                    .and_modify(|value| *value = DisplayValue::Collision)
                    .or_insert(DisplayValue::Count(magnitude));
            }
        }
    }
    values
}

/// Entity ids to draw as overlapping. Overlap only means something inside a
/// framed sub-pathway, so nothing survives while the whole diagram is in view.
pub fn resolve_overlaps<G: PathwayGraph + ?Sized>(
    graph: &G,
    overlaps: &[String],
    scope: &ZoomScope,
) -> BTreeSet<String> {
    overlaps
        .iter()
        .filter(|reference| scope.contains(reference))
        .flat_map(|reference| graph.entities_by_reactome_id(reference))
        .map(|entity| entity.id.clone())
        .collect()
}

pub fn resolve_highlights<G: PathwayGraph + ?Sized>(
    graph: &G,
    mutations: &[MutationRecord],
    drugs: &[DrugRecord],
    overlaps: &[String],
    scope: &ZoomScope,
) -> ResolvedHighlights {
    let resolved = ResolvedHighlights {
        mutation_values: resolve_values(graph, mutations, scope),
        drug_values: resolve_values(graph, drugs, scope),
        overlapping_ids: resolve_overlaps(graph, overlaps, scope),
    };
    tracing::debug!(
        mutations = resolved.mutation_values.len(),
        drugs = resolved.drug_values.len(),
        overlaps = resolved.overlapping_ids.len(),
        scoped = !scope.is_empty(),
        "resolved highlights"
    );
    resolved
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BadgeSide {
    Left,
    Right,
}

/// Rounded value banner pinned to the top corner of an entity.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub entity_id: String,
    pub side: BadgeSide,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text_x: f64,
    pub text_y: f64,
}

pub fn badges<G: PathwayGraph + ?Sized>(
    graph: &G,
    values: &BTreeMap<String, DisplayValue>,
    side: BadgeSide,
) -> Vec<Badge> {
    values
        .iter()
        .filter_map(|(entity_id, value)| {
            let entity = graph.entity(entity_id)?;
            let text = value.to_string();
            let width = text.chars().count() as f64 * BADGE_CHAR_WIDTH + BADGE_PADDING;
            let x = match side {
                BadgeSide::Left => entity.position.x - width + BADGE_INSET,
                BadgeSide::Right => entity.position.x + entity.size.width - BADGE_INSET,
            };
            let y = entity.position.y - BADGE_RAISE;
            Some(Badge {
                entity_id: entity_id.clone(),
                side,
                text,
                x,
                y,
                width,
                height: BADGE_HEIGHT,
                text_x: x + BADGE_TEXT_DX,
                text_y: y + BADGE_TEXT_DY,
            })
        })
        .collect()
}

impl ResolvedHighlights {
    /// Mutation badges on the right corner, drug badges on the left.
    pub fn badges<G: PathwayGraph + ?Sized>(&self, graph: &G) -> Vec<Badge> {
        let mut out = badges(graph, &self.mutation_values, BadgeSide::Right);
        out.extend(badges(graph, &self.drug_values, BadgeSide::Left));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, EntityKind, PathwayModel, Point, Size};

    fn graph() -> PathwayModel {
        let entity = |id: &str, reactome_id: &str, x: f64| {
            Entity::new(id, reactome_id, EntityKind::Protein, Point::new(x, 20.0), Size::new(60.0, 30.0))
        };
        PathwayModel::new(
            vec![
                entity("1", "A", 0.0),
                entity("2", "B", 100.0),
                entity("3", "C", 200.0),
                entity("4", "A", 300.0),
            ],
            Vec::new(),
        )
        .unwrap()
    }

    fn mutation(refs: &[&str], value: f64) -> MutationRecord {
        MutationRecord {
            entity_refs: refs.iter().map(|r| r.to_string()).collect(),
            value,
        }
    }

    #[test]
    fn record_expands_to_every_copy_of_an_object() {
        let values = resolve_values(&graph(), &[mutation(&["A"], 3.0)], &ZoomScope::new());
        assert_eq!(values.get("1"), Some(&DisplayValue::Count(3.0)));
        assert_eq!(values.get("4"), Some(&DisplayValue::Count(3.0)));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn second_claim_becomes_collision() {
        let values = resolve_values(
            &graph(),
            &[mutation(&["B"], 3.0), mutation(&["B"], 4.0)],
            &ZoomScope::new(),
        );
        assert_eq!(values.get("2"), Some(&DisplayValue::Collision));
        assert_eq!(values["2"].to_string(), "*");
    }

    #[test]
    fn out_of_scope_records_are_dropped() {
        let scope: ZoomScope = ["A", "B"].into_iter().collect();
        let values = resolve_values(&graph(), &[mutation(&["C"], 3.0)], &scope);
        assert!(values.is_empty());
    }

    #[test]
    fn negative_magnitudes_are_dropped() {
        let values = resolve_values(&graph(), &[mutation(&["B"], -1.0)], &ZoomScope::new());
        assert!(values.is_empty());
    }

    #[test]
    fn unmatched_references_are_ignored() {
        let values = resolve_values(&graph(), &[mutation(&["Z"], 1.0)], &ZoomScope::new());
        assert!(values.is_empty());
    }

    #[test]
    fn drug_magnitude_is_compound_count() {
        let record = DrugRecord {
            entity_refs: vec!["C".to_string()],
            drugs: vec!["D1".to_string(), "D2".to_string()],
        };
        let values = resolve_values(&graph(), &[record], &ZoomScope::new());
        assert_eq!(values.get("3"), Some(&DisplayValue::Count(2.0)));
    }

    #[test]
    fn overlaps_require_a_framed_sub_pathway() {
        let overlaps = vec!["A".to_string(), "C".to_string()];
        assert!(resolve_overlaps(&graph(), &overlaps, &ZoomScope::new()).is_empty());

        let scope: ZoomScope = ["A", "B"].into_iter().collect();
        let ids = resolve_overlaps(&graph(), &overlaps, &scope);
        assert_eq!(
            ids,
            ["1", "4"].into_iter().map(String::from).collect::<BTreeSet<String>>()
        );
    }

    #[test]
    fn badges_hug_the_top_corners() {
        let graph = graph();
        let resolved = resolve_highlights(
            &graph,
            &[mutation(&["B"], 12.0)],
            &[DrugRecord {
                entity_refs: vec!["B".to_string()],
                drugs: vec!["D1".to_string()],
            }],
            &[],
            &ZoomScope::new(),
        );
        let badges = resolved.badges(&graph);
        assert_eq!(badges.len(), 2);

        let right = &badges[0];
        assert_eq!(right.side, BadgeSide::Right);
        assert_eq!(right.text, "12");
        assert_eq!((right.x, right.y), (150.0, 13.0));
        assert_eq!(right.width, 20.0);
        assert_eq!((right.text_x, right.text_y), (155.0, 24.0));

        let left = &badges[1];
        assert_eq!(left.side, BadgeSide::Left);
        assert_eq!(left.width, 15.0);
        assert_eq!(left.x, 95.0);
    }

    #[test]
    fn collision_serializes_as_star() {
        let json = serde_json::to_string(&DisplayValue::Collision).unwrap();
        assert_eq!(json, "\"*\"");
        assert_eq!(serde_json::to_string(&DisplayValue::Count(2.0)).unwrap(), "2.0");
    }
}
