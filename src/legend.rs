use serde::Serialize;

use crate::error::Result;
use crate::highlight::{resolve_overlaps, resolve_values, HighlightSource, ResolvedHighlights};
use crate::model::{Entity, EntityKind, PathwayModel, Point, ReactionKind, Size};
use crate::routing::ReactionLabel;
use crate::viewport::ZoomScope;

const SAMPLE_WIDTH: f64 = 110.0;
const SAMPLE_HEIGHT: f64 = 30.0;
const COLUMN_STEP: f64 = 130.0;
const ROW_STEP: f64 = 45.0;
const LINE_LENGTH: f64 = 80.0;
const LINE_STEP: f64 = 25.0;
const LABEL_INDENT: f64 = 40.0;
const LABEL_CAPTION_INDENT: f64 = 80.0;
const LABEL_CAPTION_RAISE: f64 = 15.0;
const LABEL_STEP: f64 = 25.0;
const SAMPLE_HIGHLIGHT_VALUE: f64 = 99.0;

const ENTITY_MARGIN: (f64, f64) = (20.0, 0.0);
const LINE_MARGIN_LEFT: f64 = 40.0;
const LINE_TOP_RATIO: f64 = 0.50;
const LABEL_MARGIN_LEFT: f64 = 35.0;
const LABEL_TOP_RATIO: f64 = 0.72;

const MUTATED_ID: &str = "mutated";
const DRUGGABLE_ID: &str = "druggable";
const OVERLAPPING_ID: &str = "overlapping";
const SAMPLE_REACTOME_ID: &str = "fake";

/// Grid cells of the entity legend; `None` leaves a cell empty so the badge
/// caption beside the previous sample has room.
const ENTITY_SAMPLES: [Option<(&str, EntityKind)>; 13] = [
    Some(("Complex", EntityKind::Complex)),
    Some(("Protein", EntityKind::Protein)),
    Some(("EntitySet", EntityKind::EntitySet)),
    Some(("Chemical", EntityKind::Chemical)),
    Some(("Compartment", EntityKind::Compartment)),
    Some(("ProcessNode", EntityKind::ProcessNode)),
    Some(("Failed Output", EntityKind::Failed)),
    Some(("LossOfFunction", EntityKind::EntitySet)),
    Some(("Mutated Gene(s)", EntityKind::Protein)),
    None,
    Some(("Targetable Gene(s)", EntityKind::Protein)),
    None,
    Some(("Overlapping Gene(s)", EntityKind::OverlappedEntitySet)),
];

const LINE_SAMPLES: [&str; 6] = [
    "Output",
    "Catalyst",
    "Activator",
    "Inhibitor",
    "Link",
    "Disease-Associated",
];

/// Reaction kinds shown in the legend with the caption printed beside each.
const LABEL_SAMPLES: [(ReactionKind, &str); 5] = [
    (ReactionKind::Association, "Association/Binding"),
    (ReactionKind::Dissociation, "Dissociation"),
    (ReactionKind::Transition, "Transition"),
    (ReactionKind::OmittedProcess, "Omitted Process"),
    (ReactionKind::Uncertain, "Uncertain"),
];

/// Sample connector drawn next to its caption.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLine {
    pub caption: String,
    pub start: Point,
    pub end: Point,
    pub arrowed: bool,
    pub failed: bool,
}

/// Reaction glyph sample and the caption box to its right.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLabel {
    pub caption: String,
    pub caption_at: Point,
    #[serde(flatten)]
    pub label: ReactionLabel,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub entities: Vec<Entity>,
    pub lines: Vec<LegendLine>,
    pub labels: Vec<LegendLabel>,
    pub highlights: ResolvedHighlights,
}

/// A fixed magnitude pinned on one sample entity.
struct SampleHighlight {
    entity_refs: Vec<String>,
    value: f64,
}

impl SampleHighlight {
    fn on(reactome_id: &str) -> Self {
        Self {
            entity_refs: vec![reactome_id.to_string()],
            value: SAMPLE_HIGHLIGHT_VALUE,
        }
    }
}

impl HighlightSource for SampleHighlight {
    fn entity_refs(&self) -> &[String] {
        &self.entity_refs
    }

    fn magnitude(&self) -> f64 {
        self.value
    }
}

fn sample_id(caption: &str) -> (String, String) {
    match caption {
        "Mutated Gene(s)" => (MUTATED_ID.to_string(), MUTATED_ID.to_string()),
        "Targetable Gene(s)" => (DRUGGABLE_ID.to_string(), DRUGGABLE_ID.to_string()),
        "Overlapping Gene(s)" => (OVERLAPPING_ID.to_string(), OVERLAPPING_ID.to_string()),
        other => (format!("legend-{other}"), SAMPLE_REACTOME_ID.to_string()),
    }
}

pub fn legend_entities(margin_left: f64, margin_top: f64) -> Vec<Entity> {
    ENTITY_SAMPLES
        .iter()
        .enumerate()
        .filter_map(|(index, sample)| {
            let (caption, kind) = (*sample)?;
            let column = (index % 2) as f64;
            let row = (index / 2) as f64;
            let position = Point::new(margin_left + column * COLUMN_STEP, margin_top + row * ROW_STEP);
            let (id, reactome_id) = sample_id(caption);
            let mut entity = Entity::new(
                id,
                reactome_id,
                kind,
                position,
                Size::new(SAMPLE_WIDTH, SAMPLE_HEIGHT),
            );
            entity.text = Some(caption.to_string());
            entity.crossed = caption == "Failed Output";
            entity.lof = caption == "LossOfFunction";
            Some(entity)
        })
        .collect()
}

pub fn legend_lines(margin_left: f64, margin_top: f64) -> Vec<LegendLine> {
    LINE_SAMPLES
        .iter()
        .enumerate()
        .map(|(index, caption)| {
            let y = margin_top + index as f64 * LINE_STEP;
            LegendLine {
                caption: caption.to_string(),
                start: Point::new(margin_left, y),
                end: Point::new(margin_left + LINE_LENGTH, y),
                arrowed: *caption != "Link",
                failed: *caption == "Disease-Associated",
            }
        })
        .collect()
}

pub fn legend_labels(margin_left: f64, margin_top: f64) -> Vec<LegendLabel> {
    LABEL_SAMPLES
        .iter()
        .enumerate()
        .map(|(index, (kind, caption))| {
            let y = margin_top + index as f64 * LABEL_STEP;
            LegendLabel {
                caption: caption.to_string(),
                caption_at: Point::new(margin_left + LABEL_CAPTION_INDENT, y - LABEL_CAPTION_RAISE),
                label: ReactionLabel {
                    x: margin_left + LABEL_INDENT,
                    y,
                    reaction_kind: kind.clone(),
                    description: None,
                    id: SAMPLE_REACTOME_ID.to_string(),
                },
            }
        })
        .collect()
}

/// Lay out the legend panel for a viewport `height` units tall.
pub fn legend(height: f64) -> Result<Legend> {
    let entities = legend_entities(ENTITY_MARGIN.0, ENTITY_MARGIN.1);
    let lines = legend_lines(LINE_MARGIN_LEFT, (height * LINE_TOP_RATIO).ceil());
    let labels = legend_labels(LABEL_MARGIN_LEFT, (height * LABEL_TOP_RATIO).ceil());

    let samples: Vec<Entity> = entities
        .iter()
        .filter(|entity| entity.reactome_id != SAMPLE_REACTOME_ID)
        .cloned()
        .collect();
    let graph = PathwayModel::new(samples, Vec::new())?;
    let scope: ZoomScope = [MUTATED_ID, DRUGGABLE_ID, OVERLAPPING_ID].into_iter().collect();
    let highlights = ResolvedHighlights {
        mutation_values: resolve_values(&graph, &[SampleHighlight::on(MUTATED_ID)], &scope),
        drug_values: resolve_values(&graph, &[SampleHighlight::on(DRUGGABLE_ID)], &scope),
        overlapping_ids: resolve_overlaps(&graph, &[OVERLAPPING_ID.to_string()], &scope),
    };

    Ok(Legend {
        entities,
        lines,
        labels,
        highlights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::DisplayValue;

    #[test]
    fn grid_skips_cells_after_badge_samples() {
        let entities = legend_entities(20.0, 0.0);
        assert_eq!(entities.len(), 11);

        let druggable = entities.iter().find(|e| e.id == DRUGGABLE_ID).unwrap();
        assert_eq!(druggable.position, Point::new(20.0, 225.0));
        let overlapping = entities.iter().find(|e| e.id == OVERLAPPING_ID).unwrap();
        assert_eq!(overlapping.position, Point::new(20.0, 270.0));
        assert_eq!(overlapping.kind, EntityKind::OverlappedEntitySet);
    }

    #[test]
    fn failed_and_lof_samples_are_flagged() {
        let entities = legend_entities(0.0, 0.0);
        let failed = entities.iter().find(|e| e.kind == EntityKind::Failed).unwrap();
        assert!(failed.crossed);
        assert!(entities.iter().any(|e| e.lof && e.kind == EntityKind::EntitySet));
        assert_eq!(entities[1].position, Point::new(130.0, 0.0));
    }

    #[test]
    fn link_sample_has_no_marker() {
        let lines = legend_lines(40.0, 100.0);
        assert_eq!(lines.len(), 6);
        let link = lines.iter().find(|l| l.caption == "Link").unwrap();
        assert!(!link.arrowed);
        assert_eq!(link.start, Point::new(40.0, 200.0));
        assert_eq!(link.end, Point::new(120.0, 200.0));
        assert!(lines.last().unwrap().failed);
    }

    #[test]
    fn sample_highlights_use_ninety_nine() {
        let legend = legend(671.0).unwrap();
        assert_eq!(
            legend.highlights.mutation_values.get(MUTATED_ID),
            Some(&DisplayValue::Count(99.0))
        );
        assert_eq!(
            legend.highlights.drug_values.get(DRUGGABLE_ID),
            Some(&DisplayValue::Count(99.0))
        );
        assert!(legend.highlights.overlapping_ids.contains(OVERLAPPING_ID));
        assert_eq!(legend.lines[0].start.y, 336.0);
        assert_eq!(legend.labels[0].label.y, 484.0);
        assert_eq!(legend.labels[3].label.reaction_kind, ReactionKind::OmittedProcess);
    }

    #[test]
    fn association_sample_is_captioned_with_binding() {
        let labels = legend_labels(35.0, 100.0);
        let captions: Vec<&str> = labels.iter().map(|l| l.caption.as_str()).collect();
        assert_eq!(
            captions,
            ["Association/Binding", "Dissociation", "Transition", "Omitted Process", "Uncertain"]
        );
        assert_eq!(labels[0].label.reaction_kind, ReactionKind::Association);
        assert_eq!(labels[0].label.x, 75.0);
        assert_eq!(labels[1].caption_at, Point::new(115.0, 110.0));
    }

    #[test]
    fn sample_labels_serialize_flat_with_caption() {
        let json = serde_json::to_value(&legend_labels(0.0, 0.0)[0]).unwrap();
        assert_eq!(json["caption"], "Association/Binding");
        assert_eq!(json["reactionKind"], "Association");
        assert_eq!(json["x"], 40.0);
    }
}
