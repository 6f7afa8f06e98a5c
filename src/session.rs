use serde::Serialize;

use crate::config::DiagramConfig;
use crate::error::Result;
use crate::geometry::{ScaleExtent, Transform};
use crate::highlight::{resolve_highlights, DrugRecord, MutationRecord, ResolvedHighlights};
use crate::model::{Entity, PathwayGraph};
use crate::routing::{reaction_labels, route, stack_arrowed_last, ReactionLabel, Segment};
use crate::viewport::{ViewState, Viewport, ZoomScope};

/// Everything the drawing side needs for one render pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub transform: Transform,
    pub scale_extent: ScaleExtent,
    pub view: ViewState,
    pub segments: Vec<Segment>,
    pub labels: Vec<ReactionLabel>,
    pub scope: ZoomScope,
}

/// One loaded diagram plus the zoom scope of its latest render.
pub struct DiagramSession<G> {
    graph: G,
    viewport: Viewport,
    scope: ZoomScope,
}

impl<G: PathwayGraph> DiagramSession<G> {
    pub fn new(graph: G, config: DiagramConfig) -> Result<Self> {
        let viewport = Viewport::new(&graph, config)?;
        Ok(Self {
            graph,
            viewport,
            scope: ZoomScope::new(),
        })
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scope(&self) -> &ZoomScope {
        &self.scope
    }

    /// Route every reaction and frame either the whole diagram or, when
    /// `zoom_on` names reactions, just the entities taking part in them.
    pub fn render<S: AsRef<str>>(&mut self, zoom_on: &[S]) -> Result<Frame> {
        let reaction_ids: Vec<String> = zoom_on
            .iter()
            .map(|id| id.as_ref().trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();

        let transform = if reaction_ids.is_empty() {
            self.scope.clear();
            self.viewport.reset()
        } else {
            let zoom = self.viewport.zoom_to(&self.graph, &reaction_ids)?;
            self.scope = zoom.scope;
            zoom.transform
        };

        let reactions = self.graph.reactions();
        let mut segments = route(&self.graph, reactions);
        stack_arrowed_last(&mut segments);

        Ok(Frame {
            transform,
            scale_extent: self.viewport.scale_extent(),
            view: self.viewport.state().clone(),
            segments,
            labels: reaction_labels(reactions),
            scope: self.scope.clone(),
        })
    }

    /// Back to the whole-diagram view; the zoom scope is cleared.
    pub fn reset(&mut self) -> Transform {
        self.scope.clear();
        self.viewport.reset()
    }

    pub fn highlight(
        &self,
        mutations: &[MutationRecord],
        drugs: &[DrugRecord],
        overlaps: &[String],
    ) -> ResolvedHighlights {
        resolve_highlights(&self.graph, mutations, drugs, overlaps, &self.scope)
    }

    /// Whether a clicked entity belongs to the framed sub-pathway.
    pub fn is_part_of_pathway(&self, entity: &Entity) -> bool {
        self.scope.admits(&entity.reactome_id)
    }
}
