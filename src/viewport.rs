use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::config::DiagramConfig;
use crate::error::Result;
use crate::geometry::{bounding_box, fit_scale, BoundingBox, ScaleExtent, Transform};
use crate::model::{Entity, PathwayGraph};

/// Extra room left on each side of the x axis when zooming into reactions.
const ZOOM_PADDING: f64 = 50.0;

/// Reactome ids of the entities framed by a sub-pathway zoom. Empty means the
/// whole diagram is in view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ZoomScope(BTreeSet<String>);

impl ZoomScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, reactome_id: &str) -> bool {
        self.0.contains(reactome_id)
    }

    /// True when the whole diagram is in view or the id is framed.
    pub fn admits(&self, reactome_id: &str) -> bool {
        self.is_empty() || self.contains(reactome_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for ZoomScope {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ViewState {
    FullView,
    #[serde(rename_all = "camelCase")]
    ZoomedSubpathway { reaction_ids: Vec<String> },
}

/// Result of entering the zoomed state.
#[derive(Clone, Debug, PartialEq)]
pub struct Zoom {
    pub transform: Transform,
    pub scope: ZoomScope,
}

/// Owns the full-view and sub-pathway transforms of one diagram.
#[derive(Clone, Debug)]
pub struct Viewport {
    config: DiagramConfig,
    full_box: BoundingBox,
    full_view: Transform,
    scale_extent: ScaleExtent,
    state: ViewState,
    transform: Transform,
}

impl Viewport {
    pub fn new<G: PathwayGraph + ?Sized>(graph: &G, config: DiagramConfig) -> Result<Self> {
        config.validate()?;
        let full_box = bounding_box(graph.entities())?;
        let scale_extent = ScaleExtent::around(fit_scale(&full_box, config.canvas())?);
        let full_view = Transform::fit(&full_box, config.canvas(), config.init_scale_factor)?;
        Ok(Self {
            config,
            full_box,
            full_view,
            scale_extent,
            state: ViewState::FullView,
            transform: full_view,
        })
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn full_box(&self) -> BoundingBox {
        self.full_box
    }

    /// Zoom limits for user panning/zooming, derived from the undamped fit of
    /// the whole diagram.
    pub fn scale_extent(&self) -> ScaleExtent {
        self.scale_extent
    }

    /// Frame only the entities taking part in `reaction_ids`. Ids that match
    /// no reaction are ignored; if nothing matches the request fails with
    /// `InvalidGeometry` and the current state is kept.
    pub fn zoom_to<G: PathwayGraph + ?Sized>(
        &mut self,
        graph: &G,
        reaction_ids: &[String],
    ) -> Result<Zoom> {
        let requested: HashSet<&str> = reaction_ids.iter().map(String::as_str).collect();
        let entities: Vec<&Entity> = graph
            .reactions()
            .iter()
            .filter(|reaction| requested.contains(reaction.reactome_id.as_str()))
            .flat_map(|reaction| graph.entities_in_reaction(reaction))
            .collect();

        let bbox = bounding_box(entities.iter().copied())?.pad_horizontal(ZOOM_PADDING);
        let transform = Transform::fit(&bbox, self.config.canvas(), self.config.init_scale_factor)?;
        let scope: ZoomScope = entities
            .iter()
            .map(|entity| entity.reactome_id.as_str())
            .collect();

        tracing::debug!(
            reactions = reaction_ids.len(),
            entities = entities.len(),
            scale = transform.scale,
            "zoomed into sub-pathway"
        );
        self.state = ViewState::ZoomedSubpathway {
            reaction_ids: reaction_ids.to_vec(),
        };
        self.transform = transform;
        Ok(Zoom { transform, scope })
    }

    /// Return to the whole-diagram view. The full-view transform is fixed
    /// when the viewport is built, so every reset lands on the same frame.
    pub fn reset(&mut self) -> Transform {
        self.state = ViewState::FullView;
        self.transform = self.full_view;
        self.transform
    }
}
