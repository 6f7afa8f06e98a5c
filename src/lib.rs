//! Layout and annotation engine for Reactome pathway diagrams.
//!
//! Entities sit on curated coordinates; this crate frames them inside a
//! canvas, rebuilds reaction connectors from curated control points and
//! resolves mutation/drug/overlap annotations onto the entities in view.

pub mod config;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod legend;
pub mod model;
pub mod routing;
pub mod session;
pub mod viewport;

pub use config::DiagramConfig;
pub use error::{LayoutError, Result};
pub use geometry::{bounding_box, centering_offset, fit_scale, BoundingBox, Canvas, ScaleExtent, Transform};
pub use highlight::{
    resolve_highlights, Badge, BadgeSide, DisplayValue, DrugRecord, MutationRecord, ResolvedHighlights,
};
pub use model::{
    Entity, EntityKind, PathwayGraph, PathwayModel, PathwaySnapshot, Point, Reaction, ReactionKind, Role,
    RoleEdge, Size,
};
pub use routing::{reaction_labels, route, Marker, ReactionLabel, Segment, Terminator};
pub use session::{DiagramSession, Frame};
pub use viewport::{ViewState, Viewport, ZoomScope};
