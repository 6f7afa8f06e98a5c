use serde::Serialize;

use crate::error::{LayoutError, Result};
use crate::model::{Entity, Point};

/// Lower bound of the interactive zoom range, relative to the fit scale.
const MIN_ZOOM_RATIO: f64 = 0.9;
/// Upper bound of the interactive zoom range, relative to the fit scale.
const MAX_ZOOM_RATIO: f64 = 17.0;

/// Extent of a set of entities. `width`/`height` hold the far edges
/// (max x + w, max y + h) and `min_width`/`min_height` the near edges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
    pub min_width: f64,
    pub min_height: f64,
}

impl BoundingBox {
    pub fn content_width(&self) -> f64 {
        self.width - self.min_width
    }

    pub fn content_height(&self) -> f64 {
        self.height - self.min_height
    }

    /// Widen the box by `margin` on both sides of the x axis.
    pub fn pad_horizontal(mut self, margin: f64) -> Self {
        self.width += margin;
        self.min_width -= margin;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Fold entity extents into a bounding box.
pub fn bounding_box<'a, I>(entities: I) -> Result<BoundingBox>
where
    I: IntoIterator<Item = &'a Entity>,
{
    let mut seen = false;
    let bbox = entities.into_iter().fold(
        BoundingBox {
            width: 0.0,
            height: 0.0,
            min_width: f64::INFINITY,
            min_height: f64::INFINITY,
        },
        |mut bbox, entity| {
            seen = true;
            bbox.width = bbox.width.max(entity.position.x + entity.size.width);
            bbox.height = bbox.height.max(entity.position.y + entity.size.height);
            bbox.min_width = bbox.min_width.min(entity.position.x);
            bbox.min_height = bbox.min_height.min(entity.position.y);
            bbox
        },
    );
    if !seen {
        return Err(LayoutError::InvalidGeometry);
    }
    Ok(bbox)
}

/// Largest scale at which the box content fits the canvas on both axes.
/// A box with no extent on either axis has no such scale.
pub fn fit_scale(bbox: &BoundingBox, canvas: Canvas) -> Result<f64> {
    let scale = (canvas.height / bbox.content_height()).min(canvas.width / bbox.content_width());
    if !scale.is_finite() || scale <= 0.0 {
        return Err(LayoutError::InvalidGeometry);
    }
    Ok(scale)
}

pub fn centering_offset(bbox: &BoundingBox, canvas: Canvas, scale: f64) -> Point {
    Point {
        x: (canvas.width - bbox.content_width() * scale) / 2.0,
        y: (canvas.height - bbox.content_height() * scale) / 2.0,
    }
}

/// Scale-then-translate transform applied to diagram coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform {
    /// Frame `bbox` inside `canvas`, shrinking the fit scale by `damping` to
    /// leave a margin, and centering the result.
    pub fn fit(bbox: &BoundingBox, canvas: Canvas, damping: f64) -> Result<Self> {
        let scale = fit_scale(bbox, canvas)? * damping;
        let offset = centering_offset(bbox, canvas, scale);
        Ok(Self {
            scale,
            translate_x: -bbox.min_width * scale + offset.x,
            translate_y: -bbox.min_height * scale + offset.y,
        })
    }

    pub fn map_point(&self, point: Point) -> Point {
        Point {
            x: point.x * self.scale + self.translate_x,
            y: point.y * self.scale + self.translate_y,
        }
    }
}

/// Bounds for user-driven zooming layered on top of the computed transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScaleExtent {
    pub min: f64,
    pub max: f64,
}

impl ScaleExtent {
    pub fn around(fit_scale: f64) -> Self {
        Self {
            min: fit_scale * MIN_ZOOM_RATIO,
            max: fit_scale * MAX_ZOOM_RATIO,
        }
    }

    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}
