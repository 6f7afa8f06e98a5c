use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::geometry::Canvas;

pub const DEFAULT_CANVAS_WIDTH: f64 = 500.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 500.0;
pub const DEFAULT_INIT_SCALE_FACTOR: f64 = 0.90;

/// Canvas size and the damping applied to every fitted scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagramConfig {
    pub width: f64,
    pub height: f64,
    pub init_scale_factor: f64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            init_scale_factor: DEFAULT_INIT_SCALE_FACTOR,
        }
    }
}

impl DiagramConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.width.is_finite()) {
            return Err(LayoutError::InvalidConfig(format!(
                "canvas width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height > 0.0 && self.height.is_finite()) {
            return Err(LayoutError::InvalidConfig(format!(
                "canvas height must be positive, got {}",
                self.height
            )));
        }
        if !(self.init_scale_factor > 0.0 && self.init_scale_factor <= 1.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "initScaleFactor must be in (0, 1], got {}",
                self.init_scale_factor
            )));
        }
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }
}
