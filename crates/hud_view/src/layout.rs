use glam::Vec2;

use crate::LayoutConfig;

/// Screen constants of the owning scene plus the derived column anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudLayout {
    pub width: f32,
    pub height: f32,
    pub center: Vec2,
    pub edge: f32,
    pub pad: f32,
    pub font_size: f32,
    pub stroke: f32,
}

impl HudLayout {
    pub fn new(width: f32, height: f32) -> Self {
        Self::from_config(&LayoutConfig {
            width,
            height,
            ..LayoutConfig::default()
        })
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            center: Vec2::new(config.width / 2.0, config.height / 2.0),
            edge: config.edge,
            pad: config.pad,
            font_size: config.font_size,
            stroke: config.stroke,
        }
    }

    /// Inner edge of the left column.
    pub fn left_x(&self) -> f32 {
        self.edge * self.width - self.pad
    }

    /// Centre of the right column.
    pub fn right_column_x(&self) -> f32 {
        (1.0 - self.edge / 2.0) * self.width
    }

    pub fn panel_width(&self) -> f32 {
        0.92 * self.edge * self.width
    }
}
