use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{HudError, HudResult, Rgb};

/// Screen-relative layout constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f32,
    pub height: f32,
    /// Fraction of the screen width taken by each side column.
    pub edge: f32,
    pub pad: f32,
    pub font_size: f32,
    pub stroke: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            edge: 0.235,
            pad: 13.0,
            font_size: 25.0,
            stroke: 3.0,
        }
    }
}

/// Night/day colour pairs. Each pair is blended by the day phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub panel_night: Rgb,
    pub panel_day: Rgb,
    pub background_night: Rgb,
    pub background_day: Rgb,
    pub box_night: Rgb,
    pub box_day: Rgb,
    pub health_low: Rgb,
    pub health_high: Rgb,
    pub health_bg_night: Rgb,
    pub health_bg_day: Rgb,
    pub flash: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            panel_night: Rgb::from_hex(0x363a4b - 0x101010),
            panel_day: Rgb::from_hex(0x494333 - 0x101010),
            background_night: Rgb::from_hex(0xb8c5ff),
            background_day: Rgb::from_hex(0xf7e3af),
            box_night: Rgb::from_hex(0xddeeff),
            box_day: Rgb::from_hex(0x110900),
            health_low: Rgb::from_hex(0xd81b60),
            health_high: Rgb::from_hex(0x43a047),
            health_bg_night: Rgb::from_hex(0x000000),
            health_bg_day: Rgb::from_hex(0xaabbff),
            flash: Rgb::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Fraction of the flash removed per update call. Not scaled by frame time.
    pub flash_decay: f32,
    pub bounce_rate: f32,
    pub pulse_amplitude: f32,
    pub pulse_speed: f32,
    pub outline_alpha: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            flash_decay: 0.3,
            bounce_rate: 10.0,
            pulse_amplitude: 0.02,
            pulse_speed: 5.0,
            outline_alpha: 0.25,
        }
    }
}

/// Source pixel sizes of the textures whose display size drives layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureMetrics {
    pub health_box: Vec2,
    pub clock_frame: Vec2,
    pub heart: Vec2,
    pub outline: Vec2,
}

impl Default for TextureMetrics {
    fn default() -> Self {
        Self {
            health_box: Vec2::new(1010.0, 70.0),
            clock_frame: Vec2::new(256.0, 256.0),
            heart: Vec2::new(128.0, 112.0),
            outline: Vec2::new(900.0, 2160.0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    pub layout: LayoutConfig,
    pub palette: Palette,
    pub animation: AnimationConfig,
    pub textures: TextureMetrics,
}

impl HudConfig {
    pub fn from_json_str(raw: &str) -> HudResult<Self> {
        let config: HudConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> HudResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| HudError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        info!(target: "hud_view", path = %path.display(), "loaded HUD config");
        Ok(config)
    }

    pub fn validate(&self) -> HudResult<()> {
        let layout = &self.layout;
        if !(layout.width > 0.0 && layout.height > 0.0) {
            return Err(HudError::InvalidConfig(format!(
                "screen size must be positive, got {}x{}",
                layout.width, layout.height
            )));
        }
        if !(layout.edge > 0.0 && layout.edge < 0.5) {
            return Err(HudError::InvalidConfig(format!(
                "edge fraction must be within (0, 0.5), got {}",
                layout.edge
            )));
        }
        if !(0.0..=1.0).contains(&self.animation.flash_decay) {
            return Err(HudError::InvalidConfig(format!(
                "flash decay must be within [0, 1], got {}",
                self.animation.flash_decay
            )));
        }

        let textures = [
            ("health_box", self.textures.health_box),
            ("clock_frame", self.textures.clock_frame),
            ("heart", self.textures.heart),
            ("outline", self.textures.outline),
        ];
        for (name, size) in textures {
            if size.x <= 0.0 || size.y <= 0.0 {
                return Err(HudError::InvalidConfig(format!(
                    "texture {name} must have a positive size"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() -> anyhow::Result<()> {
        let config = HudConfig::from_json_str("{}")?;

        assert_eq!(config, HudConfig::default());
        assert_eq!(config.animation.flash_decay, 0.3);
        assert_eq!(config.palette.panel_night.to_hex(), 0x262a3b);
        assert_eq!(config.palette.panel_day.to_hex(), 0x393323);
        Ok(())
    }

    #[test]
    fn partial_sections_keep_other_defaults() -> anyhow::Result<()> {
        let raw = r##"{
            "layout": { "width": 1280, "height": 720 },
            "palette": { "health_low": "#ff0000" }
        }"##;
        let config = HudConfig::from_json_str(raw)?;

        assert_eq!(config.layout.width, 1280.0);
        assert_eq!(config.layout.edge, 0.235);
        assert_eq!(config.palette.health_low.to_hex(), 0xff0000);
        assert_eq!(config.palette.health_high.to_hex(), 0x43a047);
        Ok(())
    }

    #[test]
    fn rejects_out_of_range_values() {
        let wide_edge = r#"{ "layout": { "edge": 0.7 } }"#;
        let flat_screen = r#"{ "layout": { "height": 0 } }"#;
        let decay = r#"{ "animation": { "flash_decay": 1.5 } }"#;

        for raw in [wide_edge, flat_screen, decay] {
            assert!(matches!(
                HudConfig::from_json_str(raw),
                Err(HudError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn reports_missing_file() {
        let result = HudConfig::load("does/not/exist.json");
        assert!(matches!(result, Err(HudError::Io { .. })));
    }
}
