//! Engine-free model of the arcade heads-up display.
//!
//! [`HudView`] owns a small [`SceneTree`] of visual elements (panels, hearts,
//! score text, the boss health bar, the end screen) and pushes host state into
//! their visual properties once per frame. Renderers walk [`SceneTree::draw_list`]
//! to draw the result; the `arcade_hud` crate does this for bevy.

mod animation;
mod color;
mod config;
mod host;
mod layout;
mod scene;
mod view;

use std::path::PathBuf;

use thiserror::Error;

pub use animation::{bounce_scale, decay_bounce, decay_flash, ease_alpha, prompt_pulse};
pub use color::{interpolate_color, Rgb};
pub use config::{AnimationConfig, HudConfig, LayoutConfig, Palette, TextureMetrics};
pub use host::{BossId, HudHost, PlayerProbe, StaticHost};
pub use layout::HudLayout;
pub use scene::{DrawItem, Node, NodeId, NodeKind, SceneTree};
pub use view::{HudView, GAMEOVER_TEXT, MAX_LIVES, VICTORY_TEXT};

pub type HudResult<T> = Result<T, HudError>;

#[derive(Debug, Error)]
pub enum HudError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
