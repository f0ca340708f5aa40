use glam::Vec2;
use tracing::{debug, info};

use crate::animation::{bounce_scale, decay_bounce, decay_flash, ease_alpha, prompt_pulse};
use crate::{
    interpolate_color, AnimationConfig, BossId, HudConfig, HudHost, HudLayout, Node, NodeId,
    NodeKind, Palette, Rgb, SceneTree,
};

pub const MAX_LIVES: usize = 5;
pub const GAMEOVER_TEXT: &str = "GAME OVER";
pub const VICTORY_TEXT: &str = "VICTORY";

const PANEL_RADIUS: f32 = 10.0;
const PANEL_FILL: u32 = 0x3a3a3a;
const BAR_INSET: f32 = 5.0;
const HEART_SPACING: f32 = 35.0;
const HEART_ZIGZAG: f32 = 16.0;
const HITBOX_COLOR: u32 = 0xe91e63;

/// The heads-up display: element tree plus the transient animation scalars.
#[derive(Debug, Clone)]
pub struct HudView {
    tree: SceneTree,
    layout: HudLayout,
    palette: Palette,
    animation: AnimationConfig,

    background: NodeId,
    outline_day: NodeId,
    outline_night: NodeId,
    clock: NodeId,
    panels: [NodeId; 4],

    health: NodeId,
    health_box: NodeId,
    health_bg: NodeId,
    health_bar: NodeId,
    health_flash: f32,

    hearts: [NodeId; MAX_LIVES],

    world: NodeId,
    stage: NodeId,
    debug: NodeId,
    highscore: NodeId,
    score: NodeId,
    score_bounce: f32,

    end_screen: NodeId,
    end_text: NodeId,
    play_again: NodeId,

    player_hitbox: NodeId,

    boss: Option<BossId>,
}

impl HudView {
    pub fn new(layout: HudLayout, config: &HudConfig) -> Self {
        let mut tree = SceneTree::new();
        let root = tree.root();
        let textures = &config.textures;

        let cx = layout.center.x;
        let cy = layout.center.y;
        let pad = layout.pad;
        let font = layout.font_size;
        let stroke = layout.stroke;
        let panel_w = layout.panel_width();
        let black = Rgb::BLACK;
        let white = Rgb::WHITE;
        let panel_fill = Rgb::from_hex(PANEL_FILL);

        let background = tree.add(
            root,
            Node::image(
                "background",
                "ui_bg",
                Vec2::new(layout.width, layout.height),
                layout.center,
            ),
        );

        let outline_day = tree.add(
            root,
            Node::image(
                "outline_day",
                "america_outline2",
                textures.outline,
                Vec2::new(0.0, cy),
            )
            .with_origin(0.0, 0.5)
            .with_scale(0.5),
        );
        let outline_night = tree.add(
            root,
            Node::image(
                "outline_night",
                "owl_outline2",
                textures.outline,
                Vec2::new(0.0, cy),
            )
            .with_origin(0.0, 0.5)
            .with_scale(0.5),
        );

        // Clock
        let clock_pos = Vec2::new(layout.right_column_x(), 0.55 * layout.height);
        let clock = tree.add(
            root,
            Node::image("clock", "ui_clock", textures.clock_frame, clock_pos).with_scale(0.5),
        );
        let clock_height = 0.5 * textures.clock_frame.y;
        let clock_bg = tree.add(
            root,
            Node::round_rect(
                "clock_bg",
                Vec2::new(panel_w, clock_height + pad),
                PANEL_RADIUS,
                panel_fill,
                clock_pos,
            ),
        );
        tree.move_down(clock_bg);

        // Boss health
        let health = tree.add(
            root,
            Node::container("boss_health", Vec2::ZERO).with_visible(false),
        );
        let box_pos = Vec2::new(cx, 0.06 * cy);
        let health_box = tree.add(
            health,
            Node::image("health_box", "ui_healthbar", textures.health_box, box_pos)
                .with_scale(0.5),
        );
        let box_display = 0.5 * textures.health_box;
        let bar_size = box_display - Vec2::splat(BAR_INSET);
        let bar_pos = box_pos - bar_size / 2.0;
        let health_bg = tree.add(
            health,
            Node::rect("health_bg", bar_size, black, bar_pos)
                .with_origin(0.0, 0.0)
                .with_alpha(0.6),
        );
        let health_bar = tree.add(
            health,
            Node::rect("health_bar", bar_size, black, bar_pos).with_origin(0.0, 0.0),
        );
        tree.bring_to_top(health_box);

        // Hearts
        let hx = layout.right_column_x();
        let hy = 0.9 * layout.height;
        let hearts_bg = tree.add(
            root,
            Node::round_rect(
                "hearts_bg",
                Vec2::new(panel_w, 86.0),
                PANEL_RADIUS,
                panel_fill,
                Vec2::new(hx, hy),
            ),
        );

        let hearts = std::array::from_fn(|i| {
            let side = if i % 2 == 0 { -1.0 } else { 1.0 };
            let pos = Vec2::new(
                hx - 2.0 * HEART_SPACING + HEART_SPACING * i as f32,
                hy + HEART_ZIGZAG * side,
            );
            tree.add(
                root,
                Node::image(format!("heart_empty_{i}"), "ui_heart_empty", textures.heart, pos)
                    .with_scale(0.4),
            );
            tree.add(
                root,
                Node::image(format!("heart_{i}"), "ui_heart", textures.heart, pos).with_scale(0.4),
            )
        });

        tree.add(
            root,
            Node::text("lives_label", "Lives", font, black, Vec2::new(hx, hy - 50.0))
                .with_origin(0.5, 1.0)
                .with_stroke(white, stroke),
        );

        // Text
        let left_column = layout.left_x() / 2.0;
        let world = tree.add(
            root,
            Node::text("world", "", 1.4 * font, black, Vec2::new(left_column, 4.0 * pad))
                .with_stroke(white, 1.4 * stroke),
        );
        let stage = tree.add(
            root,
            Node::text("stage", "", 0.75 * font, black, Vec2::new(left_column, 7.0 * pad))
                .with_stroke(white, 0.85 * stroke),
        );

        let mut ty = 0.7 * pad;
        let highscore_bg = tree.add(
            root,
            Node::round_rect(
                "highscore_bg",
                Vec2::new(panel_w, 67.0),
                PANEL_RADIUS,
                panel_fill,
                Vec2::new(hx, ty + 34.0),
            ),
        );
        tree.add(
            root,
            Node::text("highscore_label", "High score", font, black, Vec2::new(hx, ty))
                .with_origin(0.5, 0.0)
                .with_stroke(white, stroke),
        );
        ty += 1.2 * font;
        let highscore = tree.add(
            root,
            Node::text("highscore", "00000000", font, white, Vec2::new(hx, ty))
                .with_origin(0.5, 0.0),
        );

        ty += 2.0 * font;
        let score_bg = tree.add(
            root,
            Node::round_rect(
                "score_bg",
                Vec2::new(panel_w, 67.0),
                PANEL_RADIUS,
                panel_fill,
                Vec2::new(hx, ty + 34.0),
            ),
        );
        tree.add(
            root,
            Node::text("score_label", "Score", font, black, Vec2::new(hx, ty))
                .with_origin(0.5, 0.0)
                .with_stroke(white, stroke),
        );
        ty += 1.2 * font;
        let score = tree.add(
            root,
            Node::text("score", "00000000", font, white, Vec2::new(hx, ty)).with_origin(0.5, 0.0),
        );

        let debug = tree.add(
            root,
            Node::text("debug", "", font / 2.0, white, Vec2::ZERO).with_origin(0.0, 0.0),
        );

        // End screen
        let end_screen = tree.add(
            root,
            Node::container("end_screen", layout.center)
                .with_visible(false)
                .with_alpha(0.0),
        );
        let end_text = tree.add(
            end_screen,
            Node::text("end_text", "", 2.7 * font, white, Vec2::new(0.0, -2.0 * pad))
                .with_stroke(black, 8.0),
        );
        let play_again = tree.add(
            end_screen,
            Node::text(
                "play_again",
                "Tap to play again",
                font,
                black,
                Vec2::new(0.0, 3.0 * pad),
            )
            .with_stroke(white, stroke),
        );

        let player_hitbox = tree.add(
            root,
            Node::ellipse(
                "player_hitbox",
                Vec2::splat(8.0),
                Rgb::from_hex(HITBOX_COLOR),
                Vec2::ZERO,
            ),
        );
        tree.send_to_back(player_hitbox);

        let mut view = Self {
            tree,
            layout,
            palette: config.palette.clone(),
            animation: config.animation.clone(),
            background,
            outline_day,
            outline_night,
            clock,
            panels: [clock_bg, hearts_bg, highscore_bg, score_bg],
            health,
            health_box,
            health_bg,
            health_bar,
            health_flash: 0.0,
            hearts,
            world,
            stage,
            debug,
            highscore,
            score,
            score_bounce: 0.0,
            end_screen,
            end_text,
            play_again,
            player_hitbox,
            boss: None,
        };
        view.set_world(1);
        view.set_stage(1);
        view.set_score(0, 0);

        info!(
            target: "hud_view",
            nodes = view.tree.len(),
            width = layout.width,
            height = layout.height,
            "built HUD"
        );
        view
    }

    /// Pushes host state into the element tree. Call once per frame.
    pub fn update(&mut self, host: &impl HudHost, time: f32, delta: f32, day_phase: f32) {
        let palette = &self.palette;
        let animation = &self.animation;
        let tree = &mut self.tree;

        tree.set_alpha(self.outline_day, animation.outline_alpha * day_phase);
        tree.set_alpha(self.outline_night, animation.outline_alpha * (1.0 - day_phase));

        tree.set_frame(self.clock, if host.is_day() { 0 } else { 1 });

        // Health
        if let Some(boss) = self.boss {
            match host.boss_health(boss) {
                Some(fraction) => {
                    let box_width = tree
                        .get(self.health_box)
                        .and_then(Node::display_size)
                        .map_or(0.0, |size| size.x);
                    let fraction = fraction.clamp(0.0, 1.0);
                    tree.set_width(self.health_bar, fraction * (box_width - BAR_INSET));
                }
                None => debug!(target: "hud_view", ?boss, "attached boss reported no health"),
            }
        }

        self.health_flash = decay_flash(self.health_flash, animation.flash_decay);

        let panel = interpolate_color(palette.panel_night, palette.panel_day, day_phase);
        for id in self.panels {
            tree.set_fill(id, panel);
        }

        tree.set_tint(
            self.background,
            interpolate_color(palette.background_night, palette.background_day, day_phase),
        );
        tree.set_tint(
            self.health_box,
            interpolate_color(palette.box_night, palette.box_day, day_phase),
        );
        let bar = interpolate_color(palette.health_low, palette.health_high, day_phase);
        tree.set_fill(
            self.health_bar,
            interpolate_color(bar, palette.flash, self.health_flash),
        );
        tree.set_fill(
            self.health_bg,
            interpolate_color(palette.health_bg_night, palette.health_bg_day, day_phase),
        );

        // Game over
        if let Some(end_screen) = tree.get_mut(self.end_screen) {
            let target = if end_screen.visible { 1.0 } else { 0.0 };
            end_screen.alpha = ease_alpha(end_screen.alpha, target, delta);
        }
        let pulse = prompt_pulse(time, animation.pulse_amplitude, animation.pulse_speed);
        tree.set_scale(self.play_again, pulse, pulse);

        // Score
        self.score_bounce = decay_bounce(self.score_bounce, animation.bounce_rate, delta);
        let (sx, sy) = bounce_scale(self.score_bounce);
        tree.set_scale(self.score, sx, sy);
        tree.set_scale(self.highscore, sx, sy);

        // Player
        let player = host.player();
        tree.set_visible(self.player_hitbox, player.alive);
        tree.set_position(self.player_hitbox, player.position + player.body_offset);
    }

    pub fn set_boss(&mut self, boss: BossId) {
        self.boss = Some(boss);
        self.tree.set_visible(self.health, true);
        info!(target: "hud_view", ?boss, "boss attached");
    }

    pub fn clear_boss(&mut self) {
        if let Some(boss) = self.boss.take() {
            info!(target: "hud_view", ?boss, "boss cleared");
        }
        self.tree.set_visible(self.health, false);
    }

    pub fn on_boss_damage(&mut self, boss: BossId) {
        if self.boss == Some(boss) {
            self.health_flash = 1.0;
        } else {
            debug!(target: "hud_view", ?boss, attached = ?self.boss, "ignoring damage for detached boss");
        }
    }

    pub fn set_player_health(&mut self, health: u32) {
        for (i, heart) in self.hearts.iter().enumerate() {
            self.tree.set_visible(*heart, (i as u32) < health);
        }
    }

    pub fn set_score(&mut self, score: u64, highscore: u64) {
        self.tree.set_text(self.score, format!("{score:08}"));
        self.tree.set_text(self.highscore, format!("{highscore:08}"));
        self.score_bounce = 1.0;
    }

    pub fn show_gameover(&mut self) {
        self.show_end_screen(GAMEOVER_TEXT);
    }

    pub fn show_victory(&mut self) {
        self.show_end_screen(VICTORY_TEXT);
    }

    /// Hides the end screen; its alpha eases back to zero over the next frames.
    pub fn hide_end_screen(&mut self) {
        self.tree.set_visible(self.end_screen, false);
    }

    fn show_end_screen(&mut self, message: &str) {
        self.tree.set_visible(self.end_screen, true);
        self.tree.set_text(self.end_text, message);
        info!(target: "hud_view", message, "end screen shown");
    }

    pub fn set_world(&mut self, world: u32) {
        self.tree.set_text(self.world, format!("World — {world}"));
    }

    pub fn set_stage(&mut self, stage: u32) {
        self.tree.set_text(self.stage, format!("Stage — {stage}"));
    }

    pub fn set_debug_text(&mut self, text: impl Into<String>) {
        self.tree.set_text(self.debug, text);
    }

    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    pub fn layout(&self) -> &HudLayout {
        &self.layout
    }

    pub fn boss(&self) -> Option<BossId> {
        self.boss
    }

    pub fn boss_health_visible(&self) -> bool {
        self.tree.get(self.health).is_some_and(|node| node.visible)
    }

    pub fn health_flash(&self) -> f32 {
        self.health_flash
    }

    pub fn health_bar_width(&self) -> f32 {
        self.tree
            .get(self.health_bar)
            .and_then(Node::size)
            .map_or(0.0, |size| size.x)
    }

    pub fn health_bar_fill(&self) -> Option<Rgb> {
        self.fill_of(self.health_bar)
    }

    pub fn panel_fills(&self) -> Vec<Rgb> {
        self.panels.iter().filter_map(|id| self.fill_of(*id)).collect()
    }

    fn fill_of(&self, id: NodeId) -> Option<Rgb> {
        match &self.tree.get(id)?.kind {
            NodeKind::Rect { fill, .. }
            | NodeKind::RoundRect { fill, .. }
            | NodeKind::Text { fill, .. }
            | NodeKind::Ellipse { fill, .. } => Some(*fill),
            NodeKind::Container | NodeKind::Image { .. } => None,
        }
    }

    pub fn background_tint(&self) -> Rgb {
        self.tree
            .get(self.background)
            .map_or(Rgb::WHITE, |node| node.tint)
    }

    pub fn hearts_visible(&self) -> [bool; MAX_LIVES] {
        self.hearts
            .map(|id| self.tree.get(id).is_some_and(|node| node.visible))
    }

    pub fn score_text(&self) -> &str {
        self.tree.text(self.score).unwrap_or_default()
    }

    pub fn highscore_text(&self) -> &str {
        self.tree.text(self.highscore).unwrap_or_default()
    }

    pub fn score_bounce(&self) -> f32 {
        self.score_bounce
    }

    pub fn debug_text(&self) -> &str {
        self.tree.text(self.debug).unwrap_or_default()
    }

    pub fn world_text(&self) -> &str {
        self.tree.text(self.world).unwrap_or_default()
    }

    pub fn stage_text(&self) -> &str {
        self.tree.text(self.stage).unwrap_or_default()
    }

    pub fn end_screen_visible(&self) -> bool {
        self.tree.get(self.end_screen).is_some_and(|node| node.visible)
    }

    pub fn end_screen_alpha(&self) -> f32 {
        self.tree.get(self.end_screen).map_or(0.0, |node| node.alpha)
    }

    pub fn end_text(&self) -> &str {
        self.tree.text(self.end_text).unwrap_or_default()
    }

    pub fn clock_frame(&self) -> usize {
        match self.tree.get(self.clock).map(|node| &node.kind) {
            Some(NodeKind::Image { frame, .. }) => *frame,
            _ => 0,
        }
    }

    pub fn player_hitbox(&self) -> Option<&Node> {
        self.tree.get(self.player_hitbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlayerProbe, StaticHost};

    fn build() -> HudView {
        HudView::new(HudLayout::new(1920.0, 1080.0), &HudConfig::default())
    }

    fn host_with_boss(boss: BossId, health: f32) -> StaticHost {
        StaticHost {
            boss: Some((boss, health)),
            ..StaticHost::default()
        }
    }

    #[test]
    fn starts_with_zeroed_labels_and_full_hearts() {
        let view = build();

        assert_eq!(view.score_text(), "00000000");
        assert_eq!(view.highscore_text(), "00000000");
        assert_eq!(view.world_text(), "World — 1");
        assert_eq!(view.stage_text(), "Stage — 1");
        assert_eq!(view.hearts_visible(), [true; MAX_LIVES]);
        assert_eq!(view.boss(), None);
        assert!(!view.boss_health_visible());
        assert!(!view.end_screen_visible());
        assert_eq!(view.end_screen_alpha(), 0.0);
    }

    #[test]
    fn player_health_shows_leading_hearts() {
        let mut view = build();

        for lives in 0..=MAX_LIVES as u32 {
            view.set_player_health(lives);
            let visible = view.hearts_visible();
            for (i, shown) in visible.iter().enumerate() {
                assert_eq!(*shown, (i as u32) < lives, "lives={lives} heart={i}");
            }
            assert_eq!(visible.iter().filter(|v| **v).count(), lives as usize);
        }
    }

    #[test]
    fn score_is_zero_padded_and_resets_bounce() {
        let mut view = build();
        view.update(&StaticHost::default(), 0.0, 0.05, 0.0);
        assert!(view.score_bounce() < 1.0);

        for (score, high) in [(0, 0), (7, 1234), (99_999_999, 10_000_000)] {
            view.set_score(score, high);
            assert_eq!(view.score_text(), format!("{score:08}"));
            assert_eq!(view.highscore_text(), format!("{high:08}"));
            assert_eq!(view.score_bounce(), 1.0);
        }
        assert_eq!(view.score_text(), "99999999");
        assert_eq!(view.highscore_text(), "10000000");
    }

    #[test]
    fn damage_flashes_only_attached_boss() {
        let mut view = build();
        let boss = BossId(1);
        let other = BossId(2);

        view.on_boss_damage(boss);
        assert_eq!(view.health_flash(), 0.0);

        view.set_boss(boss);
        assert!(view.boss_health_visible());

        view.on_boss_damage(other);
        assert_eq!(view.health_flash(), 0.0);

        view.on_boss_damage(boss);
        assert_eq!(view.health_flash(), 1.0);
    }

    #[test]
    fn cleared_boss_ignores_stale_damage() {
        let mut view = build();
        let boss = BossId(9);
        view.set_boss(boss);
        view.clear_boss();

        assert_eq!(view.boss(), None);
        assert!(!view.boss_health_visible());

        view.on_boss_damage(boss);
        assert_eq!(view.health_flash(), 0.0);
    }

    #[test]
    fn flash_decays_by_constant_ratio_per_update() {
        let mut view = build();
        let boss = BossId(3);
        let host = host_with_boss(boss, 1.0);
        view.set_boss(boss);
        view.on_boss_damage(boss);

        let mut previous = view.health_flash();
        for _ in 0..30 {
            view.update(&host, 0.0, 1.0 / 60.0, 0.5);
            let current = view.health_flash();
            assert!(current < previous);
            assert!((current - previous * 0.7).abs() < 1e-6);
            previous = current;
        }
        assert!(previous < 1e-4);
    }

    #[test]
    fn flash_pushes_bar_toward_white() {
        let mut view = build();
        let boss = BossId(4);
        let host = host_with_boss(boss, 0.5);
        view.set_boss(boss);

        view.update(&host, 0.0, 0.016, 1.0);
        let calm = view.health_bar_fill().expect("bar fill");
        assert_eq!(calm, Rgb::from_hex(0x43a047));

        view.on_boss_damage(boss);
        view.update(&host, 0.0, 0.016, 1.0);
        let flashed = view.health_bar_fill().expect("bar fill");
        assert!(flashed.r > calm.r && flashed.g > calm.g && flashed.b > calm.b);
    }

    #[test]
    fn bar_width_tracks_boss_health() {
        let mut view = build();
        let boss = BossId(5);
        view.set_boss(boss);
        let full_width = 0.5 * HudConfig::default().textures.health_box.x - BAR_INSET;

        view.update(&host_with_boss(boss, 1.0), 0.0, 0.016, 0.0);
        assert!((view.health_bar_width() - full_width).abs() < 1e-3);

        view.update(&host_with_boss(boss, 0.25), 0.0, 0.016, 0.0);
        assert!((view.health_bar_width() - 0.25 * full_width).abs() < 1e-3);

        view.update(&host_with_boss(boss, 0.0), 0.0, 0.016, 0.0);
        assert_eq!(view.health_bar_width(), 0.0);

        // host no longer knows the boss: width is left alone
        view.update(&StaticHost::default(), 0.0, 0.016, 0.0);
        assert_eq!(view.health_bar_width(), 0.0);
    }

    #[test]
    fn end_screens_share_overlay_with_distinct_text() {
        let mut view = build();

        view.show_gameover();
        assert!(view.end_screen_visible());
        assert_eq!(view.end_text(), GAMEOVER_TEXT);

        view.show_victory();
        assert!(view.end_screen_visible());
        assert_eq!(view.end_text(), VICTORY_TEXT);
        assert_ne!(GAMEOVER_TEXT, VICTORY_TEXT);
    }

    #[test]
    fn end_screen_fades_in_without_overshoot() {
        let mut view = build();
        let host = StaticHost::default();
        view.show_gameover();

        let mut previous = view.end_screen_alpha();
        for _ in 0..15 {
            view.update(&host, 0.0, 0.1, 0.0);
            let alpha = view.end_screen_alpha();
            assert!(alpha >= previous);
            assert!(alpha <= 1.0);
            previous = alpha;
        }
        assert_eq!(previous, 1.0);

        view.hide_end_screen();
        for _ in 0..15 {
            view.update(&host, 0.0, 0.1, 0.0);
            assert!(view.end_screen_alpha() >= 0.0);
        }
        assert_eq!(view.end_screen_alpha(), 0.0);
    }

    #[test]
    fn day_phase_drives_panel_and_background_colours() {
        let mut view = build();
        let host = StaticHost::default();
        let palette = Palette::default();

        view.update(&host, 0.0, 0.016, 0.0);
        assert!(view.panel_fills().iter().all(|c| *c == palette.panel_night));
        assert_eq!(view.background_tint(), palette.background_night);

        view.update(&host, 0.0, 0.016, 1.0);
        assert!(view.panel_fills().iter().all(|c| *c == palette.panel_day));
        assert_eq!(view.background_tint(), palette.background_day);

        view.update(&host, 0.0, 0.016, 0.5);
        let mid = interpolate_color(palette.panel_night, palette.panel_day, 0.5);
        assert_eq!(view.panel_fills().len(), 4);
        assert!(view.panel_fills().iter().all(|c| *c == mid));
        assert_eq!(mid.r, (palette.panel_night.r + palette.panel_day.r) / 2.0);
    }

    #[test]
    fn clock_frame_and_hitbox_follow_host() {
        let mut view = build();
        let mut host = StaticHost {
            is_day: true,
            player: PlayerProbe {
                position: Vec2::new(300.0, 400.0),
                body_offset: Vec2::new(0.0, 12.0),
                alive: true,
            },
            boss: None,
        };

        view.update(&host, 0.0, 0.016, 1.0);
        assert_eq!(view.clock_frame(), 0);
        let hitbox = view.player_hitbox().expect("hitbox");
        assert_eq!(hitbox.position, Vec2::new(300.0, 412.0));
        assert!(hitbox.visible);

        host.is_day = false;
        host.player.alive = false;
        view.update(&host, 0.0, 0.016, 0.0);
        assert_eq!(view.clock_frame(), 1);
        assert!(!view.player_hitbox().expect("hitbox").visible);
    }

    #[test]
    fn draw_list_puts_hitbox_first_and_end_screen_last() {
        let view = build();
        let list = view.tree().draw_list();
        let names: Vec<&str> = list.iter().map(|item| item.node.name.as_str()).collect();

        assert_eq!(names.first(), Some(&"player_hitbox"));
        assert_eq!(names.last(), Some(&"play_again"));

        let position = |name: &str| names.iter().position(|n| *n == name);
        assert!(position("clock_bg") < position("clock"));
        assert!(position("health_bar") < position("health_box"));
        assert!(position("health_bg") < position("health_bar"));
    }

    fn node(view: &HudView, id: NodeId) -> &Node {
        view.tree().get(id).expect("node in tree")
    }

    fn fill(view: &HudView, id: NodeId) -> Rgb {
        view.fill_of(id).expect("node has a fill")
    }

    #[test]
    fn outlines_cross_fade_with_day_phase() {
        let mut view = build();
        let host = StaticHost::default();

        view.update(&host, 0.0, 0.016, 0.4);
        assert!((node(&view, view.outline_day).alpha - 0.25 * 0.4).abs() < 1e-6);
        assert!((node(&view, view.outline_night).alpha - 0.25 * 0.6).abs() < 1e-6);

        view.update(&host, 0.0, 0.016, 1.0);
        assert_eq!(node(&view, view.outline_day).alpha, 0.25);
        assert_eq!(node(&view, view.outline_night).alpha, 0.0);
    }

    #[test]
    fn health_box_and_backdrop_follow_day_phase() {
        let mut view = build();
        let host = StaticHost::default();
        let palette = Palette::default();

        view.update(&host, 0.0, 0.016, 0.0);
        assert_eq!(node(&view, view.health_box).tint, Rgb::from_hex(0xddeeff));
        assert_eq!(fill(&view, view.health_bg), palette.health_bg_night);

        view.update(&host, 0.0, 0.016, 1.0);
        assert_eq!(node(&view, view.health_box).tint, Rgb::from_hex(0x110900));
        assert_eq!(fill(&view, view.health_bg), palette.health_bg_day);

        view.update(&host, 0.0, 0.016, 0.5);
        let mid = interpolate_color(palette.box_night, palette.box_day, 0.5);
        assert_eq!(node(&view, view.health_box).tint, mid);
    }

    #[test]
    fn play_again_pulses_with_time() {
        let mut view = build();
        let host = StaticHost::default();

        view.update(&host, 0.0, 0.016, 0.0);
        assert_eq!(node(&view, view.play_again).scale, Vec2::ONE);

        // sin(5 * pi / 10) = 1
        view.update(&host, std::f32::consts::PI / 10.0, 0.016, 0.0);
        let scale = node(&view, view.play_again).scale;
        assert!((scale.x - 1.02).abs() < 1e-5);
        assert!((scale.y - 1.02).abs() < 1e-5);
    }

    #[test]
    fn score_labels_stretch_then_settle() {
        let mut view = build();
        let host = StaticHost::default();
        view.set_score(10, 20);

        view.update(&host, 0.0, 0.05, 0.0);
        assert!((view.score_bounce() - 0.5).abs() < 1e-6);
        for id in [view.score, view.highscore] {
            let scale = node(&view, id).scale;
            assert!((scale.x - 1.075).abs() < 1e-5);
            assert!((scale.y - 0.975).abs() < 1e-5);
        }

        for _ in 0..200 {
            view.update(&host, 0.0, 1.0 / 60.0, 0.0);
        }
        for id in [view.score, view.highscore] {
            let scale = node(&view, id).scale;
            assert!((scale.x - 1.0).abs() < 1e-3);
            assert!((scale.y - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn labels_render_with_em_dash() {
        let mut view = build();
        view.set_world(3);
        view.set_stage(12);
        view.set_debug_text("fps 60");

        assert_eq!(view.world_text(), "World — 3");
        assert_eq!(view.stage_text(), "Stage — 12");
        assert_eq!(view.debug_text(), "fps 60");
    }
}
