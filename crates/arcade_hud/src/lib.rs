//! bevy front-end for [`hud_view::HudView`].
//!
//! [`HudStatePlugin`] owns the view, applies [`HudCommand`] events and runs the
//! per-frame update against the ECS world. [`HudPlugin`] adds the render mirror
//! that draws the element tree with sprites and 2D text.

mod render;

use bevy::prelude::*;
use hud_view::{BossId, HudConfig, HudHost, HudLayout, HudView, PlayerProbe};
use tracing::info;

pub use render::{hud_to_world, world_to_hud, HudAssets, HudNode, HudRoot};

/// Screen-space config the view is built from. Insert before adding the plugin
/// to override the defaults.
#[derive(Resource, Debug, Clone)]
pub struct HudSettings {
    pub config: HudConfig,
    pub layout: HudLayout,
}

impl HudSettings {
    pub fn from_config(config: HudConfig) -> Self {
        let layout = HudLayout::from_config(&config.layout);
        Self { config, layout }
    }
}

impl Default for HudSettings {
    fn default() -> Self {
        Self::from_config(HudConfig::default())
    }
}

#[derive(Resource, Debug, Deref, DerefMut)]
pub struct Hud(pub HudView);

/// Day/night state owned by the game. `phase` is the smoothed value in `[0, 1]`.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DayCycle {
    pub is_day: bool,
    pub phase: f32,
}

/// Marks the player entity whose hit region the HUD shows.
#[derive(Component, Debug, Clone, Copy)]
pub struct HudPlayer {
    /// Offset from the transform to the hit region, in HUD pixels (y down).
    pub body_offset: Vec2,
    pub alive: bool,
}

impl Default for HudPlayer {
    fn default() -> Self {
        Self {
            body_offset: Vec2::ZERO,
            alive: true,
        }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Boss {
    pub health_fraction: f32,
}

impl Default for Boss {
    fn default() -> Self {
        Self {
            health_fraction: 1.0,
        }
    }
}

#[derive(Event, Debug, Clone, PartialEq)]
pub enum HudCommand {
    SetBoss(Entity),
    ClearBoss,
    BossDamaged(Entity),
    SetPlayerHealth(u32),
    SetScore { score: u64, highscore: u64 },
    ShowGameover,
    ShowVictory,
    HideEndScreen,
    SetWorld(u32),
    SetStage(u32),
    SetDebugText(String),
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum HudSystemSet {
    Commands,
    Update,
    Render,
}

pub fn boss_id(entity: Entity) -> BossId {
    BossId(entity.to_bits())
}

/// View state, commands and per-frame update, without any rendering.
#[derive(Default)]
pub struct HudStatePlugin;

impl Plugin for HudStatePlugin {
    fn build(&self, app: &mut App) {
        let settings = initialize_settings(app);
        let view = HudView::new(settings.layout, &settings.config);

        app.insert_resource(Hud(view))
            .init_resource::<DayCycle>()
            .add_event::<HudCommand>()
            .configure_sets(
                Update,
                (
                    HudSystemSet::Commands,
                    HudSystemSet::Update,
                    HudSystemSet::Render,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (apply_hud_commands, release_despawned_boss)
                    .chain()
                    .in_set(HudSystemSet::Commands),
            )
            .add_systems(Update, update_hud.in_set(HudSystemSet::Update));
    }
}

#[derive(Default)]
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(HudStatePlugin)
            .add_systems(Startup, render::spawn_hud_mirror)
            .add_systems(
                Update,
                render::sync_hud_nodes.in_set(HudSystemSet::Render),
            );
    }
}

fn initialize_settings(app: &mut App) -> HudSettings {
    let world = app.world_mut();
    if !world.contains_resource::<HudSettings>() {
        world.insert_resource(HudSettings::default());
    }
    world.resource::<HudSettings>().clone()
}

fn apply_hud_commands(mut hud: ResMut<Hud>, mut reader: EventReader<HudCommand>) {
    for command in reader.read() {
        match command {
            HudCommand::SetBoss(entity) => hud.set_boss(boss_id(*entity)),
            HudCommand::ClearBoss => hud.clear_boss(),
            HudCommand::BossDamaged(entity) => hud.on_boss_damage(boss_id(*entity)),
            HudCommand::SetPlayerHealth(health) => hud.set_player_health(*health),
            HudCommand::SetScore { score, highscore } => hud.set_score(*score, *highscore),
            HudCommand::ShowGameover => hud.show_gameover(),
            HudCommand::ShowVictory => hud.show_victory(),
            HudCommand::HideEndScreen => hud.hide_end_screen(),
            HudCommand::SetWorld(world) => hud.set_world(*world),
            HudCommand::SetStage(stage) => hud.set_stage(*stage),
            HudCommand::SetDebugText(text) => hud.set_debug_text(text.clone()),
        }
    }
}

/// Detaches the boss once its entity loses the [`Boss`] component.
fn release_despawned_boss(mut hud: ResMut<Hud>, mut removed: RemovedComponents<Boss>) {
    for entity in removed.read() {
        if hud.boss() == Some(boss_id(entity)) {
            info!(entity = %entity, "attached boss removed");
            hud.clear_boss();
        }
    }
}

struct EcsHost<'a, 'w, 's, 'b> {
    day: DayCycle,
    player: PlayerProbe,
    bosses: &'a Query<'w, 's, &'b Boss>,
}

impl HudHost for EcsHost<'_, '_, '_, '_> {
    fn is_day(&self) -> bool {
        self.day.is_day
    }

    fn player(&self) -> PlayerProbe {
        self.player
    }

    fn boss_health(&self, boss: BossId) -> Option<f32> {
        let entity = Entity::try_from_bits(boss.0).ok()?;
        self.bosses.get(entity).ok().map(|boss| boss.health_fraction)
    }
}

fn update_hud(
    mut hud: ResMut<Hud>,
    time: Res<Time>,
    day: Res<DayCycle>,
    players: Query<(&Transform, &HudPlayer)>,
    bosses: Query<&Boss>,
) {
    let layout = *hud.layout();
    let player = players
        .get_single()
        .map(|(transform, player)| PlayerProbe {
            position: world_to_hud(&layout, transform.translation),
            body_offset: player.body_offset,
            alive: player.alive,
        })
        .unwrap_or_default();

    let host = EcsHost {
        day: *day,
        player,
        bosses: &bosses,
    };
    hud.update(
        &host,
        time.elapsed_seconds(),
        time.delta_seconds(),
        day.phase.clamp(0.0, 1.0),
    );
}
