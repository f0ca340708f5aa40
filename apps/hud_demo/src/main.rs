use std::path::PathBuf;

use anyhow::{Context, Result};
use arcade_hud::{
    hud_to_world, Boss, DayCycle, HudCommand, HudPlayer, HudPlugin, HudSettings, HudSystemSet,
};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use clap::Parser;
use hud_view::{ease_alpha, HudConfig, MAX_LIVES};
use tracing::info;

const DAY_FADE_PER_SECOND: f32 = 0.5;
const PLAYER_SPEED: f32 = 400.0;
const BOSS_HIT: f32 = 0.1;
const SCORE_STEP: u64 = 250;

#[derive(Parser, Debug)]
#[command(about = "Drive the arcade HUD from the keyboard")]
struct Args {
    /// JSON file overriding layout, palette and animation settings.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<f32>,
    #[arg(long)]
    height: Option<f32>,
}

#[derive(Resource, Debug)]
struct DemoState {
    score: u64,
    highscore: u64,
    lives: u32,
    stage: u32,
    boss: Option<Entity>,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            score: 0,
            highscore: 0,
            lives: MAX_LIVES as u32,
            stage: 1,
            boss: None,
        }
    }
}

#[derive(Component)]
struct DemoPlayer;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => HudConfig::load(path)
            .with_context(|| format!("failed to load HUD config from {}", path.display()))?,
        None => HudConfig::default(),
    };
    if let Some(width) = args.width {
        config.layout.width = width;
    }
    if let Some(height) = args.height {
        config.layout.height = height;
    }
    config.validate().context("invalid HUD layout")?;

    info!(target: "hud_demo", width = config.layout.width, height = config.layout.height, "launching HUD demo");

    let window = Window {
        title: "Arcade HUD".into(),
        resolution: (config.layout.width, config.layout.height).into(),
        ..default()
    };

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.08)))
        .insert_resource(HudSettings::from_config(config))
        .init_resource::<DemoState>()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(window),
                    ..default()
                })
                .disable::<LogPlugin>(),
        )
        .add_plugins(HudPlugin)
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (advance_day_cycle, move_player, handle_keys).before(HudSystemSet::Commands),
        )
        .run();

    Ok(())
}

fn setup_scene(mut commands: Commands, settings: Res<HudSettings>) {
    let mut camera = Camera2dBundle::default();
    camera.projection.scaling_mode = ScalingMode::FixedVertical(settings.layout.height);
    commands.spawn(camera);

    let start = hud_to_world(&settings.layout, settings.layout.center);
    commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color: Color::srgb(0.9, 0.9, 1.0),
                custom_size: Some(Vec2::new(32.0, 48.0)),
                ..default()
            },
            transform: Transform::from_xyz(start.x, start.y, 10.0),
            ..default()
        },
        HudPlayer {
            body_offset: Vec2::new(0.0, 8.0),
            alive: true,
        },
        DemoPlayer,
    ));
}

fn advance_day_cycle(time: Res<Time>, mut day: ResMut<DayCycle>) {
    let target = if day.is_day { 1.0 } else { 0.0 };
    day.phase = ease_alpha(day.phase, target, DAY_FADE_PER_SECOND * time.delta_seconds());
}

fn move_player(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    mut players: Query<&mut Transform, With<DemoPlayer>>,
) {
    let mut direction = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyA) {
        direction.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        direction.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyW) {
        direction.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        direction.y -= 1.0;
    }

    let delta = direction.normalize_or_zero() * PLAYER_SPEED * time.delta_seconds();
    for mut transform in &mut players {
        transform.translation += delta.extend(0.0);
    }
}

fn handle_keys(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<DemoState>,
    mut day: ResMut<DayCycle>,
    mut bosses: Query<&mut Boss>,
    mut players: Query<&mut HudPlayer>,
    mut hud: EventWriter<HudCommand>,
) {
    if keys.just_pressed(KeyCode::KeyN) {
        day.is_day = !day.is_day;
    }

    if keys.just_pressed(KeyCode::KeyB) {
        match state.boss.take() {
            Some(boss) => commands.entity(boss).despawn_recursive(),
            None => {
                let boss = commands.spawn(Boss::default()).id();
                state.boss = Some(boss);
                hud.send(HudCommand::SetBoss(boss));
            }
        }
    }

    if keys.just_pressed(KeyCode::Space) {
        if let Some(entity) = state.boss {
            if let Ok(mut boss) = bosses.get_mut(entity) {
                boss.health_fraction = (boss.health_fraction - BOSS_HIT).max(0.0);
                hud.send(HudCommand::BossDamaged(entity));
                if boss.health_fraction <= 0.0 {
                    commands.entity(entity).despawn_recursive();
                    state.boss = None;
                    hud.send(HudCommand::ShowVictory);
                }
            }
        }
    }

    if keys.just_pressed(KeyCode::ArrowUp) {
        state.lives = (state.lives + 1).min(MAX_LIVES as u32);
        hud.send(HudCommand::SetPlayerHealth(state.lives));
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        state.lives = state.lives.saturating_sub(1);
        hud.send(HudCommand::SetPlayerHealth(state.lives));
        if state.lives == 0 {
            for mut player in &mut players {
                player.alive = false;
            }
            hud.send(HudCommand::ShowGameover);
        }
    }

    if keys.just_pressed(KeyCode::KeyE) {
        state.score += SCORE_STEP;
        state.highscore = state.highscore.max(state.score);
        hud.send(HudCommand::SetScore {
            score: state.score,
            highscore: state.highscore,
        });
    }

    if keys.just_pressed(KeyCode::KeyG) {
        hud.send(HudCommand::ShowGameover);
    }
    if keys.just_pressed(KeyCode::KeyV) {
        hud.send(HudCommand::ShowVictory);
    }

    if keys.just_pressed(KeyCode::KeyR) {
        state.score = 0;
        state.lives = MAX_LIVES as u32;
        state.stage += 1;
        for mut player in &mut players {
            player.alive = true;
        }
        hud.send_batch([
            HudCommand::HideEndScreen,
            HudCommand::SetPlayerHealth(state.lives),
            HudCommand::SetScore {
                score: 0,
                highscore: state.highscore,
            },
            HudCommand::SetStage(state.stage),
        ]);
    }
}
