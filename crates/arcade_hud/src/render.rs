use std::collections::HashMap;

use bevy::prelude::*;
use bevy::sprite::{
    Anchor, BorderRect, ImageScaleMode, MaterialMesh2dBundle, SliceScaleMode, TextureSlicer,
};
use hud_view::{DrawItem, HudLayout, NodeId, NodeKind, Rgb};
use tracing::{info, warn};

use crate::Hud;

const FONT_PATH: &str = "fonts/FiraSans-Bold.ttf";
const PANEL_TEXTURE: &str = "ui_panel";
const CLOCK_TEXTURE: &str = "ui_clock";
const CLOCK_FRAME_PX: UVec2 = UVec2::new(256, 256);
const Z_STEP: f32 = 0.5;
const OUTLINE_Z: f32 = -0.1;

/// Root of every HUD render entity; despawning it tears the mirror down.
#[derive(Component)]
pub struct HudRoot;

/// Links a render entity to the element it mirrors.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudNode(pub NodeId);

#[derive(Component)]
pub(crate) struct TextOutline(Vec<Entity>);

#[derive(Component)]
pub(crate) struct OutlineCopy;

#[derive(Resource, Debug, Clone)]
pub struct HudAssets {
    pub font: Handle<Font>,
    pub textures: HashMap<String, Handle<Image>>,
    pub atlases: HashMap<String, Handle<TextureAtlasLayout>>,
}

impl HudAssets {
    fn texture(&mut self, asset_server: &AssetServer, key: &str) -> Handle<Image> {
        self.textures
            .entry(key.to_string())
            .or_insert_with(|| asset_server.load(format!("textures/{key}.png")))
            .clone()
    }
}

/// HUD space is top-left / y-down; bevy's 2D camera is centred / y-up.
pub fn hud_to_world(layout: &HudLayout, position: Vec2) -> Vec2 {
    Vec2::new(position.x - layout.center.x, layout.center.y - position.y)
}

pub fn world_to_hud(layout: &HudLayout, translation: Vec3) -> Vec2 {
    Vec2::new(translation.x + layout.center.x, layout.center.y - translation.y)
}

fn to_color(rgb: Rgb, alpha: f32) -> Color {
    Color::srgba(rgb.r, rgb.g, rgb.b, alpha)
}

fn to_anchor(origin: Vec2) -> Anchor {
    Anchor::Custom(Vec2::new(origin.x - 0.5, 0.5 - origin.y))
}

fn visibility(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

fn item_transform(layout: &HudLayout, item: &DrawItem, order: usize) -> Transform {
    let position = hud_to_world(layout, item.position);
    Transform::from_xyz(position.x, position.y, order as f32 * Z_STEP)
        .with_scale(item.scale.extend(1.0))
}

/// Colour a sprite is drawn with: the tint for images, the fill for shapes.
fn sprite_color(item: &DrawItem) -> Color {
    let rgb = match &item.node.kind {
        NodeKind::Rect { fill, .. }
        | NodeKind::RoundRect { fill, .. }
        | NodeKind::Ellipse { fill, .. } => *fill,
        _ => item.node.tint,
    };
    to_color(rgb, item.alpha)
}

pub(crate) fn spawn_hud_mirror(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut atlas_layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    hud: Res<Hud>,
) {
    let mut assets = HudAssets {
        font: asset_server.load(FONT_PATH),
        textures: HashMap::new(),
        atlases: HashMap::new(),
    };
    assets.atlases.insert(
        CLOCK_TEXTURE.to_string(),
        atlas_layouts.add(TextureAtlasLayout::from_grid(CLOCK_FRAME_PX, 2, 1, None, None)),
    );
    let panel = assets.texture(&asset_server, PANEL_TEXTURE);

    let layout = *hud.layout();
    let root = commands
        .spawn((SpatialBundle::default(), HudRoot, Name::new("hud")))
        .id();

    let items = hud.tree().draw_list();
    for (order, item) in items.iter().enumerate() {
        let transform = item_transform(&layout, item, order);
        let anchor = to_anchor(item.node.origin);
        let marker = (HudNode(item.id), Name::new(item.node.name.clone()));

        let mut entity = match &item.node.kind {
            NodeKind::Container => continue,
            NodeKind::Image {
                texture,
                frame,
                size,
            } => {
                let mut entity = commands.spawn((
                    SpriteBundle {
                        sprite: Sprite {
                            color: sprite_color(item),
                            custom_size: Some(*size),
                            anchor,
                            ..default()
                        },
                        texture: assets.texture(&asset_server, texture),
                        transform,
                        ..default()
                    },
                    marker,
                ));
                if let Some(layout) = assets.atlases.get(texture) {
                    entity.insert(TextureAtlas {
                        layout: layout.clone(),
                        index: *frame,
                    });
                }
                entity
            }
            NodeKind::Rect { size, .. } => commands.spawn((
                SpriteBundle {
                    sprite: Sprite {
                        color: sprite_color(item),
                        custom_size: Some(*size),
                        anchor,
                        ..default()
                    },
                    transform,
                    ..default()
                },
                marker,
            )),
            NodeKind::RoundRect { size, radius, .. } => commands.spawn((
                SpriteBundle {
                    sprite: Sprite {
                        color: sprite_color(item),
                        custom_size: Some(*size),
                        anchor,
                        ..default()
                    },
                    texture: panel.clone(),
                    transform,
                    ..default()
                },
                ImageScaleMode::Sliced(TextureSlicer {
                    border: BorderRect::square(*radius),
                    center_scale_mode: SliceScaleMode::Stretch,
                    sides_scale_mode: SliceScaleMode::Stretch,
                    max_corner_scale: 1.0,
                }),
                marker,
            )),
            NodeKind::Text {
                content,
                font_size,
                fill,
                stroke,
            } => {
                let style = TextStyle {
                    font: assets.font.clone(),
                    font_size: *font_size,
                    color: to_color(*fill, item.alpha),
                };
                let mut entity = commands.spawn((
                    Text2dBundle {
                        text: Text::from_section(content.clone(), style.clone())
                            .with_justify(JustifyText::Center),
                        text_anchor: anchor,
                        transform,
                        ..default()
                    },
                    marker,
                ));

                if let Some((color, width)) = stroke {
                    let mut copies = Vec::with_capacity(4);
                    let outline_style = TextStyle {
                        color: to_color(*color, item.alpha),
                        ..style
                    };
                    entity.with_children(|parent| {
                        for offset in [
                            Vec2::new(-1.0, -1.0),
                            Vec2::new(1.0, -1.0),
                            Vec2::new(-1.0, 1.0),
                            Vec2::new(1.0, 1.0),
                        ] {
                            let shift = offset * (*width / 2.0);
                            let copy = parent.spawn((
                                Text2dBundle {
                                    text: Text::from_section(
                                        content.clone(),
                                        outline_style.clone(),
                                    )
                                    .with_justify(JustifyText::Center),
                                    text_anchor: anchor,
                                    transform: Transform::from_xyz(shift.x, shift.y, OUTLINE_Z),
                                    ..default()
                                },
                                OutlineCopy,
                            ));
                            copies.push(copy.id());
                        }
                    });
                    entity.insert(TextOutline(copies));
                }
                entity
            }
            NodeKind::Ellipse { size, fill } => commands.spawn((
                MaterialMesh2dBundle {
                    mesh: meshes.add(Ellipse::new(size.x / 2.0, size.y / 2.0)).into(),
                    material: materials.add(ColorMaterial::from(to_color(*fill, item.alpha))),
                    transform,
                    ..default()
                },
                marker,
            )),
        };

        entity.insert(visibility(item.visible)).set_parent(root);
    }

    info!(target: "arcade_hud", entities = items.len(), "spawned HUD mirror");
    commands.insert_resource(assets);
}

type NodeQuery = (
    &'static HudNode,
    &'static mut Transform,
    &'static mut Visibility,
    Option<&'static mut Sprite>,
    Option<&'static mut Text>,
    Option<&'static mut TextureAtlas>,
    Option<&'static TextOutline>,
);

pub(crate) fn sync_hud_nodes(
    hud: Res<Hud>,
    mut nodes: Query<NodeQuery>,
    mut outlines: Query<&mut Text, (With<OutlineCopy>, Without<HudNode>)>,
) {
    let layout = *hud.layout();
    let items: HashMap<NodeId, (usize, DrawItem)> = hud
        .tree()
        .draw_list()
        .into_iter()
        .enumerate()
        .map(|(order, item)| (item.id, (order, item)))
        .collect();

    for (node, mut transform, mut visible, sprite, text, atlas, outline) in &mut nodes {
        let Some((order, item)) = items.get(&node.0) else {
            if *visible != Visibility::Hidden {
                warn!(target: "arcade_hud", node = ?node.0, "HUD node no longer in tree");
                *visible = Visibility::Hidden;
            }
            continue;
        };

        *transform = item_transform(&layout, item, *order);
        *visible = visibility(item.visible);

        if let Some(mut sprite) = sprite {
            sprite.color = sprite_color(item);
            if let Some(size) = item.node.size() {
                sprite.custom_size = Some(size);
            }
        }

        if let Some(mut atlas) = atlas {
            if let NodeKind::Image { frame, .. } = &item.node.kind {
                atlas.index = *frame;
            }
        }

        if let (Some(mut text), NodeKind::Text { content, fill, stroke, .. }) =
            (text, &item.node.kind)
        {
            write_section(&mut text, content, to_color(*fill, item.alpha));

            if let (Some(outline), Some((color, _))) = (outline, stroke) {
                for copy in &outline.0 {
                    if let Ok(mut copy_text) = outlines.get_mut(*copy) {
                        write_section(&mut copy_text, content, to_color(*color, item.alpha));
                    }
                }
            }
        }
    }
}

fn write_section(text: &mut Text, content: &str, color: Color) {
    if let Some(section) = text.sections.first_mut() {
        if section.value != content {
            section.value = content.to_string();
        }
        section.style.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Boss, HudCommand, HudStatePlugin, HudSystemSet};

    fn mirror_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, HudStatePlugin))
            .add_systems(Update, sync_hud_nodes.in_set(HudSystemSet::Render));
        app
    }

    fn node_named(app: &App, name: &str) -> NodeId {
        app.world()
            .resource::<Hud>()
            .tree()
            .draw_list()
            .iter()
            .find(|item| item.node.name == name)
            .map(|item| item.id)
            .expect("named node")
    }

    #[test]
    fn synced_entities_follow_the_view() {
        let mut app = mirror_app();
        let bar_id = node_named(&app, "health_bar");
        let score_id = node_named(&app, "score");

        let bar = app
            .world_mut()
            .spawn((HudNode(bar_id), SpriteBundle::default()))
            .id();
        let score = app
            .world_mut()
            .spawn((
                HudNode(score_id),
                Text2dBundle {
                    text: Text::from_section("", TextStyle::default()),
                    ..default()
                },
            ))
            .id();

        app.update();
        assert_eq!(app.world().get::<Visibility>(bar), Some(&Visibility::Hidden));
        assert_eq!(
            app.world().get::<Text>(score).map(|t| t.sections[0].value.as_str()),
            Some("00000000")
        );

        let boss = app
            .world_mut()
            .spawn(Boss {
                health_fraction: 0.5,
            })
            .id();
        app.world_mut().send_event(HudCommand::SetBoss(boss));
        app.world_mut().send_event(HudCommand::SetScore {
            score: 42,
            highscore: 0,
        });
        app.update();

        let width = app.world().resource::<Hud>().health_bar_width();
        assert!(width > 0.0);
        let sprite = app.world().get::<Sprite>(bar).expect("bar sprite");
        assert_eq!(sprite.custom_size.map(|size| size.x), Some(width));
        assert_eq!(
            app.world().get::<Visibility>(bar),
            Some(&Visibility::Inherited)
        );
        assert_eq!(
            app.world().get::<Text>(score).map(|t| t.sections[0].value.as_str()),
            Some("00000042")
        );
    }

    #[test]
    fn hud_and_world_space_round_trip() {
        let layout = HudLayout::new(1920.0, 1080.0);

        assert_eq!(hud_to_world(&layout, Vec2::ZERO), Vec2::new(-960.0, 540.0));
        assert_eq!(hud_to_world(&layout, layout.center), Vec2::ZERO);

        let hud = Vec2::new(300.0, 800.0);
        let world = hud_to_world(&layout, hud);
        assert_eq!(world_to_hud(&layout, world.extend(0.0)), hud);
    }

    #[test]
    fn origins_map_to_centred_anchors() {
        assert_eq!(to_anchor(Vec2::splat(0.5)).as_vec(), Vec2::ZERO);
        assert_eq!(to_anchor(Vec2::ZERO).as_vec(), Vec2::new(-0.5, 0.5));
        assert_eq!(to_anchor(Vec2::new(0.5, 1.0)).as_vec(), Vec2::new(0.0, -0.5));
    }
}
