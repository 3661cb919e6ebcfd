pub mod level;

use arcade_helpers::{WINDOW_HEIGHT, WINDOW_WIDTH};
use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use bevy_asset_loader::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::gameplay::GameState;
use level::{PlacedTile, SCALED_TILE_SIZE, TILE_SCALE, TILE_SIZE, TileKind};

/// Downward pull on the bird, logical pixels per second squared.
pub const GRAVITY: f32 = 300.0;

/// One scaled tile per physics meter.
pub const PIXELS_PER_METER: f32 = SCALED_TILE_SIZE;

const WALL_THICKNESS: f32 = 32.0;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<FloorTile>()
            .register_type::<ColumnTile>()
            .add_loading_state(
            LoadingState::new(GameState::Loading)
                .continue_to_state(GameState::Ready)
                .load_collection::<SpriteAssets>(),
        )
        .add_systems(Startup, (setup_camera, setup_atlas_layouts, setup_gravity))
        .add_systems(OnEnter(GameState::Ready), (spawn_background, spawn_level));
    }
}

#[derive(AssetCollection, Resource)]
pub struct SpriteAssets {
    #[asset(path = "images/background.png")]
    pub background: Handle<Image>,
    #[asset(path = "images/tiles.png")]
    pub tiles: Handle<Image>,
    #[asset(path = "images/bird.png")]
    pub bird: Handle<Image>,
}

/// Grid layouts for the two sprite sheets; both use 16x16 source frames.
#[derive(Resource)]
pub struct AtlasLayouts {
    pub tiles: Handle<TextureAtlasLayout>,
    pub bird: Handle<TextureAtlasLayout>,
}

/// Tiles the bird can land on (the floor strip).
#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct FloorTile;

/// Tiles belonging to an obstacle column.
#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct ColumnTile;

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::Fixed {
                width: WINDOW_WIDTH,
                height: WINDOW_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        },
    ));
}

fn setup_atlas_layouts(
    mut commands: Commands,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    let tile_grid = TextureAtlasLayout::from_grid(
        UVec2::splat(TILE_SIZE as u32),
        level::ATLAS_COLUMNS,
        level::ATLAS_ROWS,
        None,
        None,
    );
    let bird_grid = TextureAtlasLayout::from_grid(UVec2::splat(TILE_SIZE as u32), 4, 1, None, None);

    commands.insert_resource(AtlasLayouts {
        tiles: layouts.add(tile_grid),
        bird: layouts.add(bird_grid),
    });
}

fn setup_gravity(mut rapier_config: Query<&mut RapierConfiguration>) {
    for mut config in &mut rapier_config {
        config.gravity = Vec2::new(0.0, -GRAVITY);
    }
}

fn spawn_background(mut commands: Commands, assets: Res<SpriteAssets>) {
    let mut sprite = Sprite::from_image(assets.background.clone_weak());
    sprite.custom_size = Some(Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT));

    commands.spawn((
        Name::new("Background"),
        sprite,
        Transform::from_xyz(0.0, 0.0, -1.0),
    ));
}

fn spawn_level(mut commands: Commands, assets: Res<SpriteAssets>, layouts: Res<AtlasLayouts>) {
    let tiles = match level::canyon_layout(WINDOW_WIDTH, WINDOW_HEIGHT) {
        Ok(tiles) => tiles,
        Err(error) => {
            error!("level build failed: {error}");
            return;
        }
    };

    info!("placing {count} level tiles", count = tiles.len());
    for tile in &tiles {
        spawn_tile(&mut commands, &assets, &layouts, tile);
    }

    spawn_world_bounds(&mut commands);
}

fn spawn_tile(
    commands: &mut Commands,
    assets: &SpriteAssets,
    layouts: &AtlasLayouts,
    tile: &PlacedTile,
) {
    let sprite = Sprite::from_atlas_image(
        assets.tiles.clone_weak(),
        TextureAtlas {
            layout: layouts.tiles.clone_weak(),
            index: tile.frame,
        },
    );

    let mut entity = commands.spawn((
        sprite,
        Transform {
            translation: tile_translation(tile.x, tile.y),
            scale: Vec3::splat(TILE_SCALE),
            ..default()
        },
        RigidBody::Fixed,
        // Collider half extents are in local units; the transform scale
        // stretches them to the on-screen tile size.
        Collider::cuboid(TILE_SIZE / 2.0, TILE_SIZE / 2.0),
    ));

    match tile.kind {
        TileKind::Floor => entity.insert((Name::new("FloorTile"), FloorTile)),
        TileKind::Column => entity.insert((Name::new("ColumnTile"), ColumnTile)),
    };
}

// The builder hands out top-left tile corners in screen space (y down);
// sprites are center-anchored in world space (y up).
fn tile_translation(x: f32, y: f32) -> Vec3 {
    Vec3::new(
        x - WINDOW_WIDTH / 2.0 + SCALED_TILE_SIZE / 2.0,
        WINDOW_HEIGHT / 2.0 - y - SCALED_TILE_SIZE / 2.0,
        0.0,
    )
}

// Invisible static walls around the play field. They keep the bird inside
// but belong to neither collision group, so touching them is not a crash.
fn spawn_world_bounds(commands: &mut Commands) {
    let half_width = WINDOW_WIDTH / 2.0;
    let half_height = WINDOW_HEIGHT / 2.0;
    let half_thickness = WALL_THICKNESS / 2.0;

    let walls = [
        (
            Vec2::new(0.0, half_height + half_thickness),
            Vec2::new(half_width + WALL_THICKNESS, half_thickness),
        ),
        (
            Vec2::new(0.0, -half_height - half_thickness),
            Vec2::new(half_width + WALL_THICKNESS, half_thickness),
        ),
        (
            Vec2::new(-half_width - half_thickness, 0.0),
            Vec2::new(half_thickness, half_height + WALL_THICKNESS),
        ),
        (
            Vec2::new(half_width + half_thickness, 0.0),
            Vec2::new(half_thickness, half_height + WALL_THICKNESS),
        ),
    ];

    for (center, half_extents) in walls {
        commands.spawn((
            Name::new("WorldBound"),
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y),
            Transform::from_translation(center.extend(0.0)),
        ));
    }
}
