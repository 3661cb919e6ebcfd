pub mod inputs;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::gameplay::GameState;
use crate::scene::level::{TILE_SCALE, TILE_SIZE};
use crate::scene::{AtlasLayouts, SpriteAssets};

#[derive(Reflect, Resource)]
#[reflect(Resource)]
pub struct BirdSettings {
    pub start_translation: Vec3,
    pub restitution: f32,
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<inputs::Action>::default())
            .register_type::<BirdSettings>()
            .insert_resource(BirdSettings {
                // Flush with the left world bound, just below the ceiling.
                start_translation: Vec3::new(-380.0, 250.0, 1.0),
                restitution: 0.2,
            })
            .add_systems(OnEnter(GameState::Ready), spawn_bird);
    }
}

#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct Bird;

fn spawn_bird(
    mut commands: Commands,
    assets: Res<SpriteAssets>,
    layouts: Res<AtlasLayouts>,
    settings: Res<BirdSettings>,
) {
    commands.spawn((
        Name::new("Bird"),
        Bird,
        Sprite::from_atlas_image(
            assets.bird.clone_weak(),
            TextureAtlas {
                layout: layouts.bird.clone_weak(),
                index: 0,
            },
        ),
        Transform {
            translation: settings.start_translation,
            scale: Vec3::splat(TILE_SCALE),
            ..default()
        },
        RigidBody::Dynamic,
        Velocity::zero(),
        Collider::cuboid(TILE_SIZE / 2.0, TILE_SIZE / 2.0),
        Restitution::coefficient(settings.restitution),
        LockedAxes::ROTATION_LOCKED,
        ActiveEvents::COLLISION_EVENTS,
        InputManagerBundle::<inputs::Action> {
            input_map: inputs::create_input_map(),
            ..default()
        },
    ));
}
