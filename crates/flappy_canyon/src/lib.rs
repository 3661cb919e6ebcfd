#![allow(clippy::type_complexity)]

mod gameplay;
mod player;
mod scene;
mod session;
mod ui;

use bevy_rapier2d::prelude::*;

use crate::scene::PIXELS_PER_METER;

pub fn run() {
    arcade_helpers::get_default_app(env!("CARGO_PKG_NAME"))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            PIXELS_PER_METER,
        ))
        // .add_plugins(RapierDebugRenderPlugin::default()) // Activate when you need to debug physics
        .add_plugins(player::PlayerPlugin)
        .add_plugins(scene::ScenePlugin)
        .add_plugins(gameplay::StateTransitionPlugin)
        .add_plugins(ui::UiPlugin)
        .run();
}
