use arcade_helpers::WINDOW_WIDTH;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::player::Bird;
use crate::player::inputs::Action;
use crate::scene::{ColumnTile, FloorTile};
use crate::session::{Command, FlightPhase, FrameInput, GameplaySession};
use crate::ui::StatusEvent;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum GameState {
    #[default]
    Loading,
    Ready,
    Flying,
    Crashed,
}

/// The per-episode state machine, advanced once per frame.
#[derive(Resource, Default, Deref, DerefMut)]
struct Session(GameplaySession);

/// Collision flags gathered this frame, consumed by `advance_session`.
#[derive(Resource, Default)]
struct TouchedThisFrame {
    floor: bool,
    column: bool,
}

pub struct StateTransitionPlugin;

impl Plugin for StateTransitionPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<Session>()
            .init_resource::<TouchedThisFrame>()
            .add_systems(
                Update,
                (collect_collisions, advance_session)
                    .chain()
                    .run_if(not(in_state(GameState::Loading))),
            );
    }
}

// Translates physics contacts into the two group flags the session consumes.
// Contacts with anything unmarked (the world bounds) are ignored.
fn collect_collisions(
    mut collision_events: EventReader<CollisionEvent>,
    mut touched: ResMut<TouchedThisFrame>,
    bird_query: Query<Entity, With<Bird>>,
    floor_query: Query<(), With<FloorTile>>,
    column_query: Query<(), With<ColumnTile>>,
) {
    let Ok(bird) = bird_query.get_single() else {
        return;
    };

    for event in collision_events.read() {
        let CollisionEvent::Started(first, second, _) = event else {
            continue;
        };
        let other = if *first == bird {
            *second
        } else if *second == bird {
            *first
        } else {
            continue;
        };

        if floor_query.contains(other) {
            touched.floor = true;
        }
        if column_query.contains(other) {
            touched.column = true;
        }
    }
}

fn advance_session(
    mut session: ResMut<Session>,
    mut touched: ResMut<TouchedThisFrame>,
    action_query: Query<&ActionState<Action>, With<Bird>>,
    mut bird_query: Query<(&Transform, &mut Velocity), With<Bird>>,
    mut status_events: EventWriter<StatusEvent>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Ok(action_state) = action_query.get_single() else {
        return;
    };
    let Ok((transform, mut velocity)) = bird_query.get_single_mut() else {
        return;
    };

    let input = FrameInput {
        start_pressed: action_state.pressed(&Action::Start),
        flap_pressed: action_state.pressed(&Action::Flap),
        touched_floor: touched.floor,
        touched_column: touched.column,
        // The session works in screen space with x = 0 at the left edge.
        bird_x: transform.translation.x + WINDOW_WIDTH / 2.0,
    };
    touched.floor = false;
    touched.column = false;

    for command in session.step(input) {
        match command {
            Command::SetVerticalSpeed(speed) => velocity.linvel.y = speed,
            Command::SetForwardSpeed(speed) => velocity.linvel.x = speed,
            Command::ShowMessage(message) => {
                status_events.send(StatusEvent(message));
            }
        }
    }

    let phase_state = match session.phase() {
        FlightPhase::Idle => GameState::Ready,
        FlightPhase::Flying => GameState::Flying,
        FlightPhase::Crashed => GameState::Crashed,
    };
    if *state.get() != phase_state {
        info!("gameplay state: {:?} -> {:?}", state.get(), phase_state);
        next_state.set(phase_state);
    }
}
