use bevy::prelude::{KeyCode, Reflect};
use leafwing_input_manager::prelude::*;

// This is the list of "things in the game I want to be able to do based on input"
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum Action {
    /// Latches the game out of its idle phase.
    Start,
    /// Pushes the bird upward while held.
    Flap,
}

pub fn create_input_map() -> InputMap<Action> {
    let mut input_map = InputMap::default();

    input_map.insert(Action::Start, KeyCode::Space);
    input_map.insert(Action::Flap, KeyCode::ArrowUp);

    input_map
}
