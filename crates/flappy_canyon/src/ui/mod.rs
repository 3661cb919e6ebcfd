use bevy::prelude::*;

use crate::gameplay::GameState;
use crate::session::StatusMessage;

/// Fired by the gameplay layer whenever the status message changes.
#[derive(Event)]
pub struct StatusEvent(pub StatusMessage);

#[derive(Component)]
struct StatusText;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<StatusEvent>()
            .add_systems(OnEnter(GameState::Ready), spawn_status_text)
            .add_systems(Update, update_status_text);
    }
}

fn spawn_status_text(mut commands: Commands) {
    commands.spawn((
        Name::new("StatusText"),
        Text::new(StatusMessage::PreStart.text()),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        BackgroundColor(Color::BLACK),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(StatusMessage::PreStart.left_offset()),
            bottom: Val::Px(16.0),
            ..default()
        },
        StatusText,
    ));
}

// Several messages can arrive in one frame (crash plus win); applying them in
// order leaves the last writer on screen.
fn update_status_text(
    mut status_events: EventReader<StatusEvent>,
    mut text_query: Query<(&mut Text, &mut Node), With<StatusText>>,
) {
    for StatusEvent(message) in status_events.read() {
        for (mut text, mut node) in &mut text_query {
            text.0 = message.text().to_string();
            node.left = Val::Px(message.left_offset());
        }
    }
}
