//! Camera setup and shared rendering constants.

use bevy::prelude::*;

use crate::ui::palette;

pub(super) fn plugin(app: &mut App) {
	app.add_systems(Startup, spawn_camera);
}

/// Z coordinates of the various sprite layers
pub mod layers {
	/// The primary view sprite, filling the window width
	pub const PRIMARY: f32 = 0.0;
	/// The minimap thumbnail in the corner
	pub const MINIMAP: f32 = 10.0;
	/// Candidate guess pin
	pub const PIN: f32 = 20.0;
	/// Score label shown after a guess is locked in
	pub const SCORE_LABEL: f32 = 30.0;
}

/// Displayed size of the guess pin sprite, in logical pixels
pub const PIN_SIZE: Vec2 = Vec2::new(32.0, 32.0);

/// Colour of the tolerance circle around a revealed true position
pub const TRUE_RADIUS_COLOR: Color = palette::MARKER_RED;
/// Colour of the guess-to-answer line and the score label
pub const SCORE_LINE_COLOR: Color = palette::MARKER_GREEN;
/// Colour of the circle previewed while authoring a place
pub const MARKING_COLOR: Color = palette::MARKER_RED;

fn spawn_camera(mut commands: Commands) {
	commands.spawn((
		Name::new("Camera"),
		Camera2d,
		Msaa::Off,
	));
}
