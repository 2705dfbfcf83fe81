//! Core game logic: places, rounds, sessions and the shared scene.
//!
//! The state machines in [`round`] and [`marking`] are plain data so they
//! can be tested without a window; the systems in the screen modules feed
//! them events and act on the returned effects.

pub mod marking;
pub mod place;
pub mod round;
pub mod scene;
pub mod session;

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
	app.add_plugins(scene::plugin);
	app.add_event::<round::RoundEvent>();
	app.add_event::<marking::MarkEvent>();
	app.init_resource::<round::RoundState>();
	app.init_resource::<marking::MarkPhase>();
	app.init_resource::<session::GameRng>();
}
