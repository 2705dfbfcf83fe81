mod assets;
mod game;
mod graphics;
mod persistent;
mod screen;
mod ui;
mod viewport;

use bevy::{asset::AssetMetaCheck, prelude::*};

/// What the process was asked to do on the command line
#[derive(Resource, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AppMode {
	/// Play guessing sessions
	#[default]
	Play,
	/// Author place definitions for unmarked photos
	Mark,
}

pub struct AppPlugin {
	pub mode: AppMode,
}

impl Plugin for AppPlugin {
	fn build(&self, app: &mut App) {
		app.insert_resource(self.mode);

		// Order new `AppSet` variants by adding them here:
		app.configure_sets(
			Update,
			(
				AppSet::TickTimers,
				AppSet::RecordInput,
				AppSet::ExecuteInput,
				AppSet::GameLogic,
				AppSet::UpdateVisuals,
			)
				.chain(),
		);

		// Add Bevy plugins.
		app.add_plugins(
			DefaultPlugins
				.set(AssetPlugin {
					// Wasm builds will check for meta files (that don't exist) if this isn't set.
					// This causes errors and even panics on web build on itch.
					// See https://github.com/bevyengine/bevy_github_ci_template/issues/48.
					meta_check: AssetMetaCheck::Never,
					#[cfg(feature = "dev")]
					watch_for_changes_override: Some(true),
					..default()
				})
				.set(WindowPlugin {
					primary_window: Window {
						title: "Campus Guessr".to_string(),
						resolution: (1080.0, 720.0).into(),
						canvas: Some("#bevy".to_string()),
						fit_canvas_to_parent: true,
						prevent_default_event_handling: true,
						..default()
					}
					.into(),
					..default()
				}),
		);

		// Add other plugins.
		app.add_plugins((
			persistent::plugin,
			game::plugin,
			screen::plugin,
			graphics::plugin,
			assets::plugin,
			ui::plugin,
		));
	}
}

/// High-level groupings of systems for the app in the `Update` schedule.
/// When adding a new variant, make sure to order it in the `configure_sets`
/// call above.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash)]
enum AppSet {
	/// Tick timers and refresh per-frame geometry.
	TickTimers,
	/// Record player input.
	RecordInput,
	/// Process inputs that correspond to one-shot actions rather than lasting state
	/// (that should be pretty much all inputs in this particular game)
	ExecuteInput,
	/// Evaluate in-game logic
	GameLogic,
	/// Update visual representation of internal state
	UpdateVisuals,
}
