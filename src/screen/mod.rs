//! The game's main screen states and transitions between them.

mod leaderboard;
mod loading;
mod marking;
mod playing;
mod title;

use bevy::{input::common_conditions::input_just_pressed, prelude::*};

pub(super) fn plugin(app: &mut App) {
	app.init_state::<Screen>();
	app.enable_state_scoped_entities::<Screen>();

	app.add_plugins((
		loading::plugin,
		title::plugin,
		playing::plugin,
		marking::plugin,
		leaderboard::plugin,
	));

	app.add_systems(
		Update,
		go_to_return_screen.run_if(input_just_pressed(KeyCode::Escape)),
	);
}

fn go_to_return_screen(
	current_screen: Res<State<Screen>>,
	mut next_screen: ResMut<NextState<Screen>>,
) {
	if let Some(next) = current_screen.return_screen() {
		next_screen.set(next);
	}
}

/// The game's main screen states.
#[derive(States, Debug, Hash, PartialEq, Eq, Clone, Copy, Default)]
pub enum Screen {
	#[default]
	Loading,
	Title,
	/// A session of guessing rounds
	Playing,
	/// The authoring tool for place definitions
	Marking,
	Leaderboard,
}

impl Screen {
	/// Which screen should we return to
	fn return_screen(self) -> Option<Self> {
		match self {
			Self::Leaderboard => Some(Self::Title),
			_ => None,
		}
	}
}
