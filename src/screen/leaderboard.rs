//! Final standings shown after a session.

use bevy::prelude::*;

use super::Screen;
use crate::{
	assets::GlobalFont,
	persistent::scores::{ScoreLog, LEADERBOARD_SIZE},
	ui::prelude::*,
};

pub(super) fn plugin(app: &mut App) {
	app.register_type::<LeaderboardAction>();
	app.add_systems(OnEnter(Screen::Leaderboard), enter_leaderboard);
	app.add_systems(
		Update,
		handle_leaderboard_action.run_if(in_state(Screen::Leaderboard)),
	);
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
enum LeaderboardAction {
	PlayAgain,
	/// Exit doesn't work well with embedded applications.
	#[cfg(not(target_family = "wasm"))]
	Exit,
}

fn enter_leaderboard(mut commands: Commands, font: Res<GlobalFont>, score_log: Res<ScoreLog>) {
	commands
		.spawn((widgets::ui_root(), StateScoped(Screen::Leaderboard)))
		.with_children(|children| {
			children.spawn(widgets::header("Best results", font.0.clone_weak()));
			if score_log.is_empty() {
				children.spawn(widgets::label(
					"No sessions recorded yet",
					font.0.clone_weak(),
				));
			}
			for (rank, record) in score_log.standings(LEADERBOARD_SIZE).iter().enumerate() {
				children.spawn(widgets::label(
					format!(
						"{}. {} - {} points in {:.0} s ({})",
						rank + 1,
						record.name,
						record.points,
						record.elapsed_seconds,
						record.date,
					),
					font.0.clone_weak(),
				));
			}
			children.spawn((
				widgets::menu_button("Play again", font.0.clone_weak()),
				LeaderboardAction::PlayAgain,
			));

			#[cfg(not(target_family = "wasm"))]
			children.spawn((
				widgets::menu_button("Exit", font.0.clone_weak()),
				LeaderboardAction::Exit,
			));
		});
}

fn handle_leaderboard_action(
	mut button_query: InteractionQuery<&LeaderboardAction>,
	mut next_screen: ResMut<NextState<Screen>>,
	#[cfg(not(target_family = "wasm"))] mut app_exit: EventWriter<AppExit>,
) {
	for (interaction, _, action) in &mut button_query {
		if *interaction != Interaction::Pressed {
			continue;
		}
		match action {
			LeaderboardAction::PlayAgain => next_screen.set(Screen::Title),
			#[cfg(not(target_family = "wasm"))]
			LeaderboardAction::Exit => {
				app_exit.write(AppExit::Success);
			}
		}
	}
}
