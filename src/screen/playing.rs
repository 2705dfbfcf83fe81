//! The guessing screen: one session of rounds.
//!
//! Each round shows a random photo; the player swaps to the map through the
//! minimap, places a candidate pin, confirms it and gets shown how far off
//! they were. Banked round scores add up into the session total, which is
//! recorded when the session ends.

use bevy::prelude::*;

use super::Screen;
use crate::{
	assets::{GlobalFont, HandleMap, ImageKey, PhotoIds},
	game::{
		place::Place,
		round::{ActiveView, GuessPhase, RoundEffect, RoundEvent, RoundState},
		scene::{self, SceneClick, SceneImages, SceneView},
		session::{GameRng, Session},
	},
	graphics::{self, layers},
	persistent::{places::PlaceLibrary, scores::ScoreLog},
	ui::prelude::*,
	viewport::{self, ViewportContext},
	AppSet,
};

pub(super) fn plugin(app: &mut App) {
	app.add_event::<StartRound>();
	app.register_type::<PlayingAction>();
	app.add_systems(OnEnter(Screen::Playing), enter_playing);
	app.add_systems(
		Update,
		(
			handle_playing_action.in_set(AppSet::RecordInput),
			(translate_scene_clicks, apply_round_events)
				.chain()
				.in_set(AppSet::ExecuteInput),
			start_round.in_set(AppSet::GameLogic),
			(
				update_pin,
				update_action_buttons,
				update_score_label,
				draw_round_markers,
			)
				.in_set(AppSet::UpdateVisuals),
		)
			.run_if(in_state(Screen::Playing)),
	);
}

/// Sent whenever the next round should be drawn and set up
#[derive(Event, Debug, Default)]
struct StartRound;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
enum PlayingAction {
	ConfirmGuess,
	NextRound,
}

/// Marker sprite for the candidate guess
#[derive(Component)]
struct GuessPin;

/// World-space text showing the score of the locked guess
#[derive(Component)]
struct ScoreLabel;

fn enter_playing(
	mut commands: Commands,
	font: Res<GlobalFont>,
	image_handles: Res<HandleMap<ImageKey>>,
	mut start: EventWriter<StartRound>,
) {
	commands.spawn((scene::primary_image(), StateScoped(Screen::Playing)));
	commands.spawn((scene::minimap_image(), StateScoped(Screen::Playing)));
	commands.spawn((
		Name::new("Guess Pin"),
		GuessPin,
		StateScoped(Screen::Playing),
		Sprite {
			image: image_handles[&ImageKey::Pin].clone_weak(),
			custom_size: Some(graphics::PIN_SIZE),
			..default()
		},
		Visibility::Hidden,
	));
	commands
		.spawn((
			widgets::ui_root_justified(JustifyContent::FlexEnd),
			StateScoped(Screen::Playing),
		))
		.with_children(|children| {
			children.spawn((
				widgets::inline_button("Confirm guess", font.0.clone_weak()),
				PlayingAction::ConfirmGuess,
				Visibility::Hidden,
			));
			children.spawn((
				widgets::inline_button("Next", font.0.clone_weak()),
				PlayingAction::NextRound,
				Visibility::Hidden,
			));
		});
	start.write(StartRound);
}

/// Sets up the next round, or ends the session when there is none.
///
/// The session also ends early when every marked photo has been played.
fn start_round(
	mut commands: Commands,
	mut start_events: EventReader<StartRound>,
	mut session: ResMut<Session>,
	photos: Res<PhotoIds>,
	library: Res<PlaceLibrary>,
	mut rng: ResMut<GameRng>,
	image_handles: Res<HandleMap<ImageKey>>,
	asset_server: Res<AssetServer>,
	mut round: ResMut<RoundState>,
	mut view: ResMut<SceneView>,
	mut ctx: ResMut<ViewportContext>,
	time: Res<Time>,
	mut score_log: ResMut<ScoreLog>,
	mut next_screen: ResMut<NextState<Screen>>,
	score_labels: Query<Entity, With<ScoreLabel>>,
) {
	if start_events.is_empty() {
		return;
	}
	start_events.clear();
	for entity in &score_labels {
		commands.entity(entity).despawn();
	}
	let place = (!session.is_complete())
		.then(|| session.draw_place(&photos, &library, &mut **rng))
		.flatten();
	let Some(place) = place else {
		score_log.append(session.to_record(time.elapsed_secs_f64()));
		next_screen.set(Screen::Leaderboard);
		return;
	};
	log::info!(
		"Round {} of {}: {}",
		session.rounds_played(),
		session.rounds_total,
		place.id
	);
	commands.insert_resource(SceneImages {
		photo: asset_server.load(place.image_path()),
		map: image_handles[&ImageKey::Map].clone_weak(),
	});
	commands.insert_resource(place);
	*round = RoundState::default();
	*view = SceneView::default();
	ctx.scroll_to(0.0);
}

fn handle_playing_action(
	mut button_query: InteractionQuery<&PlayingAction>,
	mut round_events: EventWriter<RoundEvent>,
) {
	for (interaction, _, action) in &mut button_query {
		if *interaction != Interaction::Pressed {
			continue;
		}
		round_events.write(match action {
			PlayingAction::ConfirmGuess => RoundEvent::ConfirmGuess,
			PlayingAction::NextRound => RoundEvent::Advance,
		});
	}
}

fn translate_scene_clicks(
	mut scene_clicks: EventReader<SceneClick>,
	mut round_events: EventWriter<RoundEvent>,
) {
	for click in scene_clicks.read() {
		round_events.write(match click {
			SceneClick::Minimap => RoundEvent::SwapViews,
			SceneClick::Field(pos) => RoundEvent::ClickField(*pos),
		});
	}
}

fn apply_round_events(
	mut commands: Commands,
	mut events: EventReader<RoundEvent>,
	mut round: ResMut<RoundState>,
	place: Option<ResMut<Place>>,
	mut session: ResMut<Session>,
	mut view: ResMut<SceneView>,
	mut ctx: ResMut<ViewportContext>,
	mut start: EventWriter<StartRound>,
	font: Res<GlobalFont>,
) {
	let Some(mut place) = place else {
		return;
	};
	for &event in events.read() {
		match round.apply(event, &mut place) {
			RoundEffect::None | RoundEffect::CandidatePlaced => {}
			RoundEffect::ViewSwapped => {
				**view = round.view;
				ctx.scroll_to(0.0);
			}
			RoundEffect::GuessScored(score) => {
				log::info!("Scored {score} points on {}", place.id);
				commands.spawn((
					score_label(score, font.0.clone_weak()),
					StateScoped(Screen::Playing),
				));
			}
			RoundEffect::Finished(score) => {
				session.bank_round(score);
				start.write(StartRound);
			}
		}
	}
}

fn score_label(score: u32, font: Handle<Font>) -> impl Bundle {
	(
		Name::new("Score Label"),
		ScoreLabel,
		Text2d::new(format!("{score}")),
		TextFont {
			font_size: 32.0,
			font,
			..default()
		},
		TextColor(graphics::SCORE_LINE_COLOR),
		Visibility::Hidden,
	)
}

fn update_pin(
	round: Res<RoundState>,
	ctx: Res<ViewportContext>,
	mut pin_query: Query<(&mut Transform, &mut Visibility), With<GuessPin>>,
) {
	for (mut transform, mut visibility) in &mut pin_query {
		let pin = (round.view == ActiveView::Map)
			.then(|| round.pin_position())
			.flatten();
		let Some(position) = pin else {
			*visibility = Visibility::Hidden;
			continue;
		};
		*visibility = Visibility::Visible;
		// The pin sprite's bottom center points at the guessed position
		let world = viewport::screen_to_world(ctx.image_to_screen(position), ctx.window)
			+ Vec2::new(0.0, graphics::PIN_SIZE.y / 2.0);
		transform.translation = world.extend(layers::PIN);
	}
}

fn update_action_buttons(
	round: Res<RoundState>,
	mut button_query: Query<(&PlayingAction, &mut Visibility)>,
) {
	for (action, mut visibility) in &mut button_query {
		let shown = match action {
			PlayingAction::ConfirmGuess => matches!(round.phase, GuessPhase::Candidate(_)),
			PlayingAction::NextRound => matches!(round.phase, GuessPhase::Locked { .. }),
		};
		*visibility = if shown {
			Visibility::Visible
		} else {
			Visibility::Hidden
		};
	}
}

fn update_score_label(
	round: Res<RoundState>,
	place: Option<Res<Place>>,
	ctx: Res<ViewportContext>,
	mut label_query: Query<(&mut Transform, &mut Visibility), With<ScoreLabel>>,
) {
	let Some(place) = place else {
		return;
	};
	for (mut transform, mut visibility) in &mut label_query {
		let (Some(guess), ActiveView::Map) = (place.guess, round.view) else {
			*visibility = Visibility::Hidden;
			continue;
		};
		*visibility = Visibility::Visible;
		let midpoint = ctx.image_to_screen((place.position + guess) / 2.0);
		let world = viewport::screen_to_world(midpoint, ctx.window);
		transform.translation = world.extend(layers::SCORE_LABEL);
	}
}

/// Reveals the true location once the guess is locked in: the tolerance
/// circle plus a line connecting the guess to the answer
fn draw_round_markers(
	round: Res<RoundState>,
	place: Option<Res<Place>>,
	ctx: Res<ViewportContext>,
	mut gizmos: Gizmos,
) {
	let Some(place) = place else {
		return;
	};
	if round.view != ActiveView::Map || round.locked_score().is_none() {
		return;
	}
	let center = viewport::screen_to_world(ctx.image_to_screen(place.position), ctx.window);
	gizmos.circle_2d(
		center,
		ctx.image_to_screen_distance(place.radius),
		graphics::TRUE_RADIUS_COLOR,
	);
	if let Some(guess) = place.guess {
		let guess_world = viewport::screen_to_world(ctx.image_to_screen(guess), ctx.window);
		gizmos.line_2d(guess_world, center, graphics::SCORE_LINE_COLOR);
	}
}
