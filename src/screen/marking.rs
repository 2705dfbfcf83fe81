//! The authoring screen: mark the true position and tolerance radius of
//! every photo that does not have a place definition yet.
//!
//! Two clicks on the map define a mark: first the center, then a point on
//! the circle's edge. Saving writes the definition to the place library
//! and moves on to the next unmarked photo; the app exits when none are
//! left.

use bevy::prelude::*;

use super::Screen;
use crate::{
	assets::{GlobalFont, HandleMap, ImageKey, PhotoIds},
	game::{
		marking::{MarkEffect, MarkEvent, MarkPhase},
		round::ActiveView,
		scene::{self, SceneClick, SceneImages, SceneView},
	},
	graphics,
	persistent::places::{PlaceLibrary, PlaceRecord},
	ui::prelude::*,
	viewport::{self, ViewportContext},
	AppSet,
};

pub(super) fn plugin(app: &mut App) {
	app.add_event::<StartMark>();
	app.register_type::<MarkingAction>();
	app.add_systems(OnEnter(Screen::Marking), enter_marking);
	app.add_systems(
		Update,
		(
			handle_marking_action.in_set(AppSet::RecordInput),
			apply_mark_input.in_set(AppSet::ExecuteInput),
			start_mark.in_set(AppSet::GameLogic),
			(update_marking_buttons, draw_mark_preview).in_set(AppSet::UpdateVisuals),
		)
			.run_if(in_state(Screen::Marking)),
	);
}

/// Sent whenever the next unmarked photo should be brought up
#[derive(Event, Debug, Default)]
struct StartMark;

/// Photos still waiting for a mark, in reverse manifest order
#[derive(Resource, Debug, Default)]
struct MarkQueue {
	pending: Vec<String>,
}

/// Id of the photo currently being marked
#[derive(Resource, Debug)]
struct CurrentPhoto(String);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
enum MarkingAction {
	Redo,
	Save,
}

fn enter_marking(
	mut commands: Commands,
	font: Res<GlobalFont>,
	photos: Res<PhotoIds>,
	library: Res<PlaceLibrary>,
	mut start: EventWriter<StartMark>,
) {
	let mut pending: Vec<String> = photos
		.iter()
		.filter(|id| !library.contains(id))
		.cloned()
		.collect();
	log::info!(
		"{} of {} photos still need marking",
		pending.len(),
		photos.len()
	);
	pending.reverse();
	commands.insert_resource(MarkQueue { pending });

	commands.spawn((scene::primary_image(), StateScoped(Screen::Marking)));
	commands.spawn((scene::minimap_image(), StateScoped(Screen::Marking)));
	commands
		.spawn((
			widgets::ui_root_justified(JustifyContent::FlexEnd),
			StateScoped(Screen::Marking),
		))
		.with_children(|children| {
			children.spawn((
				widgets::inline_button("Redo", font.0.clone_weak()),
				MarkingAction::Redo,
				Visibility::Hidden,
			));
			children.spawn((
				widgets::inline_button("Save", font.0.clone_weak()),
				MarkingAction::Save,
				Visibility::Hidden,
			));
		});
	start.write(StartMark);
}

fn start_mark(
	mut commands: Commands,
	mut start_events: EventReader<StartMark>,
	mut queue: ResMut<MarkQueue>,
	image_handles: Res<HandleMap<ImageKey>>,
	asset_server: Res<AssetServer>,
	mut phase: ResMut<MarkPhase>,
	mut view: ResMut<SceneView>,
	mut ctx: ResMut<ViewportContext>,
	mut app_exit: EventWriter<AppExit>,
) {
	if start_events.is_empty() {
		return;
	}
	start_events.clear();
	let Some(id) = queue.pending.pop() else {
		log::info!("All photos are marked");
		app_exit.write(AppExit::Success);
		return;
	};
	commands.insert_resource(SceneImages {
		photo: asset_server.load(format!("images/guessing/{id}")),
		map: image_handles[&ImageKey::Map].clone_weak(),
	});
	commands.insert_resource(CurrentPhoto(id));
	*phase = MarkPhase::default();
	*view = SceneView::default();
	ctx.scroll_to(0.0);
}

fn handle_marking_action(
	mut button_query: InteractionQuery<&MarkingAction>,
	mut mark_events: EventWriter<MarkEvent>,
) {
	for (interaction, _, action) in &mut button_query {
		if *interaction != Interaction::Pressed {
			continue;
		}
		mark_events.write(match action {
			MarkingAction::Redo => MarkEvent::Redo,
			MarkingAction::Save => MarkEvent::Advance,
		});
	}
}

fn apply_mark_input(
	mut scene_clicks: EventReader<SceneClick>,
	mut mark_events: EventReader<MarkEvent>,
	mut phase: ResMut<MarkPhase>,
	mut view: ResMut<SceneView>,
	mut ctx: ResMut<ViewportContext>,
	mut library: ResMut<PlaceLibrary>,
	current: Option<Res<CurrentPhoto>>,
	mut start: EventWriter<StartMark>,
) {
	for &click in scene_clicks.read() {
		match click {
			SceneClick::Minimap => {
				// Swapping views restarts the mark, same as a redo
				**view = view.swapped();
				ctx.scroll_to(0.0);
				phase.apply(MarkEvent::Redo);
			}
			SceneClick::Field(pos) => {
				// Marks are placed on the map only
				if **view == ActiveView::Map {
					phase.apply(MarkEvent::Click(pos));
				}
			}
		}
	}
	for &event in mark_events.read() {
		if let MarkEffect::Commit { center, radius } = phase.apply(event) {
			let Some(current) = current.as_ref() else {
				continue;
			};
			log::info!("Marked {} at {center} with radius {radius}", current.0);
			library.insert(
				current.0.clone(),
				PlaceRecord {
					x: center.x,
					y: center.y,
					radius,
				},
			);
			start.write(StartMark);
		}
	}
}

fn update_marking_buttons(
	phase: Res<MarkPhase>,
	mut button_query: Query<(&MarkingAction, &mut Visibility)>,
) {
	for (action, mut visibility) in &mut button_query {
		let shown = match action {
			MarkingAction::Redo => phase.center().is_some(),
			MarkingAction::Save => matches!(*phase, MarkPhase::Committed { .. }),
		};
		*visibility = if shown {
			Visibility::Visible
		} else {
			Visibility::Hidden
		};
	}
}

/// Live preview of the mark: a cross at the center and, once a second
/// point is in play, the tolerance circle
fn draw_mark_preview(
	window: Single<&Window>,
	phase: Res<MarkPhase>,
	view: Res<SceneView>,
	ctx: Res<ViewportContext>,
	mut gizmos: Gizmos,
) {
	if **view != ActiveView::Map {
		return;
	}
	let Some(center) = phase.center() else {
		return;
	};
	let center_world = viewport::screen_to_world(ctx.image_to_screen(center), ctx.window);
	gizmos.cross_2d(center_world, 6.0, graphics::MARKING_COLOR);
	let radius = match *phase {
		MarkPhase::Committed { radius, .. } => Some(radius),
		_ => window
			.cursor_position()
			.and_then(|cursor| phase.preview_radius(ctx.screen_to_image(cursor))),
	};
	if let Some(radius) = radius.filter(|radius| *radius > 0.0) {
		gizmos.circle_2d(
			center_world,
			ctx.image_to_screen_distance(radius),
			graphics::MARKING_COLOR,
		);
	}
}
