//! The title screen: type a player name and start a session.

use bevy::{
	input::keyboard::{Key, KeyboardInput},
	prelude::*,
	ui::Val::*,
};

use super::Screen;
use crate::{
	assets::{GlobalFont, HandleMap, ImageKey},
	game::session::Session,
	ui::prelude::*,
	AppSet,
};

/// Longest accepted player name, in characters
const MAX_NAME_LENGTH: usize = 24;

const NAME_PLACEHOLDER: &str = "Type your name";

pub(super) fn plugin(app: &mut App) {
	app.init_resource::<PlayerName>();
	app.register_type::<TitleAction>();
	app.add_systems(OnEnter(Screen::Title), enter_title);
	app.add_systems(
		Update,
		(
			(read_name_input, handle_title_action).in_set(AppSet::RecordInput),
			(update_name_display, update_start_enabled).in_set(AppSet::UpdateVisuals),
		)
			.run_if(in_state(Screen::Title)),
	);
}

/// The name the session's score will be recorded under.
///
/// Kept across sessions so playing again does not mean retyping it.
#[derive(Resource, Clone, Debug, Default, Deref, DerefMut)]
pub struct PlayerName(pub String);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
enum TitleAction {
	Start,
	/// Exit doesn't work well with embedded applications.
	#[cfg(not(target_family = "wasm"))]
	Exit,
}

#[derive(Component)]
struct NameText;

fn enter_title(
	mut commands: Commands,
	font: Res<GlobalFont>,
	image_handles: Res<HandleMap<ImageKey>>,
) {
	commands.spawn((
		Name::new("Title Background"),
		StateScoped(Screen::Title),
		Sprite {
			image: image_handles[&ImageKey::Title].clone_weak(),
			..default()
		},
	));
	commands
		.spawn((widgets::ui_root(), StateScoped(Screen::Title)))
		.with_children(|children| {
			children.spawn(widgets::header("Campus Guessr", font.0.clone_weak()));
			children
				.spawn((
					Name::new("Name Field"),
					Node {
						width: Px(400.0),
						height: Px(50.0),
						justify_content: JustifyContent::Center,
						align_items: AlignItems::Center,
						..default()
					},
					BackgroundColor(palette::NAME_FIELD_BACKGROUND),
				))
				.with_children(|field| {
					field.spawn((
						Name::new("Name Text"),
						NameText,
						Text::new(NAME_PLACEHOLDER),
						TextFont {
							font_size: 24.0,
							font: font.0.clone_weak(),
							..default()
						},
						TextColor(palette::NAME_FIELD_PLACEHOLDER),
					));
				});
			children.spawn((
				widgets::menu_button("Start", font.0.clone_weak()),
				InteractionEnabled(false),
				TitleAction::Start,
			));

			#[cfg(not(target_family = "wasm"))]
			children.spawn((
				widgets::menu_button("Exit", font.0.clone_weak()),
				TitleAction::Exit,
			));
		});
}

fn read_name_input(
	mut commands: Commands,
	mut events: EventReader<KeyboardInput>,
	mut name: ResMut<PlayerName>,
	time: Res<Time>,
	mut next_screen: ResMut<NextState<Screen>>,
) {
	for input in events.read() {
		if !input.state.is_pressed() {
			continue;
		}
		match &input.logical_key {
			Key::Backspace => {
				name.pop();
			}
			Key::Space => {
				if name.chars().count() < MAX_NAME_LENGTH {
					name.push(' ');
				}
			}
			Key::Enter => {
				if !name.trim().is_empty() {
					start_session(&mut commands, &name, &time, &mut next_screen);
				}
			}
			Key::Character(typed) => {
				for c in typed.chars().filter(|c| !c.is_control()) {
					if name.chars().count() < MAX_NAME_LENGTH {
						name.push(c);
					}
				}
			}
			_ => {}
		}
	}
}

fn start_session(
	commands: &mut Commands,
	name: &PlayerName,
	time: &Time,
	next_screen: &mut NextState<Screen>,
) {
	commands.insert_resource(Session::new(name.trim(), time.elapsed_secs_f64()));
	next_screen.set(Screen::Playing);
}

fn handle_title_action(
	mut commands: Commands,
	mut button_query: InteractionQuery<&TitleAction>,
	name: Res<PlayerName>,
	time: Res<Time>,
	mut next_screen: ResMut<NextState<Screen>>,
	#[cfg(not(target_family = "wasm"))] mut app_exit: EventWriter<AppExit>,
) {
	for (interaction, enabled, action) in &mut button_query {
		if !enabled.copied().unwrap_or_default().0 || *interaction != Interaction::Pressed {
			continue;
		}
		match action {
			TitleAction::Start => start_session(&mut commands, &name, &time, &mut next_screen),
			#[cfg(not(target_family = "wasm"))]
			TitleAction::Exit => {
				app_exit.write(AppExit::Success);
			}
		}
	}
}

fn update_name_display(
	name: Res<PlayerName>,
	mut text_query: Query<(&mut Text, &mut TextColor), With<NameText>>,
) {
	for (mut text, mut color) in &mut text_query {
		if name.is_empty() {
			text.0 = String::from(NAME_PLACEHOLDER);
			color.0 = palette::NAME_FIELD_PLACEHOLDER;
		} else {
			text.0.clone_from(&name.0);
			color.0 = palette::NAME_FIELD_TEXT;
		}
	}
}

fn update_start_enabled(
	name: Res<PlayerName>,
	mut button_query: Query<(&TitleAction, &mut InteractionEnabled)>,
) {
	for (action, mut enabled) in &mut button_query {
		if *action == TitleAction::Start {
			enabled.set_if_neq(InteractionEnabled(!name.trim().is_empty()));
		}
	}
}
