use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
	app.register_type::<InteractionPalette>();
	app.add_systems(Update, apply_interaction_palette);
}

/// Indicates whether a UI element can be interacted with
///
/// Disabled elements keep their disabled colour and their presses
/// are ignored by the action handlers.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug, Deref, DerefMut, Reflect)]
#[reflect(Component)]
pub struct InteractionEnabled(pub bool);

impl Default for InteractionEnabled {
	fn default() -> Self {
		Self(true)
	}
}

pub type InteractionQuery<'w, 's, T, F = ()> = Query<
	'w,
	's,
	(&'static Interaction, Option<&'static InteractionEnabled>, T),
	(Or<(Changed<Interaction>, Changed<InteractionEnabled>)>, F),
>;

/// Palette for widget interactions.
#[derive(Component, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct InteractionPalette {
	pub none: Color,
	pub hovered: Color,
	pub pressed: Color,
	pub disabled: Color,
}

fn apply_interaction_palette(
	mut palette_query: InteractionQuery<(&InteractionPalette, &mut BackgroundColor)>,
) {
	for (interaction, enabled, (palette, mut background)) in &mut palette_query {
		*background = if !enabled.copied().unwrap_or_default().0 {
			palette.disabled
		} else {
			match interaction {
				Interaction::None => palette.none,
				Interaction::Hovered => palette.hovered,
				Interaction::Pressed => palette.pressed,
			}
		}
		.into();
	}
}
