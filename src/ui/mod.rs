//! Reusable UI widgets & theming.

pub mod interaction;
pub mod palette;
pub mod widgets;

#[allow(unused_imports)]
pub mod prelude {
	pub use super::{
		interaction::{InteractionEnabled, InteractionPalette, InteractionQuery},
		palette, widgets,
	};
}

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
	app.add_plugins(interaction::plugin);
}
