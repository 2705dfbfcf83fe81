use bevy::{color::palettes::tailwind::*, prelude::*};

pub const BUTTON_HOVERED_BACKGROUND: Color = Color::Srgba(SLATE_500);
pub const BUTTON_PRESSED_BACKGROUND: Color = Color::Srgba(SLATE_300);
pub const BUTTON_DISABLED_BACKGROUND: Color = Color::Srgba(Srgba {
	alpha: 0.5,
	..SLATE_400
});

pub const BUTTON_TEXT: Color = Color::Srgba(SLATE_50);
pub const LABEL_TEXT: Color = Color::Srgba(SLATE_800);
pub const HEADER_TEXT: Color = BUTTON_TEXT;

pub const NODE_BACKGROUND: Color = Color::Srgba(SLATE_400);

pub const NAME_FIELD_BACKGROUND: Color = Color::Srgba(SLATE_200);
pub const NAME_FIELD_TEXT: Color = Color::Srgba(SLATE_800);
pub const NAME_FIELD_PLACEHOLDER: Color = Color::Srgba(SLATE_500);

pub const MINIMAP_BORDER: Color = Color::Srgba(SLATE_50);

pub const MARKER_RED: Color = Color::Srgba(RED_500);
pub const MARKER_GREEN: Color = Color::Srgba(GREEN_500);
