//! Presentation plumbing shared by the play and authoring scenes.
//!
//! Both scenes show one image filling the window width (scrollable when it
//! is taller than the window) and the other image as a minimap thumbnail in
//! the bottom-right corner. The systems here keep the [`ViewportContext`]
//! fresh, drive the edge-band auto-scroll, place the two sprites and turn
//! raw pointer clicks into [`SceneClick`] events for the scene to interpret.

use bevy::{prelude::*, sprite::Anchor};

use crate::{
	graphics::layers,
	screen::Screen,
	ui::palette,
	viewport::{self, ViewportContext},
	AppSet,
};

use super::round::ActiveView;

pub(super) fn plugin(app: &mut App) {
	app.init_resource::<ViewportContext>();
	app.init_resource::<SceneView>();
	app.init_resource::<MinimapLayout>();
	app.add_event::<SceneClick>();
	app.add_systems(
		Update,
		(
			(refresh_viewport, layout_minimap, edge_scroll)
				.chain()
				.in_set(AppSet::TickTimers),
			route_clicks.in_set(AppSet::RecordInput),
			(sync_primary_sprite, sync_minimap_sprite, draw_minimap_border)
				.in_set(AppSet::UpdateVisuals),
		)
			.run_if(scene_active),
	);
}

/// The play and authoring screens share the scene systems
pub fn scene_active(screen: Res<State<Screen>>) -> bool {
	matches!(screen.get(), Screen::Playing | Screen::Marking)
}

/// The two images shown by the current scene, set up once per round
#[derive(Resource, Clone, Debug)]
pub struct SceneImages {
	pub photo: Handle<Image>,
	pub map: Handle<Image>,
}

impl SceneImages {
	pub fn active(&self, view: ActiveView) -> &Handle<Image> {
		match view {
			ActiveView::Photo => &self.photo,
			ActiveView::Map => &self.map,
		}
	}

	pub fn inactive(&self, view: ActiveView) -> &Handle<Image> {
		self.active(view.swapped())
	}
}

/// Which of the two images currently fills the viewport
#[derive(Resource, Clone, Copy, PartialEq, Eq, Debug, Default, Deref, DerefMut)]
pub struct SceneView(pub ActiveView);

/// Where the minimap sits this frame and which part of its source it shows
#[derive(Resource, Clone, Copy, PartialEq, Debug, Default)]
pub struct MinimapLayout {
	/// Screen-space rectangle the thumbnail is rendered into
	pub display: Rect,
	/// Sub-rectangle of the source image, if it gets cropped
	pub source_rect: Option<Rect>,
	pub hovered: bool,
}

/// A pointer click, already attributed to a part of the scene.
///
/// Clicks landing on UI buttons are swallowed before they get here.
#[derive(Event, Clone, Copy, PartialEq, Debug)]
pub enum SceneClick {
	/// Click on the minimap thumbnail
	Minimap,
	/// Click on the primary view, converted to image space
	Field(Vec2),
}

/// Marks the sprite showing the primary view
#[derive(Component)]
pub struct PrimaryImage;

/// Marks the minimap thumbnail sprite
#[derive(Component)]
pub struct MinimapImage;

/// The primary view sprite; its image and layout are synced every frame
pub fn primary_image() -> impl Bundle {
	(
		Name::new("Primary View"),
		PrimaryImage,
		Sprite {
			anchor: Anchor::TopLeft,
			..default()
		},
	)
}

pub fn minimap_image() -> impl Bundle {
	(
		Name::new("Minimap"),
		MinimapImage,
		Sprite {
			anchor: Anchor::TopLeft,
			..default()
		},
	)
}

fn refresh_viewport(
	window: Single<&Window>,
	images: Option<Res<SceneImages>>,
	assets: Res<Assets<Image>>,
	view: Res<SceneView>,
	mut ctx: ResMut<ViewportContext>,
) {
	let Some(images) = images else {
		return;
	};
	let Some(image) = assets.get(images.active(**view)) else {
		return;
	};
	ctx.refresh(window.size(), image.size_f32());
}

fn layout_minimap(
	window: Single<&Window>,
	images: Option<Res<SceneImages>>,
	assets: Res<Assets<Image>>,
	view: Res<SceneView>,
	mut layout: ResMut<MinimapLayout>,
) {
	let Some(images) = images else {
		return;
	};
	let Some(source) = assets.get(images.inactive(**view)) else {
		return;
	};
	// The map thumbnail is center-cropped to a fixed aspect, photos are
	// thumbnailed whole
	let source_rect = (**view == ActiveView::Photo)
		.then(|| viewport::crop_to_aspect(source.size_f32(), viewport::MINIMAP_CROP_RATIO));
	let source_size = source_rect.map_or(source.size_f32(), |rect| rect.size());
	let base = viewport::minimap_rect(window.size(), source_size, 1.0);
	let hovered = window
		.cursor_position()
		.is_some_and(|cursor| base.contains(cursor));
	let zoom = if hovered {
		viewport::MINIMAP_HOVER_ZOOM
	} else {
		1.0
	};
	*layout = MinimapLayout {
		display: viewport::minimap_rect(window.size(), source_size, zoom),
		source_rect,
		hovered,
	};
}

fn edge_scroll(
	window: Single<&Window>,
	time: Res<Time>,
	layout: Res<MinimapLayout>,
	mut ctx: ResMut<ViewportContext>,
) {
	let Some(cursor) = window.cursor_position() else {
		return;
	};
	if layout.hovered {
		return;
	}
	let direction = ctx.edge_scroll_direction(cursor);
	ctx.scroll_by(direction * viewport::EDGE_SCROLL_SPEED * time.delta_secs());
}

fn route_clicks(
	mouse: Res<ButtonInput<MouseButton>>,
	window: Single<&Window>,
	ctx: Res<ViewportContext>,
	layout: Res<MinimapLayout>,
	buttons: Query<&Interaction, With<Button>>,
	mut clicks: EventWriter<SceneClick>,
) {
	if !mouse.just_pressed(MouseButton::Left) {
		return;
	}
	let Some(cursor) = window.cursor_position() else {
		return;
	};
	// UI buttons swallow clicks
	if buttons
		.iter()
		.any(|interaction| *interaction != Interaction::None)
	{
		return;
	}
	if layout.display.contains(cursor) {
		clicks.write(SceneClick::Minimap);
	} else {
		clicks.write(SceneClick::Field(ctx.screen_to_image(cursor)));
	}
}

fn sync_primary_sprite(
	images: Option<Res<SceneImages>>,
	view: Res<SceneView>,
	ctx: Res<ViewportContext>,
	mut sprites: Query<(&mut Sprite, &mut Transform), With<PrimaryImage>>,
) {
	let Some(images) = images else {
		return;
	};
	for (mut sprite, mut transform) in &mut sprites {
		sprite.image = images.active(**view).clone();
		sprite.custom_size = Some(Vec2::new(ctx.window.x, ctx.scaled_height));
		sprite.rect = None;
		let top_left = viewport::screen_to_world(Vec2::new(0.0, -ctx.scroll), ctx.window);
		*transform = Transform::from_translation(top_left.extend(layers::PRIMARY));
	}
}

fn sync_minimap_sprite(
	images: Option<Res<SceneImages>>,
	view: Res<SceneView>,
	ctx: Res<ViewportContext>,
	layout: Res<MinimapLayout>,
	mut sprites: Query<(&mut Sprite, &mut Transform), With<MinimapImage>>,
) {
	let Some(images) = images else {
		return;
	};
	for (mut sprite, mut transform) in &mut sprites {
		sprite.image = images.inactive(**view).clone();
		sprite.custom_size = Some(layout.display.size());
		sprite.rect = layout.source_rect;
		let top_left = viewport::screen_to_world(layout.display.min, ctx.window);
		*transform = Transform::from_translation(top_left.extend(layers::MINIMAP));
	}
}

fn draw_minimap_border(layout: Res<MinimapLayout>, ctx: Res<ViewportContext>, mut gizmos: Gizmos) {
	if layout.display.size() == Vec2::ZERO {
		return;
	}
	let center = viewport::screen_to_world(layout.display.center(), ctx.window);
	gizmos.rect_2d(center, layout.display.size(), palette::MINIMAP_BORDER);
}
