//! Geometry shared by the play and authoring scenes.
//!
//! Three coordinate spaces are in play:
//! - *image space*: pixels of the full-resolution source bitmap,
//! - *viewport space*: the image scaled to the window width and scrolled vertically,
//! - *screen space*: logical window pixels, origin top-left, y down.
//!
//! Everything that interprets a pointer position goes through a
//! [`ViewportContext`], which is rebuilt every tick from the live window and
//! active image sizes so resizes can never leave stale geometry behind.

use bevy::prelude::*;

/// Fraction of the window width taken up by the minimap
pub const MINIMAP_WIDTH_FRACTION: f32 = 0.25;

/// Distance between the minimap and the window edges, in logical pixels
pub const MINIMAP_MARGIN: f32 = 10.0;

/// How much the minimap grows while the pointer hovers over it
pub const MINIMAP_HOVER_ZOOM: f32 = 1.1;

/// Aspect ratio the map image is center-cropped to before it is
/// shown as a minimap thumbnail
pub const MINIMAP_CROP_RATIO: f32 = 16.0 / 9.0;

/// Fraction of the window height at the top and bottom where the pointer
/// drives the automatic scroll
pub const EDGE_SCROLL_BAND_FRACTION: f32 = 0.025;

/// Vertical auto-scroll rate, in viewport pixels per second
pub const EDGE_SCROLL_SPEED: f32 = 600.0;

/// Snapshot of the viewport geometry for one frame.
///
/// `scale` maps image space to viewport space; `scroll` is how far the
/// viewport has been scrolled down, in viewport pixels.
#[derive(Resource, Clone, Copy, PartialEq, Debug)]
pub struct ViewportContext {
	pub window: Vec2,
	pub image_size: Vec2,
	pub scale: f32,
	pub scaled_height: f32,
	pub scroll: f32,
}

impl Default for ViewportContext {
	fn default() -> Self {
		Self::layout(Vec2::new(1080.0, 720.0), Vec2::new(1080.0, 720.0))
	}
}

impl ViewportContext {
	/// Computes the geometry for a window and source image, with the scroll
	/// at the top of the image
	pub fn layout(window: Vec2, image_size: Vec2) -> Self {
		let image_size = image_size.max(Vec2::ONE);
		let scale = window.x / image_size.x;
		Self {
			window,
			image_size,
			scale,
			scaled_height: image_size.y * scale,
			scroll: 0.0,
		}
	}

	/// Recomputes the geometry in place, preserving (and re-clamping)
	/// the scroll offset
	pub fn refresh(&mut self, window: Vec2, image_size: Vec2) {
		let scroll = self.scroll;
		*self = Self::layout(window, image_size);
		self.scroll_to(scroll);
	}

	/// Greatest valid scroll offset; zero when the image fits the window
	pub fn max_scroll(&self) -> f32 {
		(self.scaled_height - self.window.y).max(0.0)
	}

	/// Sets the scroll offset, clamped into `[0, max_scroll]`
	pub fn scroll_to(&mut self, offset: f32) {
		self.scroll = offset.clamp(0.0, self.max_scroll());
	}

	/// Moves the scroll offset by a (possibly negative) delta, clamped
	pub fn scroll_by(&mut self, delta: f32) {
		self.scroll_to(self.scroll + delta);
	}

	/// Scroll direction (-1, 0 or +1) dictated by a pointer resting in the
	/// top or bottom edge band of the window
	pub fn edge_scroll_direction(&self, cursor: Vec2) -> f32 {
		if cursor.y < self.window.y * EDGE_SCROLL_BAND_FRACTION {
			-1.0
		} else if cursor.y > self.window.y * (1.0 - EDGE_SCROLL_BAND_FRACTION) {
			1.0
		} else {
			0.0
		}
	}

	/// Maps a screen-space point to full-resolution image space.
	///
	/// The scale correction applies to both axes; a point stored here can be
	/// compared directly against place definitions regardless of the window
	/// size it was clicked at.
	pub fn screen_to_image(&self, screen: Vec2) -> Vec2 {
		Vec2::new(screen.x, screen.y + self.scroll) / self.scale
	}

	/// Inverse of [`Self::screen_to_image`]
	pub fn image_to_screen(&self, image: Vec2) -> Vec2 {
		let scaled = image * self.scale;
		Vec2::new(scaled.x, scaled.y - self.scroll)
	}

	/// Length in image space scaled down to screen space
	pub fn image_to_screen_distance(&self, distance: f32) -> f32 {
		distance * self.scale
	}
}

/// Centered sub-rectangle of a source of the given size whose aspect ratio
/// equals `target_ratio` (width over height)
pub fn crop_to_aspect(size: Vec2, target_ratio: f32) -> Rect {
	let current_ratio = size.x / size.y;
	if current_ratio > target_ratio {
		let new_width = size.y * target_ratio;
		Rect::new(
			(size.x - new_width) / 2.0,
			0.0,
			(size.x + new_width) / 2.0,
			size.y,
		)
	} else {
		let new_height = size.x / target_ratio;
		Rect::new(
			0.0,
			(size.y - new_height) / 2.0,
			size.x,
			(size.y + new_height) / 2.0,
		)
	}
}

/// Screen-space rectangle where the minimap is rendered.
///
/// `source_size` is the size of the (possibly cropped) thumbnail source;
/// only its aspect ratio matters. The rectangle stays anchored to the
/// bottom-right margin as the hover zoom scales it up.
pub fn minimap_rect(window: Vec2, source_size: Vec2, zoom: f32) -> Rect {
	let width = window.x * MINIMAP_WIDTH_FRACTION * zoom;
	let height = width * source_size.y / source_size.x.max(1.0);
	let min = Vec2::new(
		window.x - width - MINIMAP_MARGIN,
		window.y - height - MINIMAP_MARGIN,
	);
	Rect::from_corners(min, min + Vec2::new(width, height))
}

/// Converts a screen-space point (origin top-left, y down) to world space
/// under a default centered 2D camera
pub fn screen_to_world(screen: Vec2, window: Vec2) -> Vec2 {
	Vec2::new(screen.x - window.x / 2.0, window.y / 2.0 - screen.y)
}

#[cfg(test)]
mod test {
	use super::*;

	fn context() -> ViewportContext {
		// 2000x4000 image in a 1000x700 window: scale 0.5, scaled height 2000
		ViewportContext::layout(Vec2::new(1000.0, 700.0), Vec2::new(2000.0, 4000.0))
	}

	#[test]
	fn scale_follows_window_width() {
		let ctx = context();
		assert_eq!(ctx.scale, 0.5);
		assert_eq!(ctx.scaled_height, 2000.0);
	}

	#[test]
	fn scroll_is_always_clamped() {
		let mut ctx = context();
		ctx.scroll_to(-50.0);
		assert_eq!(ctx.scroll, 0.0);
		ctx.scroll_to(1e6);
		assert_eq!(ctx.scroll, 1300.0);
		ctx.scroll_by(-2000.0);
		assert_eq!(ctx.scroll, 0.0);
	}

	#[test]
	fn short_image_does_not_scroll() {
		let mut ctx = ViewportContext::layout(Vec2::new(1000.0, 700.0), Vec2::new(2000.0, 1000.0));
		assert_eq!(ctx.max_scroll(), 0.0);
		ctx.scroll_by(120.0);
		assert_eq!(ctx.scroll, 0.0);
	}

	#[test]
	fn refresh_preserves_scroll_within_bounds() {
		let mut ctx = context();
		ctx.scroll_to(1300.0);
		// Taller window leaves less room to scroll
		ctx.refresh(Vec2::new(1000.0, 1500.0), Vec2::new(2000.0, 4000.0));
		assert_eq!(ctx.scroll, 500.0);
	}

	#[test]
	fn edge_bands_drive_scroll_direction() {
		let ctx = context();
		assert_eq!(ctx.edge_scroll_direction(Vec2::new(500.0, 10.0)), -1.0);
		assert_eq!(ctx.edge_scroll_direction(Vec2::new(500.0, 350.0)), 0.0);
		assert_eq!(ctx.edge_scroll_direction(Vec2::new(500.0, 695.0)), 1.0);
	}

	#[test]
	fn screen_to_image_applies_scale_and_scroll() {
		let mut ctx = context();
		ctx.scroll_to(300.0);
		// The x axis is corrected by the scale factor just like y
		assert_eq!(
			ctx.screen_to_image(Vec2::new(400.0, 100.0)),
			Vec2::new(800.0, 800.0)
		);
	}

	#[test]
	fn screen_image_round_trip() {
		let mut ctx = context();
		ctx.scroll_to(777.0);
		let screen = Vec2::new(123.0, 456.0);
		let round_trip = ctx.image_to_screen(ctx.screen_to_image(screen));
		assert!((round_trip - screen).length() < 1e-3);
	}

	#[test]
	fn crop_wide_source_to_sixteen_nine() {
		let rect = crop_to_aspect(Vec2::new(4000.0, 1000.0), MINIMAP_CROP_RATIO);
		assert_eq!(rect.min.y, 0.0);
		assert_eq!(rect.max.y, 1000.0);
		let width = rect.width();
		assert!((width / 1000.0 - MINIMAP_CROP_RATIO).abs() < 1e-4);
		// Centered
		assert!((rect.min.x - (4000.0 - width) / 2.0).abs() < 1e-4);
	}

	#[test]
	fn crop_tall_source_to_sixteen_nine() {
		let rect = crop_to_aspect(Vec2::new(1600.0, 2000.0), MINIMAP_CROP_RATIO);
		assert_eq!(rect.min.x, 0.0);
		assert_eq!(rect.max.x, 1600.0);
		assert!((rect.width() / rect.height() - MINIMAP_CROP_RATIO).abs() < 1e-4);
	}

	#[test]
	fn minimap_hugs_the_bottom_right_corner() {
		let window = Vec2::new(1080.0, 720.0);
		let rect = minimap_rect(window, Vec2::new(1600.0, 900.0), 1.0);
		assert_eq!(rect.width(), 270.0);
		assert!((rect.max.x - (window.x - MINIMAP_MARGIN)).abs() < 1e-4);
		assert!((rect.max.y - (window.y - MINIMAP_MARGIN)).abs() < 1e-4);

		// Hover zoom grows the rect but keeps the anchor corner in place
		let zoomed = minimap_rect(window, Vec2::new(1600.0, 900.0), MINIMAP_HOVER_ZOOM);
		assert!(zoomed.width() > rect.width());
		assert!((zoomed.max - rect.max).length() < 1e-4);
	}

	#[test]
	fn screen_to_world_centers_the_origin() {
		let window = Vec2::new(1000.0, 700.0);
		assert_eq!(screen_to_world(Vec2::new(500.0, 350.0), window), Vec2::ZERO);
		assert_eq!(screen_to_world(Vec2::ZERO, window), Vec2::new(-500.0, 350.0));
	}
}
