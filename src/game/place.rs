//! The guessable place entity and its scoring model

use bevy::prelude::*;

/// Image-space distance (beyond the tolerance radius) at which
/// a guess stops scoring any points
pub const MAX_SCORED_DISTANCE: f32 = 1000.0;

/// Best attainable score for a single round
pub const MAX_ROUND_SCORE: u32 = 100;

/// A guessable location: a photo, its ground-truth position on the map
/// and the tolerance radius inside which a guess is considered perfect.
///
/// Pure data; everything that draws a place lives in the scene systems.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct Place {
	/// File name of the photo, doubles as the key into the place library
	pub id: String,
	/// Ground-truth position, in full-resolution map image space
	pub position: Vec2,
	/// Tolerance radius in image-space pixels, non-negative
	pub radius: f32,
	/// The committed guess for the current round, if any
	pub guess: Option<Vec2>,
}

impl Place {
	pub fn new(id: impl Into<String>, position: Vec2, radius: f32) -> Self {
		Self {
			id: id.into(),
			position,
			radius: radius.max(0.0),
			guess: None,
		}
	}

	/// Asset path of the photo this place was cropped from
	pub fn image_path(&self) -> String {
		format!("images/guessing/{}", self.id)
	}

	/// Distance from the true position, with anything inside the tolerance
	/// circle collapsed to zero
	pub fn adjusted_distance(&self, guess: Vec2) -> f32 {
		(self.position.distance(guess) - self.radius).max(0.0)
	}

	/// Scores a guess on the 0..=100 scale.
	///
	/// The adjusted distance maps linearly onto [`MAX_SCORED_DISTANCE`]:
	/// inside the tolerance circle scores exactly 100, at or beyond the
	/// maximum distance exactly 0. Pure and idempotent.
	pub fn score(&self, guess: Vec2) -> u32 {
		let adjusted = self.adjusted_distance(guess);
		let score = MAX_ROUND_SCORE as f32 * (1.0 - adjusted / MAX_SCORED_DISTANCE);
		score.round().clamp(0.0, MAX_ROUND_SCORE as f32) as u32
	}

	/// Commits a guess for this round and returns its score
	pub fn commit_guess(&mut self, guess: Vec2) -> u32 {
		self.guess = Some(guess);
		self.score(guess)
	}

	/// Forgets the committed guess; used when the round re-enters
	/// the positioning state
	pub fn clear_guess(&mut self) {
		self.guess = None;
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn place(radius: f32) -> Place {
		Place::new("photo.png", Vec2::new(500.0, 500.0), radius)
	}

	#[test]
	fn exact_guess_scores_full() {
		assert_eq!(place(0.0).score(Vec2::new(500.0, 500.0)), 100);
	}

	#[test]
	fn guess_at_max_distance_scores_zero() {
		assert_eq!(place(0.0).score(Vec2::new(1500.0, 500.0)), 0);
	}

	#[test]
	fn guess_halfway_scores_half() {
		assert_eq!(place(0.0).score(Vec2::new(1000.0, 500.0)), 50);
	}

	#[test]
	fn tolerance_circle_scores_full() {
		let place = place(120.0);
		assert_eq!(place.score(Vec2::new(560.0, 500.0)), 100);
		assert_eq!(place.score(Vec2::new(500.0, 620.0)), 100);
	}

	#[test]
	fn tolerance_shifts_the_zero_band() {
		let place = place(200.0);
		// 200 (radius) + 1000 (max distance) away: exactly zero
		assert_eq!(place.score(Vec2::new(1700.0, 500.0)), 0);
		assert_eq!(place.score(Vec2::new(3000.0, 500.0)), 0);
	}

	#[test]
	fn score_never_increases_with_distance() {
		let place = place(150.0);
		let mut previous = u32::MAX;
		for step in 0..200 {
			let guess = Vec2::new(500.0 + step as f32 * 10.0, 500.0);
			let score = place.score(guess);
			assert!(
				score <= previous,
				"score went up from {previous} to {score} at distance {}",
				step * 10
			);
			previous = score;
		}
	}

	#[test]
	fn scoring_is_idempotent() {
		let mut place = place(50.0);
		let guess = Vec2::new(800.0, 650.0);
		let committed = place.commit_guess(guess);
		for _ in 0..3 {
			assert_eq!(place.score(guess), committed);
		}
		assert_eq!(place.guess, Some(guess));
	}

	#[test]
	fn clearing_the_guess_resets_the_round() {
		let mut place = place(50.0);
		place.commit_guess(Vec2::new(800.0, 650.0));
		place.clear_guess();
		assert_eq!(place.guess, None);
	}

	#[test]
	fn negative_radius_is_floored() {
		let place = Place::new("p", Vec2::ZERO, -10.0);
		assert_eq!(place.radius, 0.0);
	}
}
