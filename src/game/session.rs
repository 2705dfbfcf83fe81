//! One play session: a fixed number of rounds, the running score
//! and the random, non-repeating choice of places to play.

use bevy::{platform::collections::HashSet, prelude::*};
use rand::{rngs::SmallRng, seq::SliceRandom as _, Rng, SeedableRng as _};

use super::place::Place;
use crate::persistent::{places::PlaceLibrary, scores::ScoreRecord};

/// How many places are played per session
pub const ROUNDS_PER_SESSION: u32 = 3;

/// Source of randomness for round selection.
/// Seeded from entropy in the app, explicitly in tests.
#[derive(Resource, Deref, DerefMut)]
pub struct GameRng(pub SmallRng);

impl Default for GameRng {
	fn default() -> Self {
		Self(SmallRng::from_entropy())
	}
}

/// State of the session currently being played
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct Session {
	/// Name the player typed on the title screen
	pub player: String,
	pub rounds_total: u32,
	/// Ids of the places already used; never repeats within a session
	played: HashSet<String>,
	pub accumulated_score: u32,
	/// App-relative timestamp at which the session started, in seconds
	pub started_at: f64,
}

impl Session {
	pub fn new(player: impl Into<String>, started_at: f64) -> Self {
		Self {
			player: player.into(),
			rounds_total: ROUNDS_PER_SESSION,
			played: HashSet::default(),
			accumulated_score: 0,
			started_at,
		}
	}

	pub fn rounds_played(&self) -> u32 {
		self.played.len() as u32
	}

	/// Whether the planned number of rounds has been played
	pub fn is_complete(&self) -> bool {
		self.rounds_played() >= self.rounds_total
	}

	/// Adds a finished round's score to the session total
	pub fn bank_round(&mut self, score: u32) {
		self.accumulated_score += score;
	}

	/// Draws the next place to play: a uniformly random choice among the
	/// photos that have a valid definition and have not been used yet.
	///
	/// Photos without a library entry are reported and never drawn.
	/// Returns [`None`] when no candidates remain, which ends the
	/// session early.
	pub fn draw_place(
		&mut self,
		photo_ids: &[String],
		library: &PlaceLibrary,
		rng: &mut impl Rng,
	) -> Option<Place> {
		let candidates: Vec<&String> = photo_ids
			.iter()
			.filter(|id| !self.played.contains(id.as_str()))
			.filter(|id| {
				let valid = library.contains(id);
				if !valid {
					log::warn!("No valid data for image {id}, skipping it");
				}
				valid
			})
			.collect();
		let id = candidates.choose(rng)?.as_str();
		self.played.insert(id.to_owned());
		library.place_for(id)
	}

	/// Seconds elapsed since the session started
	pub fn elapsed_seconds(&self, now: f64) -> f64 {
		(now - self.started_at).max(0.0)
	}

	/// The leaderboard record for this finished session
	pub fn to_record(&self, now: f64) -> ScoreRecord {
		ScoreRecord::stamped(
			self.player.clone(),
			self.accumulated_score,
			self.elapsed_seconds(now),
		)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::persistent::places::PlaceRecord;

	fn library(ids: &[&str]) -> PlaceLibrary {
		let mut library = PlaceLibrary::default();
		for (i, id) in ids.iter().enumerate() {
			library.insert(
				*id,
				PlaceRecord {
					x: i as f32 * 100.0,
					y: 0.0,
					radius: 10.0,
				},
			);
		}
		library
	}

	fn ids(ids: &[&str]) -> Vec<String> {
		ids.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn places_never_repeat_within_a_session() {
		let photo_ids = ids(&["a.png", "b.png", "c.png"]);
		let library = library(&["a.png", "b.png", "c.png"]);
		let mut rng = SmallRng::seed_from_u64(7);
		let mut session = Session::new("ana", 0.0);
		let mut drawn = Vec::new();
		while let Some(place) = session.draw_place(&photo_ids, &library, &mut rng) {
			drawn.push(place.id);
		}
		drawn.sort();
		assert_eq!(drawn, photo_ids);
	}

	#[test]
	fn unmarked_photos_are_never_drawn() {
		let photo_ids = ids(&["marked.png", "unmarked.png"]);
		let library = library(&["marked.png"]);
		let mut rng = SmallRng::seed_from_u64(7);
		let mut session = Session::new("ana", 0.0);
		let place = session.draw_place(&photo_ids, &library, &mut rng).unwrap();
		assert_eq!(place.id, "marked.png");
		assert!(session
			.draw_place(&photo_ids, &library, &mut rng)
			.is_none());
	}

	#[test]
	fn empty_library_ends_the_session_immediately() {
		let photo_ids = ids(&["a.png"]);
		let library = PlaceLibrary::default();
		let mut rng = SmallRng::seed_from_u64(7);
		let mut session = Session::new("ana", 0.0);
		assert!(session
			.draw_place(&photo_ids, &library, &mut rng)
			.is_none());
		assert_eq!(session.rounds_played(), 0);
	}

	#[test]
	fn three_rounds_accumulate_into_one_record() {
		let mut session = Session::new("ana", 10.0);
		for score in [80, 60, 100] {
			session.bank_round(score);
		}
		assert_eq!(session.accumulated_score, 240);
		let record = session.to_record(71.5);
		assert_eq!(record.name, "ana");
		assert_eq!(record.points, 240);
		assert_eq!(record.elapsed_seconds, 61.5);
	}

	#[test]
	fn session_completes_after_the_planned_rounds() {
		let photo_ids = ids(&["a.png", "b.png", "c.png", "d.png"]);
		let library = library(&["a.png", "b.png", "c.png", "d.png"]);
		let mut rng = SmallRng::seed_from_u64(7);
		let mut session = Session::new("ana", 0.0);
		for _ in 0..ROUNDS_PER_SESSION {
			assert!(!session.is_complete());
			session.draw_place(&photo_ids, &library, &mut rng).unwrap();
		}
		assert!(session.is_complete());
	}
}
