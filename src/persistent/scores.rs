//! The score log and the merged leaderboard standings.
//!
//! The log is flat and append-only in spirit: every finished session adds
//! one record and the whole array is rewritten. Ranking happens on read.

use std::cmp::Ordering;

use bevy::prelude::*;
use itertools::Itertools as _;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::Saveable;

/// How many rows the leaderboard shows
pub const LEADERBOARD_SIZE: usize = 10;

/// One finished session: who played, what they scored and how long it took
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
	pub name: String,
	pub points: u32,
	/// Wall-clock duration of the session, in seconds
	#[serde(rename = "time")]
	pub elapsed_seconds: f64,
	pub date: String,
}

impl ScoreRecord {
	/// Builds a record stamped with the current local date
	pub fn stamped(name: impl Into<String>, points: u32, elapsed_seconds: f64) -> Self {
		Self {
			name: name.into(),
			points,
			elapsed_seconds,
			date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
		}
	}

	/// Leaderboard ordering: points descending, ties by session time ascending
	fn ranking(&self, other: &Self) -> Ordering {
		other.points.cmp(&self.points).then(
			self.elapsed_seconds
				.partial_cmp(&other.elapsed_seconds)
				.unwrap_or(Ordering::Equal),
		)
	}
}

/// Every recorded session, in append order
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct ScoreLog {
	records: Vec<ScoreRecord>,
}

impl ScoreLog {
	pub fn append(&mut self, record: ScoreRecord) {
		self.records.push(record);
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Merged standings: best-ranked row per distinct player name,
	/// sorted by rank, truncated to `top_n`
	pub fn standings(&self, top_n: usize) -> Vec<ScoreRecord> {
		self.records
			.iter()
			.sorted_by(|a, b| a.ranking(b))
			.unique_by(|record| record.name.clone())
			.take(top_n)
			.cloned()
			.collect()
	}
}

impl Saveable for ScoreLog {
	const FILENAME: &'static str = "scores";

	fn write_json(&self, store: &mut JsonValue) {
		match serde_json::to_value(&self.records) {
			Ok(value) => *store = value,
			Err(error) => log::error!("Could not serialize the score log: {error}"),
		}
	}

	fn read_json(&mut self, store: &JsonValue) {
		let Some(rows) = store.as_array() else {
			log::warn!("Score log is not a json array, treating it as empty");
			return;
		};
		// Corrupt rows are excluded, not fatal
		self.records = rows
			.iter()
			.filter_map(|row| match serde_json::from_value(row.clone()) {
				Ok(record) => Some(record),
				Err(error) => {
					log::warn!("Dropping corrupt score log row: {error}");
					None
				}
			})
			.collect();
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use serde_json::json;

	fn record(name: &str, points: u32, elapsed_seconds: f64) -> ScoreRecord {
		ScoreRecord {
			name: name.to_owned(),
			points,
			elapsed_seconds,
			date: "2025-01-01 12:00:00".to_owned(),
		}
	}

	#[test]
	fn standings_rank_by_points_then_time() {
		let mut log = ScoreLog::default();
		log.append(record("ana", 180, 99.0));
		log.append(record("bea", 240, 80.0));
		log.append(record("carla", 240, 60.0));
		let standings = log.standings(LEADERBOARD_SIZE);
		let names: Vec<_> = standings.iter().map(|r| r.name.as_str()).collect();
		assert_eq!(names, ["carla", "bea", "ana"]);
	}

	#[test]
	fn standings_keep_one_row_per_name() {
		let mut log = ScoreLog::default();
		log.append(record("ana", 100, 120.0));
		log.append(record("ana", 250, 90.0));
		log.append(record("ana", 250, 95.0));
		log.append(record("bea", 240, 80.0));
		let standings = log.standings(LEADERBOARD_SIZE);
		assert_eq!(standings.len(), 2);
		// Ana keeps her best attempt: the 250-pointer with the faster time
		assert_eq!(standings[0], record("ana", 250, 90.0));
	}

	#[test]
	fn standings_truncate_to_top_n() {
		let mut log = ScoreLog::default();
		for i in 0..25 {
			log.append(record(&format!("player{i}"), i, 100.0));
		}
		assert_eq!(log.standings(LEADERBOARD_SIZE).len(), LEADERBOARD_SIZE);
	}

	#[test]
	fn empty_log_reads_as_empty_table() {
		let mut log = ScoreLog::default();
		log.read_json(&JsonValue::Null);
		assert!(log.is_empty());
		assert!(log.standings(LEADERBOARD_SIZE).is_empty());
	}

	#[test]
	fn corrupt_rows_are_excluded() {
		let mut log = ScoreLog::default();
		log.read_json(&json!([
			{ "name": "ana", "points": 200, "time": 75.5, "date": "2025-01-01" },
			{ "name": "bea", "points": "lots", "time": 75.5, "date": "2025-01-01" },
			{ "name": "carla", "points": 100, "time": "fast", "date": "2025-01-01" },
			"not even a row",
		]));
		assert_eq!(log.len(), 1);
		assert_eq!(log.standings(LEADERBOARD_SIZE)[0].name, "ana");
	}

	#[test]
	fn write_read_round_trip() {
		let mut log = ScoreLog::default();
		log.append(record("ana", 240, 61.5));
		let mut store = JsonValue::Null;
		log.write_json(&mut store);
		let mut reread = ScoreLog::default();
		reread.read_json(&store);
		assert_eq!(log, reread);
	}
}
