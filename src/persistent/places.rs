//! The place library: ground-truth definitions for every marked photo.
//!
//! Persisted as a JSON object keyed by photo file name. The play mode only
//! reads it; the authoring mode inserts marks, which triggers the wholesale
//! rewrite through the [`Saveable`] machinery.

use bevy::{platform::collections::HashMap, prelude::*};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use super::{map_ext::MapExt as _, Saveable};
use crate::game::place::Place;

/// Ground truth for one photo: position on the map and tolerance radius,
/// both in full-resolution map image space
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlaceRecord {
	pub x: f32,
	pub y: f32,
	pub radius: f32,
}

impl PlaceRecord {
	/// Parses a library entry.
	///
	/// Accepts the current `{x, y, radius}` schema as well as the legacy
	/// `{pos_x, pos_y, radius}` one. Returns [`None`] for anything else.
	fn from_json(value: &JsonValue) -> Option<Self> {
		let entry = value.as_object()?;
		let x = entry.get_float("x").or_else(|| entry.get_float("pos_x"))?;
		let y = entry.get_float("y").or_else(|| entry.get_float("pos_y"))?;
		let radius = entry.get_float("radius")?;
		Some(Self {
			x: x as f32,
			y: y as f32,
			radius: radius.max(0.0) as f32,
		})
	}
}

/// Mapping from photo id to its ground-truth definition
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct PlaceLibrary {
	places: HashMap<String, PlaceRecord>,
}

impl PlaceLibrary {
	pub fn contains(&self, id: &str) -> bool {
		self.places.contains_key(id)
	}

	pub fn get(&self, id: &str) -> Option<&PlaceRecord> {
		self.places.get(id)
	}

	pub fn insert(&mut self, id: impl Into<String>, record: PlaceRecord) {
		self.places.insert(id.into(), record);
	}

	/// Builds the playable entity for a photo, if it has a valid definition
	pub fn place_for(&self, id: &str) -> Option<Place> {
		self.get(id)
			.map(|record| Place::new(id, Vec2::new(record.x, record.y), record.radius))
	}
}

impl Saveable for PlaceLibrary {
	const FILENAME: &'static str = "places";

	fn write_json(&self, store: &mut JsonValue) {
		let mut map = Map::new();
		for (id, record) in &self.places {
			match serde_json::to_value(record) {
				Ok(value) => {
					map.insert(id.clone(), value);
				}
				Err(error) => log::error!("Could not serialize place {id}: {error}"),
			}
		}
		*store = JsonValue::Object(map);
	}

	fn read_json(&mut self, store: &JsonValue) {
		let Some(entries) = store.as_object() else {
			log::warn!("Place library is not a json object, ignoring it");
			return;
		};
		self.places.clear();
		for (id, entry) in entries {
			match PlaceRecord::from_json(entry) {
				Some(record) => {
					self.places.insert(id.clone(), record);
				}
				None => log::warn!("No valid data for image {id}, skipping it"),
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use serde_json::json;

	#[test]
	fn reads_current_schema() {
		let mut library = PlaceLibrary::default();
		library.read_json(&json!({
			"tower.png": { "x": 512.0, "y": 1024.0, "radius": 40.0 },
		}));
		assert_eq!(
			library.get("tower.png"),
			Some(&PlaceRecord {
				x: 512.0,
				y: 1024.0,
				radius: 40.0
			})
		);
	}

	#[test]
	fn reads_legacy_schema() {
		let mut library = PlaceLibrary::default();
		library.read_json(&json!({
			"lake.png": { "pos_x": 100, "pos_y": 200, "radius": 15 },
		}));
		assert_eq!(
			library.get("lake.png"),
			Some(&PlaceRecord {
				x: 100.0,
				y: 200.0,
				radius: 15.0
			})
		);
	}

	#[test]
	fn malformed_entries_are_skipped() {
		let mut library = PlaceLibrary::default();
		library.read_json(&json!({
			"good.png": { "x": 1, "y": 2, "radius": 3 },
			"no-radius.png": { "x": 1, "y": 2 },
			"text.png": "not an object",
			"nan.png": { "x": "a", "y": "b", "radius": "c" },
		}));
		assert!(library.contains("good.png"));
		assert!(!library.contains("no-radius.png"));
		assert!(!library.contains("text.png"));
		assert!(!library.contains("nan.png"));
	}

	#[test]
	fn negative_radius_is_floored() {
		let mut library = PlaceLibrary::default();
		library.read_json(&json!({
			"p.png": { "x": 0, "y": 0, "radius": -5.0 },
		}));
		assert_eq!(library.get("p.png").unwrap().radius, 0.0);
	}

	#[test]
	fn wholesale_write_read_round_trip() {
		let mut library = PlaceLibrary::default();
		library.insert(
			"a.png",
			PlaceRecord {
				x: 1.0,
				y: 2.0,
				radius: 3.0,
			},
		);
		library.insert(
			"b.png",
			PlaceRecord {
				x: 4.0,
				y: 5.0,
				radius: 6.0,
			},
		);
		let mut store = JsonValue::Null;
		library.write_json(&mut store);
		let mut reread = PlaceLibrary::default();
		reread.read_json(&store);
		assert_eq!(library, reread);
	}

	#[test]
	fn place_for_builds_the_entity() {
		let mut library = PlaceLibrary::default();
		library.insert(
			"tower.png",
			PlaceRecord {
				x: 512.0,
				y: 1024.0,
				radius: 40.0,
			},
		);
		let place = library.place_for("tower.png").unwrap();
		assert_eq!(place.position, Vec2::new(512.0, 1024.0));
		assert_eq!(place.radius, 40.0);
		assert_eq!(library.place_for("unknown.png"), None);
	}
}
