//! Whole-resource JSON persistence: resources that implement [`Saveable`]
//! are loaded once at startup and rewritten wholesale whenever they change.

use std::{
	marker::PhantomData,
	path::{Path, PathBuf},
};

use bevy::prelude::*;
use serde_json::Value as JsonValue;

mod io;
pub mod map_ext;
pub mod places;
pub mod scores;

pub(super) fn plugin(app: &mut App) {
	app.insert_resource(StoragePath::new());
	app.register_saveable_resource::<places::PlaceLibrary>();
	app.register_saveable_resource::<scores::ScoreLog>();
}

pub trait RegisterSaveableResource {
	fn register_saveable_resource<T: Saveable + Resource>(&mut self) -> &mut Self;
}

impl RegisterSaveableResource for App {
	fn register_saveable_resource<T: Saveable + Resource>(&mut self) -> &mut Self {
		self.init_resource::<T>()
			.init_resource::<JsonStore<T>>()
			.add_systems(Startup, load_system::<T>)
			.add_systems(Update, save_system::<T>.run_if(resource_changed::<T>))
	}
}

fn load_system<T: Saveable + Resource>(
	mut store: ResMut<JsonStore<T>>,
	mut resource: ResMut<T>,
	storage_path: Res<StoragePath>,
) {
	let path = T::file_path(&storage_path.0);
	match io::read(&path) {
		// No file yet; keep the defaults
		Ok(JsonValue::Null) => {}
		Ok(value) => {
			store.value = value;
			resource.read_json(&store.value);
		}
		Err(error) => {
			log::error!("Failed to load {} with error {}", path.display(), error);
		}
	}
}

fn save_system<T: Saveable + Resource>(
	mut store: ResMut<JsonStore<T>>,
	resource: Res<T>,
	storage_path: Res<StoragePath>,
) {
	resource.write_json(&mut store.value);
	match serde_json::to_string_pretty(&store.value) {
		Ok(serialized) => io::write(&serialized, &storage_path.0, T::FILENAME),
		Err(error) => log::error!("Failed to serialize {}: {}", T::FILENAME, error),
	}
}

#[derive(Resource, Default)]
struct JsonStore<T> {
	value: JsonValue,
	_phantom: PhantomData<T>,
}

pub trait Saveable: Default {
	/// Name of the savefile for this object (without the .json extension)
	const FILENAME: &'static str;
	/// Write overrides this object needs to store to a Json representation
	/// Writes should ideally only be additive or replacement operations.
	fn write_json(&self, store: &mut JsonValue);
	/// Reads overrides from a Json representation and uses them to update itself
	fn read_json(&mut self, store: &JsonValue);
	/// Gets the save file path from a base path
	fn file_path(base: &Path) -> PathBuf {
		base.join(format!("{}.json", Self::FILENAME))
	}
}

/// Directory that holds all save files
#[derive(Resource)]
struct StoragePath(pub PathBuf);

impl StoragePath {
	pub fn new() -> Self {
		StoragePath(
			directories::ProjectDirs::from("", "", "CampusGuessr")
				.map(|project_dir| project_dir.data_dir().to_path_buf())
				.unwrap_or_else(|| {
					log::error!("COULD NOT RESOLVE DATA DIRECTORY, DEFAULTING TO LOCAL FOLDER");
					Path::new("./").to_path_buf()
				}),
		)
	}
}
