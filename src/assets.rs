//! Asset handles and the guessing-photo manifest.

use bevy::{asset::AsyncReadExt as _, platform::collections::HashMap, prelude::*};

pub(super) fn plugin(app: &mut App) {
	app.register_type::<HandleMap<ImageKey>>();
	app.init_resource::<HandleMap<ImageKey>>();

	app.init_asset::<PhotoManifest>();
	app.init_asset_loader::<PhotoManifestLoader>();
	app.init_resource::<LoadedPhotoManifest>();

	app.init_resource::<GlobalFont>();
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Reflect)]
pub enum ImageKey {
	/// The reference map all guesses are placed on
	Map,
	/// Marker for the candidate guess
	Pin,
	/// Title screen background
	Title,
}

impl AssetKey for ImageKey {
	type Asset = Image;
}

impl FromWorld for HandleMap<ImageKey> {
	fn from_world(world: &mut World) -> Self {
		let asset_server = world.resource::<AssetServer>();
		[
			(ImageKey::Map, asset_server.load("images/main/map.png")),
			(ImageKey::Pin, asset_server.load("images/main/pin.png")),
			(ImageKey::Title, asset_server.load("images/main/title.png")),
		]
		.into()
	}
}

/// The font to be used for rendering all text
#[derive(Resource, Debug)]
pub struct GlobalFont(pub Handle<Font>);

impl FromWorld for GlobalFont {
	fn from_world(world: &mut World) -> Self {
		let asset_server = world.resource::<AssetServer>();
		Self(asset_server.load("fonts/Comfortaa-SemiBold.ttf"))
	}
}

/// The list of guessable photo file names.
///
/// Replaces a runtime directory listing, which the asset layer cannot do
/// portably: the manifest is a plain text file next to the photos.
#[derive(Asset, Clone, Debug, Reflect)]
pub struct PhotoManifest {
	pub photos: Vec<String>,
}

/// Intermediate handle to the loading manifest asset
#[derive(Resource, Debug)]
pub struct LoadedPhotoManifest(pub Handle<PhotoManifest>);

impl FromWorld for LoadedPhotoManifest {
	fn from_world(world: &mut World) -> Self {
		let asset_server = world.resource::<AssetServer>();
		Self(asset_server.load("images/guessing/manifest.txt"))
	}
}

impl LoadedPhotoManifest {
	pub fn all_loaded(&self, asset_server: &AssetServer) -> bool {
		asset_server.is_loaded_with_dependencies(&self.0)
	}
}

/// Plain list of the manifest's photo ids, available once loading finishes
#[derive(Resource, Clone, Debug, Default, Deref)]
pub struct PhotoIds(pub Vec<String>);

#[derive(Default)]
struct PhotoManifestLoader;

#[derive(Debug)]
enum PhotoManifestLoadError {
	Io(std::io::Error),
}

impl std::error::Error for PhotoManifestLoadError {}

impl std::fmt::Display for PhotoManifestLoadError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Io(e) => e.fmt(f),
		}
	}
}

impl From<std::io::Error> for PhotoManifestLoadError {
	fn from(value: std::io::Error) -> Self {
		Self::Io(value)
	}
}

impl bevy::asset::AssetLoader for PhotoManifestLoader {
	type Asset = PhotoManifest;
	type Error = PhotoManifestLoadError;
	type Settings = ();

	fn load(
		&self,
		reader: &mut dyn bevy::asset::io::Reader,
		_settings: &Self::Settings,
		_load_context: &mut bevy::asset::LoadContext,
	) -> impl bevy::tasks::ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
		async {
			let mut contents = String::new();
			reader.read_to_string(&mut contents).await?;
			let photos = contents
				.lines()
				.map(str::trim)
				.filter(|line| !line.is_empty() && !line.starts_with('#'))
				.map(str::to_owned)
				.collect();
			Ok(PhotoManifest { photos })
		}
	}

	fn extensions(&self) -> &[&str] {
		&["txt"]
	}
}

pub trait AssetKey: Sized {
	type Asset: Asset;
}

#[derive(Resource, Reflect, Deref, DerefMut)]
#[reflect(Resource)]
pub struct HandleMap<K: AssetKey>(HashMap<K, Handle<K::Asset>>);

impl<K: AssetKey, T> From<T> for HandleMap<K>
where
	T: Into<HashMap<K, Handle<K::Asset>>>,
{
	fn from(value: T) -> Self {
		Self(value.into())
	}
}

impl<K: AssetKey> HandleMap<K> {
	pub fn all_loaded(&self, asset_server: &AssetServer) -> bool {
		self.values()
			.all(|x| asset_server.is_loaded_with_dependencies(x))
	}
}
