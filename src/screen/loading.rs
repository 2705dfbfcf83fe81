//! A loading screen during which game assets are loaded.

use bevy::prelude::*;

use super::Screen;
use crate::{
	assets::{GlobalFont, HandleMap, ImageKey, LoadedPhotoManifest, PhotoIds, PhotoManifest},
	ui::prelude::*,
	AppMode,
};

pub(super) fn plugin(app: &mut App) {
	app.add_systems(OnEnter(Screen::Loading), enter_loading);
	app.add_systems(
		Update,
		continue_out_of_loading.run_if(in_state(Screen::Loading).and(all_assets_loaded)),
	);
}

fn enter_loading(mut commands: Commands, font: Res<GlobalFont>) {
	commands
		.spawn((widgets::ui_root(), StateScoped(Screen::Loading)))
		.with_children(|children| {
			children.spawn(widgets::label("Loading...", font.0.clone_weak()));
		});
}

fn all_assets_loaded(
	asset_server: Res<AssetServer>,
	image_handles: Res<HandleMap<ImageKey>>,
	font: Res<GlobalFont>,
	manifest: Res<LoadedPhotoManifest>,
) -> bool {
	image_handles.all_loaded(&asset_server)
		&& asset_server.is_loaded_with_dependencies(font.0.id())
		&& manifest.all_loaded(&asset_server)
}

fn continue_out_of_loading(
	mut commands: Commands,
	mode: Res<AppMode>,
	manifest: Res<LoadedPhotoManifest>,
	manifests: Res<Assets<PhotoManifest>>,
	mut next_screen: ResMut<NextState<Screen>>,
) {
	let photos = manifests
		.get(&manifest.0)
		.map(|manifest| manifest.photos.clone())
		.unwrap_or_default();
	if photos.is_empty() {
		log::warn!("The photo manifest is empty, there is nothing to guess or mark");
	}
	commands.insert_resource(PhotoIds(photos));
	next_screen.set(match *mode {
		AppMode::Play => Screen::Title,
		AppMode::Mark => Screen::Marking,
	});
}
