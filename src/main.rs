// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

use bevy::prelude::*;
use campus_guessr::{AppMode, AppPlugin};

fn start(mode: AppMode) -> AppExit {
	App::new().add_plugins(AppPlugin { mode }).run()
}

fn main() -> AppExit {
	let mut argv = std::env::args();
	match argv.nth(1).as_deref() {
		None => start(AppMode::Play),
		Some("mark") => start(AppMode::Mark),
		Some(other) => {
			eprintln!(
				"Unknown argument `{other}`. Run without arguments to play, \
				or with `mark` to author place definitions."
			);
			AppExit::error()
		}
	}
}
