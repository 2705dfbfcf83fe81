//! State machine for the authoring ("mark") mode.
//!
//! Mirrors the play-mode round but collects ground truth instead of
//! consuming it: the first click places the center of the tolerance circle,
//! the second fixes its radius, and a committed mark can be persisted.

use bevy::prelude::*;

/// Progress of marking a single photo
#[derive(Resource, Clone, Copy, PartialEq, Debug, Default)]
pub enum MarkPhase {
	/// Waiting for the first click
	#[default]
	AwaitingCenter,
	/// Center placed, waiting for the click that fixes the radius
	AwaitingRadius { center: Vec2 },
	/// Both points committed; immutable until persisted or redone
	Committed { center: Vec2, radius: f32 },
}

/// Input digested by [`MarkPhase::apply`].
/// Positions are in full-resolution map image space.
#[derive(Event, Clone, Copy, PartialEq, Debug)]
pub enum MarkEvent {
	/// The map was clicked outside the minimap and any button
	Click(Vec2),
	/// The "Redo" button was pressed
	Redo,
	/// The "Next" button was pressed
	Advance,
}

/// What the caller has to do about a transition
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum MarkEffect {
	None,
	CenterPlaced,
	RadiusFixed,
	/// Persist the mark and move on to the next unmarked photo
	Commit { center: Vec2, radius: f32 },
	Restarted,
}

impl MarkPhase {
	pub fn apply(&mut self, event: MarkEvent) -> MarkEffect {
		match (*self, event) {
			(Self::AwaitingCenter, MarkEvent::Click(pos)) => {
				*self = Self::AwaitingRadius { center: pos };
				MarkEffect::CenterPlaced
			}
			(Self::AwaitingRadius { center }, MarkEvent::Click(pos)) => {
				let radius = center.distance(pos);
				*self = Self::Committed { center, radius };
				MarkEffect::RadiusFixed
			}
			// A committed mark ignores further clicks
			(Self::Committed { .. }, MarkEvent::Click(_)) => MarkEffect::None,
			(Self::AwaitingCenter, MarkEvent::Redo) => MarkEffect::None,
			(_, MarkEvent::Redo) => {
				*self = Self::AwaitingCenter;
				MarkEffect::Restarted
			}
			(Self::Committed { center, radius }, MarkEvent::Advance) => {
				MarkEffect::Commit { center, radius }
			}
			(_, MarkEvent::Advance) => MarkEffect::None,
		}
	}

	/// Center of the circle being authored, if placed
	pub fn center(&self) -> Option<Vec2> {
		match self {
			Self::AwaitingCenter => None,
			Self::AwaitingRadius { center } => Some(*center),
			Self::Committed { center, .. } => Some(*center),
		}
	}

	/// Radius to preview: the committed value, or the live distance
	/// from the center to the cursor while the second click is pending
	pub fn preview_radius(&self, cursor: Vec2) -> Option<f32> {
		match self {
			Self::AwaitingCenter => None,
			Self::AwaitingRadius { center } => Some(center.distance(cursor)),
			Self::Committed { radius, .. } => Some(*radius),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn two_clicks_commit_a_mark() {
		let mut phase = MarkPhase::default();
		assert_eq!(
			phase.apply(MarkEvent::Click(Vec2::new(100.0, 100.0))),
			MarkEffect::CenterPlaced
		);
		assert_eq!(
			phase.apply(MarkEvent::Click(Vec2::new(140.0, 100.0))),
			MarkEffect::RadiusFixed
		);
		assert_eq!(
			phase,
			MarkPhase::Committed {
				center: Vec2::new(100.0, 100.0),
				radius: 40.0
			}
		);
	}

	#[test]
	fn committed_marks_ignore_clicks() {
		let mut phase = MarkPhase::Committed {
			center: Vec2::ZERO,
			radius: 10.0,
		};
		assert_eq!(phase.apply(MarkEvent::Click(Vec2::ONE)), MarkEffect::None);
		assert_eq!(
			phase,
			MarkPhase::Committed {
				center: Vec2::ZERO,
				radius: 10.0
			}
		);
	}

	#[test]
	fn redo_restarts_before_and_after_commit() {
		let mut phase = MarkPhase::AwaitingRadius { center: Vec2::ONE };
		assert_eq!(phase.apply(MarkEvent::Redo), MarkEffect::Restarted);
		assert_eq!(phase, MarkPhase::AwaitingCenter);

		let mut phase = MarkPhase::Committed {
			center: Vec2::ONE,
			radius: 5.0,
		};
		assert_eq!(phase.apply(MarkEvent::Redo), MarkEffect::Restarted);
		assert_eq!(phase, MarkPhase::AwaitingCenter);
	}

	#[test]
	fn advance_only_persists_committed_marks() {
		let mut phase = MarkPhase::default();
		assert_eq!(phase.apply(MarkEvent::Advance), MarkEffect::None);
		phase.apply(MarkEvent::Click(Vec2::new(0.0, 0.0)));
		assert_eq!(phase.apply(MarkEvent::Advance), MarkEffect::None);
		phase.apply(MarkEvent::Click(Vec2::new(3.0, 4.0)));
		assert_eq!(
			phase.apply(MarkEvent::Advance),
			MarkEffect::Commit {
				center: Vec2::ZERO,
				radius: 5.0
			}
		);
	}

	#[test]
	fn radius_previews_live_until_fixed() {
		let mut phase = MarkPhase::default();
		assert_eq!(phase.preview_radius(Vec2::ZERO), None);
		phase.apply(MarkEvent::Click(Vec2::ZERO));
		assert_eq!(phase.preview_radius(Vec2::new(0.0, 25.0)), Some(25.0));
		phase.apply(MarkEvent::Click(Vec2::new(0.0, 30.0)));
		// Fixed now; the cursor no longer matters
		assert_eq!(phase.preview_radius(Vec2::new(500.0, 0.0)), Some(30.0));
	}
}
