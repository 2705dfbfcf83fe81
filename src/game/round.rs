//! State machine for a single play-mode round.
//!
//! Transitions are pure functions from (state, event) to effects; the scene
//! systems translate pointer and button input into [`RoundEvent`]s and act
//! on the returned [`RoundEffect`]s.

use bevy::prelude::*;

use super::place::Place;

/// Which image currently fills the viewport
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ActiveView {
	/// The guessing photo is the primary view, the map sits in the minimap
	#[default]
	Photo,
	/// The map is the primary view; guesses are placed here
	Map,
}

impl ActiveView {
	pub fn swapped(self) -> Self {
		match self {
			Self::Photo => Self::Map,
			Self::Map => Self::Photo,
		}
	}
}

/// Progression of the guess within one round
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum GuessPhase {
	/// No candidate position yet
	#[default]
	Awaiting,
	/// A tentative guess awaiting confirmation; re-clicking moves it
	Candidate(Vec2),
	/// The guess has been confirmed and scored; positions are frozen
	Locked { guess: Vec2, score: u32 },
	/// The round has been dismissed and its score banked
	Complete { score: u32 },
}

/// One play-mode round: the view toggle plus the guess progression
#[derive(Resource, Clone, Copy, PartialEq, Debug, Default)]
pub struct RoundState {
	pub view: ActiveView,
	pub phase: GuessPhase,
}

/// Input digested by [`RoundState::apply`].
/// Positions are in full-resolution image space.
#[derive(Event, Clone, Copy, PartialEq, Debug)]
pub enum RoundEvent {
	/// The minimap was clicked
	SwapViews,
	/// The primary view was clicked outside the minimap and any button
	ClickField(Vec2),
	/// The "Guess" button was pressed
	ConfirmGuess,
	/// The "Next" button was pressed
	Advance,
}

/// What the caller has to do about a transition
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum RoundEffect {
	/// Nothing; the event did not apply in the current state
	None,
	/// The primary view changed; reset the scroll offset
	ViewSwapped,
	/// The candidate guess moved
	CandidatePlaced,
	/// The guess was confirmed; reveal the true-location markers
	GuessScored(u32),
	/// The round is over; bank the score and draw the next place
	Finished(u32),
}

impl RoundState {
	/// Advances the state machine by one event.
	///
	/// The place records the committed guess so that scoring stays
	/// idempotent once the round is locked.
	pub fn apply(&mut self, event: RoundEvent, place: &mut Place) -> RoundEffect {
		match (self.phase, event) {
			// The view toggle is free until the guess locks.
			// Swapping drops any unconfirmed candidate.
			(GuessPhase::Awaiting | GuessPhase::Candidate(_), RoundEvent::SwapViews) => {
				self.view = self.view.swapped();
				self.phase = GuessPhase::Awaiting;
				place.clear_guess();
				RoundEffect::ViewSwapped
			}
			// Candidates can only be placed on the map
			(GuessPhase::Awaiting | GuessPhase::Candidate(_), RoundEvent::ClickField(pos)) => {
				if self.view == ActiveView::Map {
					self.phase = GuessPhase::Candidate(pos);
					RoundEffect::CandidatePlaced
				} else {
					RoundEffect::None
				}
			}
			(GuessPhase::Candidate(pos), RoundEvent::ConfirmGuess) => {
				let score = place.commit_guess(pos);
				self.phase = GuessPhase::Locked { guess: pos, score };
				RoundEffect::GuessScored(score)
			}
			(GuessPhase::Locked { score, .. }, RoundEvent::Advance) => {
				self.phase = GuessPhase::Complete { score };
				RoundEffect::Finished(score)
			}
			_ => RoundEffect::None,
		}
	}

	/// Position of the pin to draw, candidate or committed
	pub fn pin_position(&self) -> Option<Vec2> {
		match self.phase {
			GuessPhase::Candidate(pos) => Some(pos),
			GuessPhase::Locked { guess, .. } => Some(guess),
			_ => None,
		}
	}

	/// Score of the locked guess, if the round has been scored
	pub fn locked_score(&self) -> Option<u32> {
		match self.phase {
			GuessPhase::Locked { score, .. } => Some(score),
			GuessPhase::Complete { score } => Some(score),
			_ => None,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn place() -> Place {
		Place::new("photo.png", Vec2::new(500.0, 500.0), 0.0)
	}

	#[test]
	fn photo_clicks_do_not_place_candidates() {
		let mut state = RoundState::default();
		let mut place = place();
		assert_eq!(state.view, ActiveView::Photo);
		let effect = state.apply(RoundEvent::ClickField(Vec2::new(10.0, 10.0)), &mut place);
		assert_eq!(effect, RoundEffect::None);
		assert_eq!(state.phase, GuessPhase::Awaiting);
	}

	#[test]
	fn swap_is_reversible_until_locked() {
		let mut state = RoundState::default();
		let mut place = place();
		assert_eq!(
			state.apply(RoundEvent::SwapViews, &mut place),
			RoundEffect::ViewSwapped
		);
		assert_eq!(state.view, ActiveView::Map);
		assert_eq!(
			state.apply(RoundEvent::SwapViews, &mut place),
			RoundEffect::ViewSwapped
		);
		assert_eq!(state.view, ActiveView::Photo);
	}

	#[test]
	fn swapping_discards_the_candidate() {
		let mut state = RoundState::default();
		let mut place = place();
		state.apply(RoundEvent::SwapViews, &mut place);
		state.apply(RoundEvent::ClickField(Vec2::new(100.0, 100.0)), &mut place);
		assert!(matches!(state.phase, GuessPhase::Candidate(_)));
		state.apply(RoundEvent::SwapViews, &mut place);
		assert_eq!(state.phase, GuessPhase::Awaiting);
		assert_eq!(place.guess, None);
	}

	#[test]
	fn candidate_moves_on_reclick() {
		let mut state = RoundState::default();
		let mut place = place();
		state.apply(RoundEvent::SwapViews, &mut place);
		state.apply(RoundEvent::ClickField(Vec2::new(100.0, 100.0)), &mut place);
		state.apply(RoundEvent::ClickField(Vec2::new(200.0, 300.0)), &mut place);
		assert_eq!(state.phase, GuessPhase::Candidate(Vec2::new(200.0, 300.0)));
	}

	#[test]
	fn confirm_scores_and_freezes_the_guess() {
		let mut state = RoundState::default();
		let mut place = place();
		state.apply(RoundEvent::SwapViews, &mut place);
		state.apply(RoundEvent::ClickField(Vec2::new(1000.0, 500.0)), &mut place);
		let effect = state.apply(RoundEvent::ConfirmGuess, &mut place);
		assert_eq!(effect, RoundEffect::GuessScored(50));
		assert_eq!(place.guess, Some(Vec2::new(1000.0, 500.0)));

		// No repositioning or re-swapping once locked
		assert_eq!(
			state.apply(RoundEvent::ClickField(Vec2::ZERO), &mut place),
			RoundEffect::None
		);
		assert_eq!(
			state.apply(RoundEvent::SwapViews, &mut place),
			RoundEffect::None
		);
	}

	#[test]
	fn confirm_without_candidate_is_ignored() {
		let mut state = RoundState::default();
		let mut place = place();
		assert_eq!(
			state.apply(RoundEvent::ConfirmGuess, &mut place),
			RoundEffect::None
		);
	}

	#[test]
	fn advance_finishes_a_locked_round_only() {
		let mut state = RoundState::default();
		let mut place = place();
		assert_eq!(
			state.apply(RoundEvent::Advance, &mut place),
			RoundEffect::None
		);
		state.apply(RoundEvent::SwapViews, &mut place);
		state.apply(RoundEvent::ClickField(Vec2::new(500.0, 500.0)), &mut place);
		state.apply(RoundEvent::ConfirmGuess, &mut place);
		assert_eq!(
			state.apply(RoundEvent::Advance, &mut place),
			RoundEffect::Finished(100)
		);
		assert_eq!(state.locked_score(), Some(100));
	}
}
