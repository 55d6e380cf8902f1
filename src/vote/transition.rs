//! Pure vote transition function.
//!
//! The transition function is the core of the machine. It takes the current
//! state and an event, and returns the new state and the effects to execute.
//! This function has NO side effects - it is pure and deterministic.
//!
//! The transition table over (toggle, event):
//!
//! | current \ event | Upvote | Downvote |
//! |-----------------|--------|----------|
//! | None            | Up     | Down     |
//! | Up              | None   | Down     |
//! | Down            | Up     | None     |
//!
//! Repeating an action cancels it and restores every counter to its value
//! before the first press. A direct flip moves the viewer's one unit of
//! support across the differential (score moves by two) without changing
//! participation.

use super::effect::Effect;
use super::event::VoteEvent;
use super::state::{VoteState, VoteToggle};

/// Result of a vote transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub state: VoteState,
    /// Effects to execute.
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: VoteState, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }
}

/// Pure vote transition function.
///
/// Every (state, event) pair is valid; there are no inputs to reject. The
/// returned state always has `sync` set, and the effects always contain
/// exactly one `SyncVote` carrying the settled toggle.
pub fn transition(state: VoteState, event: VoteEvent) -> TransitionResult {
    let VoteState {
        last_action,
        votes,
        total,
        user_upvotes,
        user_downvotes,
        ..
    } = state;

    let next = match (last_action, event) {
        // Fresh upvote: one new unit of support, one new participant.
        (VoteToggle::None, VoteEvent::Upvote) => VoteState {
            last_action: VoteToggle::Up,
            votes: votes + 1,
            total: total + 1,
            user_upvotes: user_upvotes + 1,
            user_downvotes,
            sync: true,
        },

        // Cancelled upvote: back to exactly the pre-upvote counters.
        (VoteToggle::Up, VoteEvent::Upvote) => VoteState {
            last_action: VoteToggle::None,
            votes: votes - 1,
            total: total - 1,
            user_upvotes: user_upvotes - 1,
            user_downvotes,
            sync: true,
        },

        // Flip down -> up: the unit moves from -1 to +1 on the differential,
        // participation already counted.
        (VoteToggle::Down, VoteEvent::Upvote) => VoteState {
            last_action: VoteToggle::Up,
            votes: votes + 2,
            total,
            user_upvotes: user_upvotes + 1,
            user_downvotes: user_downvotes - 1,
            sync: true,
        },

        // Fresh downvote.
        (VoteToggle::None, VoteEvent::Downvote) => VoteState {
            last_action: VoteToggle::Down,
            votes: votes - 1,
            total: total + 1,
            user_upvotes,
            user_downvotes: user_downvotes + 1,
            sync: true,
        },

        // Cancelled downvote.
        (VoteToggle::Down, VoteEvent::Downvote) => VoteState {
            last_action: VoteToggle::None,
            votes: votes + 1,
            total: total - 1,
            user_upvotes,
            user_downvotes: user_downvotes - 1,
            sync: true,
        },

        // Flip up -> down.
        (VoteToggle::Up, VoteEvent::Downvote) => VoteState {
            last_action: VoteToggle::Down,
            votes: votes - 2,
            total,
            user_upvotes: user_upvotes - 1,
            user_downvotes: user_downvotes + 1,
            sync: true,
        },
    };

    TransitionResult::new(
        next,
        vec![Effect::SyncVote {
            state: next.last_action,
        }],
    )
}
