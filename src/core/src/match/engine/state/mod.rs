pub mod manager;

pub use manager::*;

use crate::r#match::engine::player::TeamSide;
use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchPhase {
    Kickoff,
    Live,
    GoalScored,
    Celebrating,
    FullTime,
}

impl MatchPhase {
    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: MatchPhase) -> bool {
        matches!(
            (self, next),
            (_, MatchPhase::Kickoff)
                | (MatchPhase::Kickoff, MatchPhase::Live)
                | (MatchPhase::Live, MatchPhase::GoalScored)
                | (MatchPhase::Live, MatchPhase::FullTime)
                | (MatchPhase::GoalScored, MatchPhase::Celebrating)
        )
    }
}

impl Display for MatchPhase {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            MatchPhase::Kickoff => write!(f, "Kickoff"),
            MatchPhase::Live => write!(f, "Live"),
            MatchPhase::GoalScored => write!(f, "Goal scored"),
            MatchPhase::Celebrating => write!(f, "Celebrating"),
            MatchPhase::FullTime => write!(f, "Full time"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchState {
    pub phase: MatchPhase,
    /// Seconds spent in the current phase.
    pub phase_time: f32,
    pub celebrating_team: Option<TeamSide>,
}

impl MatchState {
    pub fn new() -> Self {
        MatchState {
            phase: MatchPhase::Kickoff,
            phase_time: 0.0,
            celebrating_team: None,
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}
