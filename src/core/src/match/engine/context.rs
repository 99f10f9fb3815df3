use crate::r#match::engine::config::MatchConfig;
use crate::r#match::engine::passing::ChargeState;
use crate::r#match::engine::player::TeamSide;
use crate::r#match::engine::player::memory::AiMemory;
use crate::r#match::engine::state::{MatchPhase, MatchState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub struct MatchContext {
    pub config: MatchConfig,
    pub state: MatchState,
    pub clock: MatchClock,
    pub score: Score,
    pub goals: Vec<GoalRecord>,
    pub tick: u64,
    pub rng: ChaCha8Rng,
    pub charge: ChargeState,
    pub ai_memory: AiMemory,
    pub quit_requested: bool,
}

impl MatchContext {
    pub fn new(config: MatchConfig) -> Self {
        MatchContext {
            state: MatchState::new(),
            clock: MatchClock::new(config.timing.match_duration),
            score: Score::new(),
            goals: Vec::new(),
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            charge: ChargeState::Idle,
            ai_memory: AiMemory::new(),
            quit_requested: false,
            config,
        }
    }

    pub fn dt(&self) -> f32 {
        self.config.dt()
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    /// Clears everything a new match starts without, keeping the RNG stream.
    pub fn reset_for_new_match(&mut self) {
        self.clock.reset();
        self.score = Score::new();
        self.goals.clear();
        self.charge = ChargeState::Idle;
        self.ai_memory.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchClock {
    pub duration: f32,
    pub remaining: f32,
}

impl MatchClock {
    pub fn new(duration: f32) -> Self {
        MatchClock {
            duration,
            remaining: duration,
        }
    }

    /// Counts down. Returns true once time has run out.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.remaining = (self.remaining - dt).max(0.0);
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn elapsed(&self) -> f32 {
        self.duration - self.remaining
    }

    pub fn reset(&mut self) {
        self.remaining = self.duration;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub red: u32,
    pub blue: u32,
}

impl Score {
    pub fn new() -> Self {
        Score::default()
    }

    pub fn increment(&mut self, team: TeamSide) {
        match team {
            TeamSide::Red => self.red += 1,
            TeamSide::Blue => self.blue += 1,
        }
    }

    pub fn get(&self, team: TeamSide) -> u32 {
        match team {
            TeamSide::Red => self.red,
            TeamSide::Blue => self.blue,
        }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.red, self.blue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalRecord {
    pub tick: u64,
    pub team: TeamSide,
    pub scorer: Option<u32>,
    pub own_goal: bool,
    pub remaining_time: f32,
}
