use crate::r#match::engine::context::MatchContext;
use crate::r#match::engine::field::MatchField;
use crate::r#match::engine::passing::ChargeState;
use crate::r#match::engine::state::MatchPhase;
use log::{info, warn};

/// What the rest of the tick may do after the phase has been advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStep {
    Play,
    Frozen,
}

pub struct StateManager;

impl StateManager {
    /// Moves to `next` if the phase graph allows it. Returns whether the phase changed.
    pub fn transition(context: &mut MatchContext, next: MatchPhase) -> bool {
        let current = context.state.phase;

        if !current.can_transition_to(next) {
            warn!("ignored match phase change {} -> {}", current, next);
            return false;
        }

        info!(
            "match phase {} -> {} at tick {} (score {}, {:.1}s left)",
            current, next, context.tick, context.score, context.clock.remaining
        );

        context.state.phase = next;
        context.state.phase_time = 0.0;
        if next != MatchPhase::Celebrating {
            context.state.celebrating_team = None;
        }

        true
    }

    /// Runs the timed phases. Only `Live` lets physics, AI and input run.
    pub fn advance(field: &mut MatchField, context: &mut MatchContext) -> PhaseStep {
        let dt = context.dt();

        match context.state.phase {
            MatchPhase::Live => PhaseStep::Play,
            MatchPhase::Kickoff => {
                context.state.phase_time += dt;
                if context.state.phase_time >= context.config.timing.kickoff_delay {
                    Self::transition(context, MatchPhase::Live);
                }
                PhaseStep::Frozen
            }
            MatchPhase::GoalScored => {
                Self::start_celebration(field, context);
                PhaseStep::Frozen
            }
            MatchPhase::Celebrating => {
                context.state.phase_time += dt;
                field.players.iter_mut().for_each(|p| {
                    p.tick_timers(dt);
                    p.refresh_state(false);
                });

                if context.state.phase_time >= context.config.timing.celebration_time {
                    Self::reset_kickoff(field, context);
                }
                PhaseStep::Frozen
            }
            MatchPhase::FullTime => PhaseStep::Frozen,
        }
    }

    fn start_celebration(field: &mut MatchField, context: &mut MatchContext) {
        let team = context.goals.last().map(|goal| goal.team);
        let duration = context.config.timing.celebration_time;

        if Self::transition(context, MatchPhase::Celebrating) {
            context.state.celebrating_team = team;

            field
                .players
                .iter_mut()
                .filter(|p| Some(p.team) == team)
                .for_each(|p| p.celebrate(duration));
        }
    }

    /// Clock runs only while live. Returns true when it expires on this tick.
    pub fn advance_clock(context: &mut MatchContext) -> bool {
        if context.state.phase != MatchPhase::Live {
            return false;
        }

        let dt = context.dt();
        if context.clock.advance(dt) {
            Self::transition(context, MatchPhase::FullTime);
            return true;
        }

        false
    }

    /// Back to the kickoff formation keeping score and clock. At full time this restarts the match.
    pub fn reset_kickoff(field: &mut MatchField, context: &mut MatchContext) {
        if context.state.phase == MatchPhase::FullTime {
            Self::reset_match(field, context);
            return;
        }

        field.reset_players_positions();
        context.charge = ChargeState::Idle;
        context.ai_memory.clear();
        Self::transition(context, MatchPhase::Kickoff);
    }

    pub fn reset_match(field: &mut MatchField, context: &mut MatchContext) {
        context.reset_for_new_match();
        field.reset_players_positions();
        Self::transition(context, MatchPhase::Kickoff);
        info!("match restarted");
    }
}
