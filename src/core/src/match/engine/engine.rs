use crate::r#match::engine::ball::{BallEvent, BallGoalEventMetadata};
use crate::r#match::engine::config::MatchConfig;
use crate::r#match::engine::context::MatchContext;
use crate::r#match::engine::error::ConfigError;
use crate::r#match::engine::events::{EventCollection, EventDispatcher};
use crate::r#match::engine::field::MatchField;
use crate::r#match::engine::input::{HumanInputProcessor, TickInput};
use crate::r#match::engine::passing::{KickAction, PassActionBuilder, PassingProtocol, ShotAction};
use crate::r#match::engine::physics::PhysicsEngine;
use crate::r#match::engine::player::events::PlayerEvent;
use crate::r#match::engine::player::strategies::AiDecisionEngine;
use crate::r#match::engine::player::{ActionIntent, PlayerIntent};
use crate::r#match::engine::possession::{PossessionResolver, TackleAttempt};
use crate::r#match::engine::snapshot::MatchSnapshot;
use crate::r#match::engine::state::{PhaseStep, StateManager};
use log::{debug, info, warn};

pub struct FootballEngine {
    pub field: MatchField,
    pub context: MatchContext,
}

impl FootballEngine {
    pub fn new_match(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let field = MatchField::new(&config);
        let context = MatchContext::new(config);

        info!(
            "new match: seed {}, {} ticks/s, {:.0}s on the clock",
            context.config.seed, context.config.tick_rate, context.clock.duration
        );

        Ok(FootballEngine { field, context })
    }

    /// Advances the match by one fixed step and returns what to draw.
    pub fn tick(&mut self, input: &TickInput) -> MatchSnapshot {
        let field = &mut self.field;
        let context = &mut self.context;

        context.tick += 1;

        if input.quit {
            context.quit_requested = true;
        }

        if input.reset_match {
            StateManager::reset_match(field, context);
        } else if input.reset_kickoff {
            StateManager::reset_kickoff(field, context);
        }

        let mut events = EventCollection::new();

        if StateManager::advance(field, context) == PhaseStep::Play
            && !StateManager::advance_clock(context)
        {
            Self::play(field, context, input, &mut events);
        }

        EventDispatcher::dispatch(events.to_vec(), field, context);

        self.snapshot()
    }

    pub fn reset_kickoff(&mut self) {
        StateManager::reset_kickoff(&mut self.field, &mut self.context);
    }

    pub fn reset_match(&mut self) {
        StateManager::reset_match(&mut self.field, &mut self.context);
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(&self.field, &self.context)
    }

    fn play(
        field: &mut MatchField,
        context: &mut MatchContext,
        input: &TickInput,
        events: &mut EventCollection,
    ) {
        let dt = context.dt();
        let mut kicks = Vec::new();

        let human = HumanInputProcessor::process(input, field, context, &mut kicks, events);
        let mut intents = AiDecisionEngine::evaluate(field, &context.config, &mut context.ai_memory, dt);
        intents.extend(human);
        intents.sort_by_key(|intent| intent.player_id);

        let tackles = Self::collect_actions(&intents, context.tick, &mut kicks);

        for error in PhysicsEngine::step(field, &context.config, &intents, dt, events) {
            warn!("{}", error);
        }

        PossessionResolver::resolve(field, context, &tackles, events);

        Self::play_passing(field, context, kicks, events);
        Self::check_goal(field, events);

        let charging = context.charge.player_id();
        field.players.iter_mut().for_each(|player| {
            player.tick_timers(dt);
            player.refresh_state(charging == Some(player.id));
        });
    }

    /// Splits action intents into tackle attempts and pending kicks.
    fn collect_actions(intents: &[PlayerIntent], tick: u64, kicks: &mut Vec<KickAction>) -> Vec<TackleAttempt> {
        let mut tackles = Vec::new();

        for intent in intents {
            let Some(action) = intent.action else {
                continue;
            };

            match action {
                ActionIntent::Tackle { carrier_id } => tackles.push(TackleAttempt {
                    tackler_id: intent.player_id,
                    carrier_id,
                }),
                ActionIntent::Shoot { target, power } => kicks.push(KickAction::Shot(ShotAction {
                    shooter: intent.player_id,
                    target,
                    power,
                    issued_at_tick: tick,
                })),
                ActionIntent::Pass {
                    mode,
                    receiver,
                    power,
                } => {
                    if let Some(pass) = PassActionBuilder::new(mode)
                        .with_initiator(intent.player_id)
                        .with_receiver(receiver)
                        .with_power(power)
                        .at_tick(tick)
                        .build()
                    {
                        kicks.push(KickAction::Pass(pass));
                    }
                }
            }
        }

        tackles
    }

    /// Charges grow or die with possession; pending kicks become trajectories.
    fn play_passing(
        field: &mut MatchField,
        context: &mut MatchContext,
        kicks: Vec<KickAction>,
        events: &mut EventCollection,
    ) {
        context.charge.advance(context.dt());

        if let Some(player_id) = context.charge.player_id() {
            if field.ball.current_owner != Some(player_id) {
                debug!("charge of player {} cancelled, ball lost", player_id);
                context.charge.cancel();
            }
        }

        for kick in kicks {
            if let Err(error) = PassingProtocol::execute(kick, field, context, events) {
                events.add_player_event(PlayerEvent::InvalidAction(error));
            }
        }
    }

    fn check_goal(field: &MatchField, events: &mut EventCollection) {
        let ball = &field.ball;
        let Some(side) = field.pitch.goal_crossed(&ball.position, ball.radius) else {
            return;
        };

        let scorer = ball.current_owner.or(ball.previous_owner);
        let own_goal = scorer
            .and_then(|id| field.player(id))
            .is_some_and(|player| player.team != side.scoring_team());

        events.add_ball_event(BallEvent::Goal(BallGoalEventMetadata {
            side,
            goalscorer_player_id: scorer,
            own_goal,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::engine::state::MatchPhase;
    use nalgebra::Vector3;

    fn live_engine() -> FootballEngine {
        let mut engine = FootballEngine::new_match(MatchConfig::default()).unwrap();
        while engine.context.state.phase != MatchPhase::Live {
            engine.tick(&TickInput::default());
        }
        engine
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = MatchConfig::default();
        config.tick_rate = 0;

        assert!(FootballEngine::new_match(config).is_err());
    }

    #[test]
    fn test_kickoff_freezes_then_goes_live() {
        let mut engine = FootballEngine::new_match(MatchConfig::default()).unwrap();
        let positions: Vec<_> = engine.field.players.iter().map(|p| p.position).collect();

        let snapshot = engine.tick(&TickInput::moving(Vector3::new(1.0, 0.0, 0.0)));

        assert_eq!(snapshot.phase, MatchPhase::Kickoff);
        assert_eq!(snapshot.players.iter().map(|p| p.position).collect::<Vec<_>>(), positions);

        let engine = live_engine();
        assert_eq!(engine.context.clock.remaining, engine.context.clock.duration);
    }

    #[test]
    fn test_clock_runs_while_live() {
        let mut engine = live_engine();

        for _ in 0..30 {
            engine.tick(&TickInput::default());
        }

        let elapsed = engine.context.clock.elapsed();
        assert!((elapsed - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_goal_attributes_scorer() {
        let mut engine = live_engine();
        let ball = &mut engine.field.ball;
        ball.current_owner = None;
        ball.previous_owner = Some(4);
        ball.position = Vector3::new(1195.0, 325.0, 0.0);
        ball.velocity = Vector3::new(600.0, 0.0, 0.0);

        let mut snapshot = engine.tick(&TickInput::default());
        for _ in 0..5 {
            if snapshot.score.red > 0 {
                break;
            }
            snapshot = engine.tick(&TickInput::default());
        }

        assert_eq!(snapshot.score.red, 1);
        assert_eq!(snapshot.phase, MatchPhase::GoalScored);
        let goal = snapshot.goals[0];
        assert_eq!(goal.scorer, Some(4));
        assert!(!goal.own_goal);
    }

    #[test]
    fn test_quit_is_reported() {
        let mut engine = FootballEngine::new_match(MatchConfig::default()).unwrap();
        let snapshot = engine.tick(&TickInput {
            quit: true,
            ..TickInput::default()
        });

        assert!(snapshot.quit_requested);
    }
}
