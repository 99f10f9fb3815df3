use crate::r#match::engine::context::{GoalRecord, MatchContext};
use crate::r#match::engine::events::Event;
use crate::r#match::engine::field::MatchField;
use crate::r#match::engine::pitch::GoalSide;
use crate::r#match::engine::player::events::PlayerEvent;
use crate::r#match::engine::player::TeamSide;
use crate::r#match::engine::state::{MatchPhase, StateManager};
use log::{debug, info};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BallEvent {
    Goal(BallGoalEventMetadata),
    Claimed(u32),
    Released(u32),
    Landed,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BallGoalEventMetadata {
    pub side: GoalSide,
    pub goalscorer_player_id: Option<u32>,
    pub own_goal: bool,
}

pub struct BallEventDispatcher;

impl BallEventDispatcher {
    pub fn dispatch(
        event: BallEvent,
        field: &mut MatchField,
        context: &mut MatchContext,
    ) -> Vec<Event> {
        let mut remaining_events = Vec::new();

        debug!("Ball event: {:?}", event);

        match event {
            BallEvent::Goal(metadata) => {
                let team = metadata.side.scoring_team();
                context.score.increment(team);

                let record = GoalRecord {
                    tick: context.tick,
                    team,
                    scorer: metadata.goalscorer_player_id,
                    own_goal: metadata.own_goal,
                    remaining_time: context.clock.remaining,
                };

                info!(
                    "goal for {} (scorer {:?}, own goal: {}), score {}",
                    team, record.scorer, record.own_goal, context.score
                );

                context.goals.push(record);
                StateManager::transition(context, MatchPhase::GoalScored);
            }
            BallEvent::Claimed(player_id) => {
                let is_red = field
                    .player(player_id)
                    .is_some_and(|player| player.team == TeamSide::Red);

                if is_red
                    && context.config.control.auto_switch_on_possession
                    && field.selected_player_id() != Some(player_id)
                {
                    remaining_events.push(Event::PlayerEvent(PlayerEvent::Selected(player_id)));
                }
            }
            BallEvent::Released(_) | BallEvent::Landed => {}
        }

        remaining_events
    }
}
