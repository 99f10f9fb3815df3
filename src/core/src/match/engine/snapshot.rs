use crate::r#match::engine::ball::{Ball, FlightMode};
use crate::r#match::engine::context::{GoalRecord, MatchContext, Score};
use crate::r#match::engine::field::MatchField;
use crate::r#match::engine::player::{MatchPlayer, PlayerRole, PlayerState, TeamSide};
use crate::r#match::engine::state::MatchPhase;
use nalgebra::Vector3;
use serde::Serialize;

/// Everything a renderer needs to draw one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub tick: u64,
    pub phase: MatchPhase,
    pub score: Score,
    pub remaining_time: f32,
    pub selected_player_id: Option<u32>,
    /// Power of the running charge for the power bar, zero when idle.
    pub charge_power: f32,
    pub players: Vec<PlayerSnapshot>,
    pub ball: BallSnapshot,
    pub goals: Vec<GoalRecord>,
    pub quit_requested: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub id: u32,
    pub team: TeamSide,
    pub role: PlayerRole,
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub facing: Vector3<f32>,
    pub state: PlayerState,
    pub is_human_controlled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallSnapshot {
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub flight_mode: FlightMode,
    pub owner: Option<u32>,
}

impl MatchSnapshot {
    pub fn capture(field: &MatchField, context: &MatchContext) -> Self {
        MatchSnapshot {
            tick: context.tick,
            phase: context.state.phase,
            score: context.score,
            remaining_time: context.clock.remaining,
            selected_player_id: field.selected_player_id(),
            charge_power: context.charge.power(&context.config.passing),
            players: field.players.iter().map(PlayerSnapshot::from).collect(),
            ball: BallSnapshot::from(&field.ball),
            goals: context.goals.clone(),
            quit_requested: context.quit_requested,
        }
    }

    pub fn player(&self, player_id: u32) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn selected_player(&self) -> Option<&PlayerSnapshot> {
        self.selected_player_id.and_then(|id| self.player(id))
    }
}

impl From<&MatchPlayer> for PlayerSnapshot {
    fn from(player: &MatchPlayer) -> Self {
        PlayerSnapshot {
            id: player.id,
            team: player.team,
            role: player.role,
            position: player.position,
            velocity: player.velocity,
            facing: player.facing,
            state: player.state,
            is_human_controlled: player.is_human_controlled,
        }
    }
}

impl From<&Ball> for BallSnapshot {
    fn from(ball: &Ball) -> Self {
        BallSnapshot {
            position: ball.position,
            velocity: ball.velocity,
            flight_mode: ball.flight_mode,
            owner: ball.current_owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::engine::config::MatchConfig;

    #[test]
    fn test_capture_reflects_field() {
        let config = MatchConfig::default();
        let field = MatchField::new(&config);
        let context = MatchContext::new(config);

        let snapshot = MatchSnapshot::capture(&field, &context);

        assert_eq!(snapshot.players.len(), 8);
        assert_eq!(snapshot.phase, MatchPhase::Kickoff);
        assert_eq!(snapshot.charge_power, 0.0);
        assert_eq!(snapshot.ball.owner, None);
        assert!(snapshot.selected_player().is_some_and(|p| p.is_human_controlled));
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let config = MatchConfig::default();
        let field = MatchField::new(&config);
        let context = MatchContext::new(config);

        let json = serde_json::to_value(MatchSnapshot::capture(&field, &context)).unwrap();

        assert_eq!(json["phase"], "Kickoff");
        assert_eq!(json["score"]["red"], 0);
        assert_eq!(json["players"].as_array().map(|p| p.len()), Some(8));
    }
}
