use crate::r#match::engine::config::MatchConfig;
use crate::r#match::engine::field::MatchField;
use crate::r#match::engine::pitch::GoalMouth;
use crate::r#match::engine::player::MatchPlayer;
use crate::r#match::engine::player::strategies::common::{
    BallOperationsImpl, PlayerOpponentsOperationsImpl, PlayerTeammatesOperationsImpl,
};
use nalgebra::Vector3;

/// Read-only view of the field from one player's point of view.
pub struct StrategyContext<'a> {
    pub field: &'a MatchField,
    pub config: &'a MatchConfig,
    pub player: &'a MatchPlayer,
}

impl<'a> StrategyContext<'a> {
    pub fn new(field: &'a MatchField, config: &'a MatchConfig, player: &'a MatchPlayer) -> Self {
        StrategyContext {
            field,
            config,
            player,
        }
    }

    pub fn ball(&self) -> BallOperationsImpl<'_> {
        BallOperationsImpl::new(self)
    }

    pub fn teammates(&self) -> PlayerTeammatesOperationsImpl<'_> {
        PlayerTeammatesOperationsImpl::new(self)
    }

    pub fn opponents(&self) -> PlayerOpponentsOperationsImpl<'_> {
        PlayerOpponentsOperationsImpl::new(self)
    }

    pub fn own_goal(&self) -> GoalMouth {
        self.field.pitch.own_goal(self.player.team)
    }

    pub fn opponent_goal(&self) -> GoalMouth {
        self.field.pitch.opponent_goal(self.player.team)
    }

    pub fn attacking_direction(&self) -> f32 {
        self.player.team.attacking_direction()
    }

    /// Signed distance travelled towards the opponent goal from the own goal line.
    pub fn progress(&self, position: &Vector3<f32>) -> f32 {
        (position.x - self.own_goal().line_x) * self.attacking_direction()
    }

    /// Clamps a target onto the pitch, keeping a player radius from the lines.
    pub fn on_pitch(&self, target: Vector3<f32>) -> Vector3<f32> {
        self.field
            .pitch
            .clamp_inside(&target, self.config.player.radius)
    }
}
