use crate::r#match::engine::player::PlayerRole;
use crate::r#match::engine::player::strategies::common::StrategyContext;
use crate::r#match::engine::player::strategies::roles::{RoleStrategy, formation_slot, no_intercept};
use nalgebra::Vector3;

/// Distance kept from the opponent goal line on forward runs.
const LINE_CLEARANCE: f32 = 60.0;

pub const STRATEGY: RoleStrategy = RoleStrategy {
    role: PlayerRole::Striker,
    support_position,
    defensive_position,
    should_chase,
    intercept_point: no_intercept,
    shot_range_factor: 1.0,
    may_tackle: true,
};

/// Forward run ahead of the ball, drifting away from its side of the pitch.
pub fn support_position(ctx: &StrategyContext<'_>) -> Vector3<f32> {
    if !ctx.ball().team_has_ball() {
        return formation_slot(ctx, 0.5, 0.4);
    }

    let ball = ctx.ball().position();
    let goal_line = ctx.opponent_goal().line_x;
    let direction = ctx.attacking_direction();
    let center_y = ctx.field.pitch.height / 2.0;

    let run_x = ball.x + direction * ctx.config.ai.striker_push;
    let limit = goal_line - direction * LINE_CLEARANCE;
    let x = if direction > 0.0 { run_x.min(limit) } else { run_x.max(limit) };
    let y = center_y + (center_y - ball.y) * 0.3;

    ctx.on_pitch(Vector3::new(x, y, 0.0))
}

/// Stays high to be ready for the counter.
pub fn defensive_position(ctx: &StrategyContext<'_>) -> Vector3<f32> {
    formation_slot(ctx, 0.3, 0.5)
}

pub fn should_chase(ctx: &StrategyContext<'_>) -> bool {
    !ctx.ball().on_own_side()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::engine::config::MatchConfig;
    use crate::r#match::engine::field::MatchField;

    #[test]
    fn test_run_stops_short_of_goal_line() {
        let config = MatchConfig::default();
        let mut field = MatchField::new(&config);
        field.player_mut(3).unwrap().position = Vector3::new(1100.0, 325.0, 0.0);
        field.ball.set_owner(3);
        field.ball.position = Vector3::new(1120.0, 325.0, 0.0);
        let striker = field.player(4).unwrap().clone();
        let ctx = StrategyContext::new(&field, &config, &striker);

        let target = support_position(&ctx);
        assert!((target.x - (1200.0 - LINE_CLEARANCE)).abs() < 1e-3);
    }

    #[test]
    fn test_blue_striker_runs_left() {
        let config = MatchConfig::default();
        let mut field = MatchField::new(&config);
        field.ball.set_owner(7);
        field.ball.position = Vector3::new(700.0, 325.0, 0.0);
        let striker = field.player(8).unwrap().clone();
        let ctx = StrategyContext::new(&field, &config, &striker);

        assert!(support_position(&ctx).x < 700.0);
    }
}
