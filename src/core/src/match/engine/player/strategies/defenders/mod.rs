use crate::r#match::engine::player::PlayerRole;
use crate::r#match::engine::player::strategies::common::StrategyContext;
use crate::r#match::engine::player::strategies::roles::{RoleStrategy, formation_slot, no_intercept};
use crate::r#match::engine::vector::VectorExtensions;
use nalgebra::Vector3;

const MARKING_DISTANCE: f32 = 40.0;
/// Fraction of the ball-to-goal line a defender covers when nobody needs marking.
const COVER_FRACTION: f32 = 0.35;

pub const STRATEGY: RoleStrategy = RoleStrategy {
    role: PlayerRole::Defender,
    support_position,
    defensive_position,
    should_chase,
    intercept_point: no_intercept,
    shot_range_factor: 0.6,
    may_tackle: true,
};

pub fn support_position(ctx: &StrategyContext<'_>) -> Vector3<f32> {
    formation_slot(ctx, 0.3, 0.4)
}

/// Goal-side of the most dangerous attacker in the own half, otherwise on the ball-goal line.
pub fn defensive_position(ctx: &StrategyContext<'_>) -> Vector3<f32> {
    let goal = ctx.own_goal().center();
    let half = ctx.field.pitch.half_width();

    if let Some(attacker) = ctx.opponents().most_dangerous() {
        if ctx.progress(&attacker.position) < half {
            let mark = attacker.position + attacker.position.direction_to(&goal) * MARKING_DISTANCE;
            return ctx.on_pitch(mark);
        }
    }

    let ball = ctx.ball().position();
    ctx.on_pitch(goal + (ball - goal).horizontal() * (1.0 - COVER_FRACTION))
}

pub fn should_chase(ctx: &StrategyContext<'_>) -> bool {
    ctx.ball().on_own_side()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::engine::config::MatchConfig;
    use crate::r#match::engine::field::MatchField;

    #[test]
    fn test_marks_goal_side_of_attacker() {
        let config = MatchConfig::default();
        let mut field = MatchField::new(&config);
        field.player_mut(8).unwrap().position = Vector3::new(250.0, 325.0, 0.0);
        let defender = field.player(2).unwrap().clone();
        let ctx = StrategyContext::new(&field, &config, &defender);

        let target = defensive_position(&ctx);

        assert!((target.x - (250.0 - MARKING_DISTANCE)).abs() < 1e-3);
        assert!((target.y - 325.0).abs() < 1e-3);
    }

    #[test]
    fn test_chases_only_on_own_side() {
        let config = MatchConfig::default();
        let mut field = MatchField::new(&config);
        let defender = field.player(2).unwrap().clone();

        field.ball.position = Vector3::new(300.0, 300.0, 0.0);
        assert!(should_chase(&StrategyContext::new(&field, &config, &defender)));

        field.ball.position = Vector3::new(900.0, 300.0, 0.0);
        assert!(!should_chase(&StrategyContext::new(&field, &config, &defender)));
    }
}
