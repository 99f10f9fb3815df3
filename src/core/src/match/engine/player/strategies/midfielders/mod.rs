use crate::r#match::engine::player::PlayerRole;
use crate::r#match::engine::player::strategies::common::StrategyContext;
use crate::r#match::engine::player::strategies::roles::{RoleStrategy, formation_slot, no_intercept};
use crate::r#match::engine::vector::VectorExtensions;
use nalgebra::Vector3;

pub const STRATEGY: RoleStrategy = RoleStrategy {
    role: PlayerRole::Midfielder,
    support_position,
    defensive_position,
    should_chase,
    intercept_point: no_intercept,
    shot_range_factor: 0.85,
    may_tackle: true,
};

/// Offers an option level with or just ahead of the ball, on the far side from it.
pub fn support_position(ctx: &StrategyContext<'_>) -> Vector3<f32> {
    let ball = ctx.ball().position();
    let center_y = ctx.field.pitch.height / 2.0;
    let support = ctx.config.ai.midfielder_support;

    if !ctx.ball().team_has_ball() {
        return formation_slot(ctx, 0.5, 0.5);
    }

    let side = if ball.y > center_y { -1.0 } else { 1.0 };
    ctx.on_pitch(Vector3::new(
        ball.x + ctx.attacking_direction() * support * 0.5,
        ball.y + side * support,
        0.0,
    ))
}

/// Presses a nearby carrier, otherwise screens between ball and own goal.
pub fn defensive_position(ctx: &StrategyContext<'_>) -> Vector3<f32> {
    let ai = &ctx.config.ai;
    let ball = ctx.ball().position();

    if let Some(carrier) = ctx.ball().carrier() {
        if ctx.player.distance_to(&carrier.position) < ai.pressure_distance * 2.0 {
            return carrier.position;
        }
    }

    let goal = ctx.own_goal().center();
    ctx.on_pitch(ball + ball.direction_to(&goal) * ai.midfielder_support)
}

pub fn should_chase(_: &StrategyContext<'_>) -> bool {
    true
}
