use crate::r#match::engine::player::PlayerRole;
use crate::r#match::engine::player::strategies::common::StrategyContext;
use crate::r#match::engine::player::strategies::roles::RoleStrategy;
use crate::r#match::engine::vector::VectorExtensions;
use nalgebra::Vector3;

pub const STRATEGY: RoleStrategy = RoleStrategy {
    role: PlayerRole::Goalkeeper,
    support_position: guard_position,
    defensive_position: guard_position,
    should_chase,
    intercept_point: shot_intercept_point,
    shot_range_factor: 0.0,
    may_tackle: false,
};

/// Keeper box: `range_x` out from the line, `range_y` either side of the goal centre.
fn clamp_to_box(ctx: &StrategyContext<'_>, point: Vector3<f32>) -> Vector3<f32> {
    let goal = ctx.own_goal();
    let center = goal.center();
    let ai = &ctx.config.ai;
    let radius = ctx.config.player.radius;

    let depth = ((point.x - goal.line_x) * ctx.attacking_direction()).clamp(radius, ai.goalkeeper_range_x);

    Vector3::new(
        goal.line_x + depth * ctx.attacking_direction(),
        point.y.clamp(center.y - ai.goalkeeper_range_y, center.y + ai.goalkeeper_range_y),
        0.0,
    )
}

/// On the line from goal centre to ball, stepping out further the closer the ball gets.
pub fn guard_position(ctx: &StrategyContext<'_>) -> Vector3<f32> {
    let center = ctx.own_goal().center();
    let ball = ctx.ball().position();
    let ai = &ctx.config.ai;

    let distance = center.horizontal_distance(&ball);
    let half = ctx.field.pitch.half_width();
    let step_out = ai.goalkeeper_range_x * (1.0 - (distance / half).min(1.0)).max(0.35);

    clamp_to_box(ctx, center + center.direction_to(&ball) * step_out)
}

pub fn should_chase(ctx: &StrategyContext<'_>) -> bool {
    let ai = &ctx.config.ai;
    let ball = ctx.ball().position();

    ctx.progress(&ball) < ai.goalkeeper_range_x * 2.0
        && ctx.ball().distance() < ai.pressure_distance
}

/// Where a shot will cross the keeper's line, when it is heading for the goal.
pub fn shot_intercept_point(ctx: &StrategyContext<'_>) -> Option<Vector3<f32>> {
    let ball = ctx.ball();
    if !ball.is_heading_to_own_goal() {
        return None;
    }

    let goal = ctx.own_goal();
    let crossing = ball.crossing_y(goal.line_x)?;
    let margin = ctx.config.ball.radius * 2.0;
    if crossing < goal.top_post.y - margin || crossing > goal.bottom_post.y + margin {
        return None;
    }

    let line_x = ctx.player.position.x;
    let y = ball.crossing_y(line_x).unwrap_or(crossing);

    Some(clamp_to_box(ctx, Vector3::new(line_x, y, 0.0)))
}
