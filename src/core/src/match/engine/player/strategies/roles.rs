use crate::r#match::engine::player::PlayerRole;
use crate::r#match::engine::player::strategies::common::StrategyContext;
use crate::r#match::engine::player::strategies::{defenders, forwarders, goalkeepers, midfielders};
use nalgebra::Vector3;

/// Pure per-role behaviour, looked up by role.
pub struct RoleStrategy {
    pub role: PlayerRole,
    /// Slot to take while the own team has the ball or it is loose and out of reach.
    pub support_position: fn(&StrategyContext<'_>) -> Vector3<f32>,
    /// Slot to take while the opponents have the ball.
    pub defensive_position: fn(&StrategyContext<'_>) -> Vector3<f32>,
    pub should_chase: fn(&StrategyContext<'_>) -> bool,
    /// Point to cut a loose ball off at, taking priority over chasing it.
    pub intercept_point: fn(&StrategyContext<'_>) -> Option<Vector3<f32>>,
    /// Multiplier on the shooting distance; zero never shoots.
    pub shot_range_factor: f32,
    pub may_tackle: bool,
}

pub static ROLE_STRATEGIES: [RoleStrategy; 4] = [
    goalkeepers::STRATEGY,
    defenders::STRATEGY,
    midfielders::STRATEGY,
    forwarders::STRATEGY,
];

impl RoleStrategy {
    pub fn of(role: PlayerRole) -> &'static RoleStrategy {
        &ROLE_STRATEGIES[role.index()]
    }
}

pub fn no_intercept(_: &StrategyContext<'_>) -> Option<Vector3<f32>> {
    None
}

/// The role's kickoff slot shifted by the ball: `pull_x` of the ball's offset from
/// the centre spot along the pitch and `pull_y` of the way towards the ball across it.
pub fn formation_slot(ctx: &StrategyContext<'_>, pull_x: f32, pull_y: f32) -> Vector3<f32> {
    let base = ctx.player.start_position;
    let ball = ctx.ball().position();
    let center = ctx.field.pitch.center();

    ctx.on_pitch(Vector3::new(
        base.x + (ball.x - center.x) * pull_x,
        base.y + (ball.y - base.y) * pull_y,
        0.0,
    ))
}
