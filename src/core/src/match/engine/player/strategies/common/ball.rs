use crate::r#match::engine::player::MatchPlayer;
use crate::r#match::engine::player::strategies::common::StrategyContext;
use crate::r#match::engine::vector::VectorExtensions;
use nalgebra::Vector3;

pub struct BallOperationsImpl<'b> {
    ctx: &'b StrategyContext<'b>,
}

impl<'b> BallOperationsImpl<'b> {
    pub fn new(ctx: &'b StrategyContext<'b>) -> Self {
        BallOperationsImpl { ctx }
    }
}

impl<'b> BallOperationsImpl<'b> {
    #[inline]
    pub fn position(&self) -> Vector3<f32> {
        self.ctx.field.ball.position
    }

    pub fn distance(&self) -> f32 {
        self.ctx.player.distance_to(&self.position())
    }

    #[inline]
    pub fn owner_id(&self) -> Option<u32> {
        self.ctx.field.ball.current_owner
    }

    #[inline]
    pub fn is_owned(&self) -> bool {
        self.ctx.field.ball.is_owned()
    }

    #[inline]
    pub fn is_aerial(&self) -> bool {
        self.ctx.field.ball.is_aerial()
    }

    pub fn carrier(&self) -> Option<&'b MatchPlayer> {
        self.owner_id().and_then(|id| self.ctx.field.player(id))
    }

    pub fn owned_by_self(&self) -> bool {
        self.owner_id() == Some(self.ctx.player.id)
    }

    pub fn team_has_ball(&self) -> bool {
        self.carrier()
            .is_some_and(|carrier| carrier.team == self.ctx.player.team)
    }

    pub fn opponents_have_ball(&self) -> bool {
        self.carrier()
            .is_some_and(|carrier| carrier.team != self.ctx.player.team)
    }

    pub fn on_own_side(&self) -> bool {
        self.ctx.progress(&self.position()) < self.ctx.field.pitch.half_width()
    }

    /// Where to run for a loose ball: a short look-ahead on the ground, the landing point in the air.
    pub fn predicted_position(&self) -> Vector3<f32> {
        let config = self.ctx.config;
        let predicted = self
            .ctx
            .field
            .ball
            .predict_position(config.ai.chase_prediction, &config.ball);

        self.ctx.on_pitch(predicted)
    }

    /// Loose ball travelling towards the own goal line.
    pub fn is_heading_to_own_goal(&self) -> bool {
        let ball = &self.ctx.field.ball;
        !ball.is_owned()
            && ball.speed() > self.ctx.config.possession.pickup_speed
            && ball.velocity.x * self.ctx.attacking_direction() < 0.0
    }

    /// The y coordinate the ball will have when it reaches `line_x`, if it is heading there.
    pub fn crossing_y(&self, line_x: f32) -> Option<f32> {
        let ball = &self.ctx.field.ball;
        let vx = ball.velocity.x;
        if vx.abs() < f32::EPSILON {
            return None;
        }

        let time = (line_x - ball.position.x) / vx;
        if time < 0.0 {
            return None;
        }

        let y = ball.position.y + ball.velocity.y * time;
        y.is_finite().then_some(y)
    }

    pub fn distance_from(&self, point: &Vector3<f32>) -> f32 {
        self.position().horizontal_distance(point)
    }
}
