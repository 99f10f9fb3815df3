use crate::r#match::engine::player::strategies::common::StrategyContext;
use crate::r#match::engine::player::{MatchPlayer, PlayerRole};
use crate::r#match::engine::vector::VectorExtensions;
use nalgebra::Vector3;

pub struct PlayerTeammatesOperationsImpl<'b> {
    ctx: &'b StrategyContext<'b>,
}

impl<'b> PlayerTeammatesOperationsImpl<'b> {
    pub fn new(ctx: &'b StrategyContext<'b>) -> Self {
        PlayerTeammatesOperationsImpl { ctx }
    }
}

impl<'b> PlayerTeammatesOperationsImpl<'b> {
    pub fn all(&self) -> impl Iterator<Item = &'b MatchPlayer> + use<'b> {
        let player = self.ctx.player;
        self.ctx
            .field
            .players
            .iter()
            .filter(move |p| p.team == player.team && p.id != player.id)
    }

    /// Teammates who can receive a pass; goalkeepers are left out.
    pub fn outfield(&self) -> impl Iterator<Item = &'b MatchPlayer> + use<'b> {
        self.all().filter(|p| p.role != PlayerRole::Goalkeeper)
    }

    /// How many teammates are nearer to `point` than this player. Ties go to the lower id.
    pub fn closer_to(&self, point: &Vector3<f32>) -> usize {
        let own = (self.ctx.player.distance_to(point), self.ctx.player.id);

        self.all()
            .filter(|p| {
                let distance = p.position.horizontal_distance(point);
                distance < own.0 || (distance == own.0 && p.id < own.1)
            })
            .count()
    }

    pub fn is_among_closest_to(&self, point: &Vector3<f32>, count: usize) -> bool {
        self.closer_to(point) < count
    }
}
