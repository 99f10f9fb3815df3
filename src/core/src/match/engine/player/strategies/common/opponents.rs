use crate::r#match::engine::player::strategies::common::StrategyContext;
use crate::r#match::engine::player::{MatchPlayer, PlayerRole};
use crate::r#match::engine::vector::VectorExtensions;
use nalgebra::Vector3;

pub struct PlayerOpponentsOperationsImpl<'b> {
    ctx: &'b StrategyContext<'b>,
}

impl<'b> PlayerOpponentsOperationsImpl<'b> {
    pub fn new(ctx: &'b StrategyContext<'b>) -> Self {
        PlayerOpponentsOperationsImpl { ctx }
    }
}

impl<'b> PlayerOpponentsOperationsImpl<'b> {
    pub fn all(&self) -> impl Iterator<Item = &'b MatchPlayer> + use<'b> {
        let team = self.ctx.player.team;
        self.ctx.field.players.iter().filter(move |p| p.team != team)
    }

    pub fn outfield(&self) -> impl Iterator<Item = &'b MatchPlayer> + use<'b> {
        self.all().filter(|p| p.role != PlayerRole::Goalkeeper)
    }

    pub fn goalkeeper(&self) -> Option<&'b MatchPlayer> {
        self.all().find(|p| p.role == PlayerRole::Goalkeeper)
    }

    pub fn nearest_to(&self, point: &Vector3<f32>) -> Option<&'b MatchPlayer> {
        let point = *point;
        self.all().min_by(|a, b| {
            a.position
                .horizontal_distance(&point)
                .total_cmp(&b.position.horizontal_distance(&point))
                .then(a.id.cmp(&b.id))
        })
    }

    pub fn distance_to_nearest(&self, point: &Vector3<f32>) -> f32 {
        self.nearest_to(point)
            .map(|p| p.position.horizontal_distance(point))
            .unwrap_or(f32::MAX)
    }

    pub fn exists(&self, distance: f32) -> bool {
        self.distance_to_nearest(&self.ctx.player.position) < distance
    }

    /// Nearest opponent attacker to the own goal, the one a defender should mark.
    pub fn most_dangerous(&self) -> Option<&'b MatchPlayer> {
        let goal = self.ctx.own_goal().center();
        self.outfield().min_by(|a, b| {
            a.position
                .horizontal_distance(&goal)
                .total_cmp(&b.position.horizontal_distance(&goal))
                .then(a.id.cmp(&b.id))
        })
    }
}
