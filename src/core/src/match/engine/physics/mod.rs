pub mod collisions;

pub use collisions::*;

use crate::r#match::engine::config::MatchConfig;
use crate::r#match::engine::error::SimulationError;
use crate::r#match::engine::events::EventCollection;
use crate::r#match::engine::field::MatchField;
use crate::r#match::engine::player::PlayerIntent;
use crate::r#match::engine::vector::VectorExtensions;
use nalgebra::Vector3;

pub struct PhysicsEngine;

impl PhysicsEngine {
    /// Advances players and ball by one step. Non-finite state is recovered and reported.
    pub fn step(
        field: &mut MatchField,
        config: &MatchConfig,
        intents: &[PlayerIntent],
        dt: f32,
        events: &mut EventCollection,
    ) -> Vec<SimulationError> {
        for player in field.players.iter_mut() {
            let movement = intents
                .iter()
                .find(|intent| intent.player_id == player.id)
                .and_then(|intent| intent.movement);

            player.apply_movement(movement, &config.player, dt);
        }

        resolve_player_collisions(&mut field.players, &config.player);
        clamp_players(field, config.player.radius);

        field
            .ball
            .update(config, &field.pitch, &field.players, dt, events);

        Self::recover_non_finite(field, config)
    }

    pub fn recover_non_finite(field: &mut MatchField, config: &MatchConfig) -> Vec<SimulationError> {
        let mut errors = Vec::new();

        for player in field.players.iter_mut() {
            if player.position.is_finite_vector() && player.velocity.is_finite_vector() {
                continue;
            }

            player.position = field.pitch.clamp_inside(&player.position, config.player.radius);
            player.velocity = Vector3::zeros();
            if !player.facing.is_finite_vector() {
                player.facing = Vector3::new(player.team.attacking_direction(), 0.0, 0.0);
            }

            errors.push(SimulationError::OutOfBoundsState {
                entity: format!("player {}", player.id),
                x: player.position.x,
                y: player.position.y,
            });
        }

        let ball = &mut field.ball;
        if !ball.position.is_finite_vector() || !ball.velocity.is_finite_vector() {
            ball.position = field.pitch.clamp_inside(&ball.position, ball.radius);
            ball.velocity = Vector3::zeros();
            ball.flight_mode = crate::r#match::engine::ball::FlightMode::Grounded;

            errors.push(SimulationError::OutOfBoundsState {
                entity: String::from("ball"),
                x: ball.position.x,
                y: ball.position.y,
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> (MatchField, MatchConfig) {
        let config = MatchConfig::default();
        (MatchField::new(&config), config)
    }

    #[test]
    fn test_step_moves_player_with_intent() {
        let (mut field, config) = field();
        let start = field.players[1].position;
        let intents = [PlayerIntent::moving(2, Vector3::new(0.0, 1.0, 0.0))];
        let mut events = EventCollection::new();

        PhysicsEngine::step(&mut field, &config, &intents, config.dt(), &mut events);

        assert!(field.players[1].position.y > start.y);
        assert_eq!(field.players[0].position, field.players[0].start_position);
    }

    #[test]
    fn test_nan_state_is_recovered() {
        let (mut field, config) = field();
        field.players[3].position.x = f32::NAN;
        field.ball.velocity.y = f32::INFINITY;

        let errors = PhysicsEngine::recover_non_finite(&mut field, &config);

        assert_eq!(errors.len(), 2);
        assert!(field.players[3].position.is_finite_vector());
        assert_eq!(field.players[3].velocity, Vector3::zeros());
        assert_eq!(field.ball.velocity, Vector3::zeros());
        assert!(field.pitch.contains(&field.players[3].position, 0.0));
    }
}
