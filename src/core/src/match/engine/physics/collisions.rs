use crate::r#match::engine::config::PlayerConfig;
use crate::r#match::engine::field::MatchField;
use crate::r#match::engine::player::MatchPlayer;
use crate::r#match::engine::vector::VectorExtensions;
use nalgebra::Vector3;

/// Separates overlapping players and trades part of their closing speed.
pub fn resolve_player_collisions(players: &mut [MatchPlayer], config: &PlayerConfig) {
    let min_distance = config.radius * 2.0;

    for i in 0..players.len() {
        for j in (i + 1)..players.len() {
            let (left, right) = players.split_at_mut(j);
            let a = &mut left[i];
            let b = &mut right[0];

            let offset = (b.position - a.position).horizontal();
            let distance = offset.horizontal_norm();
            if distance >= min_distance {
                continue;
            }

            let normal = if distance > f32::EPSILON {
                offset / distance
            } else {
                Vector3::new(1.0, 0.0, 0.0)
            };

            let overlap = min_distance - distance;
            a.position -= normal * (overlap / 2.0);
            b.position += normal * (overlap / 2.0);

            let closing = (a.velocity - b.velocity).dot(&normal);
            if closing > 0.0 {
                let impulse = normal * closing * config.collision_push;
                a.velocity -= impulse;
                b.velocity += impulse;
            }
        }
    }
}

/// Keeps every player inside the lines, stopping motion into them.
pub fn clamp_players(field: &mut MatchField, radius: f32) {
    let (width, height) = (field.pitch.width, field.pitch.height);

    for player in field.players.iter_mut() {
        if player.position.x < radius {
            player.position.x = radius;
            player.velocity.x = player.velocity.x.max(0.0);
        } else if player.position.x > width - radius {
            player.position.x = width - radius;
            player.velocity.x = player.velocity.x.min(0.0);
        }

        if player.position.y < radius {
            player.position.y = radius;
            player.velocity.y = player.velocity.y.max(0.0);
        } else if player.position.y > height - radius {
            player.position.y = height - radius;
            player.velocity.y = player.velocity.y.min(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::engine::config::MatchConfig;
    use crate::r#match::engine::player::{PlayerRole, TeamSide};

    #[test]
    fn test_overlapping_players_are_separated() {
        let config = PlayerConfig::default();
        let mut players = vec![
            MatchPlayer::new(1, TeamSide::Red, PlayerRole::Defender, Vector3::new(100.0, 100.0, 0.0)),
            MatchPlayer::new(5, TeamSide::Blue, PlayerRole::Defender, Vector3::new(110.0, 100.0, 0.0)),
        ];
        players[0].velocity = Vector3::new(100.0, 0.0, 0.0);

        resolve_player_collisions(&mut players, &config);

        let distance = players[0].position.horizontal_distance(&players[1].position);
        assert!((distance - config.radius * 2.0).abs() < 1e-3);
        assert!(players[0].velocity.x < 100.0);
        assert!(players[1].velocity.x > 0.0);
    }

    #[test]
    fn test_players_stay_inside_lines() {
        let config = MatchConfig::default();
        let mut field = MatchField::new(&config);
        field.players[0].position = Vector3::new(-30.0, 700.0, 0.0);
        field.players[0].velocity = Vector3::new(-50.0, 50.0, 0.0);

        clamp_players(&mut field, config.player.radius);

        assert_eq!(field.players[0].position, Vector3::new(15.0, 635.0, 0.0));
        assert_eq!(field.players[0].velocity, Vector3::zeros());
    }
}
