use crate::r#match::engine::player::MatchPlayer;
use crate::r#match::engine::vector::VectorExtensions;
use nalgebra::Vector3;

/// Part of the segment near its ends that never counts as blocked.
const LANE_END_MARGIN: f32 = 0.1;

/// Distance from `point` to the segment `from`-`to` and the projection parameter along it.
pub fn distance_to_segment(point: &Vector3<f32>, from: &Vector3<f32>, to: &Vector3<f32>) -> (f32, f32) {
    let segment = (to - from).horizontal();
    let length_squared = segment.dot(&segment);

    if length_squared <= f32::EPSILON {
        return (point.horizontal_distance(from), 0.0);
    }

    let t = ((point - from).horizontal().dot(&segment) / length_squared).clamp(0.0, 1.0);
    let closest = from + segment * t;

    (point.horizontal_distance(&closest), t)
}

/// Players standing inside the corridor of `width` around the segment.
pub fn count_blockers<'a>(
    from: &Vector3<f32>,
    to: &Vector3<f32>,
    players: impl Iterator<Item = &'a MatchPlayer>,
    width: f32,
) -> usize {
    players
        .filter(|player| {
            let (distance, t) = distance_to_segment(&player.position, from, to);
            distance < width && t > LANE_END_MARGIN && t < 1.0 - LANE_END_MARGIN
        })
        .count()
}

pub fn is_lane_clear<'a>(
    from: &Vector3<f32>,
    to: &Vector3<f32>,
    players: impl Iterator<Item = &'a MatchPlayer>,
    width: f32,
) -> bool {
    count_blockers(from, to, players, width) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::engine::player::{PlayerRole, TeamSide};

    fn blocker(x: f32, y: f32) -> MatchPlayer {
        MatchPlayer::new(6, TeamSide::Blue, PlayerRole::Defender, Vector3::new(x, y, 0.0))
    }

    #[test]
    fn test_distance_to_segment() {
        let from = Vector3::new(0.0, 0.0, 0.0);
        let to = Vector3::new(100.0, 0.0, 0.0);

        let (distance, t) = distance_to_segment(&Vector3::new(50.0, 20.0, 0.0), &from, &to);
        assert!((distance - 20.0).abs() < 1e-5);
        assert!((t - 0.5).abs() < 1e-5);

        let (distance, t) = distance_to_segment(&Vector3::new(-30.0, 40.0, 0.0), &from, &to);
        assert!((distance - 50.0).abs() < 1e-5);
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_lane_blocked_by_player_in_corridor() {
        let from = Vector3::new(100.0, 300.0, 0.0);
        let to = Vector3::new(400.0, 300.0, 0.0);
        let players = [blocker(250.0, 310.0)];

        assert!(!is_lane_clear(&from, &to, players.iter(), 35.0));
        assert!(is_lane_clear(&from, &to, players.iter(), 5.0));
    }

    #[test]
    fn test_players_at_lane_ends_do_not_block() {
        let from = Vector3::new(100.0, 300.0, 0.0);
        let to = Vector3::new(400.0, 300.0, 0.0);
        let players = [blocker(395.0, 300.0), blocker(102.0, 300.0)];

        assert!(is_lane_clear(&from, &to, players.iter(), 35.0));
    }
}
