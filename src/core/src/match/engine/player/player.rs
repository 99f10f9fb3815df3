use crate::r#match::engine::config::PlayerConfig;
use crate::r#match::engine::player::state::{PlayerRole, PlayerState, TeamSide};
use crate::r#match::engine::vector::VectorExtensions;
use nalgebra::Vector3;

const FACING_MIN_SPEED: f32 = 1.0;
const STUN_SLOWDOWN: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct MatchPlayer {
    pub id: u32,
    pub team: TeamSide,
    pub role: PlayerRole,
    pub position: Vector3<f32>,
    pub start_position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub facing: Vector3<f32>,
    pub is_human_controlled: bool,
    pub state: PlayerState,

    pub stun_timer: f32,
    pub tackle_cooldown: f32,
    pub tackle_timer: f32,
    pub celebration_timer: f32,
}

impl MatchPlayer {
    pub fn new(id: u32, team: TeamSide, role: PlayerRole, start_position: Vector3<f32>) -> Self {
        MatchPlayer {
            id,
            team,
            role,
            position: start_position,
            start_position,
            velocity: Vector3::zeros(),
            facing: Vector3::new(team.attacking_direction(), 0.0, 0.0),
            is_human_controlled: false,
            state: PlayerState::Idle,
            stun_timer: 0.0,
            tackle_cooldown: 0.0,
            tackle_timer: 0.0,
            celebration_timer: 0.0,
        }
    }

    pub fn max_speed(&self, config: &PlayerConfig) -> f32 {
        config.max_speed * config.role_speed_factors[self.role.index()]
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_timer > 0.0
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration_timer > 0.0
    }

    pub fn can_move(&self) -> bool {
        !self.is_stunned() && !self.is_celebrating()
    }

    pub fn can_tackle(&self) -> bool {
        !self.is_stunned() && !self.is_celebrating() && self.tackle_cooldown <= 0.0
    }

    pub fn speed(&self) -> f32 {
        self.velocity.horizontal_norm()
    }

    pub fn distance_to(&self, point: &Vector3<f32>) -> f32 {
        self.position.horizontal_distance(point)
    }

    /// Where a ball controlled by this player sits.
    pub fn control_point(&self, offset: f32) -> Vector3<f32> {
        self.position + self.facing * offset
    }

    /// Accelerates along `direction` or brakes when there is none, then integrates position.
    pub fn apply_movement(&mut self, direction: Option<Vector3<f32>>, config: &PlayerConfig, dt: f32) {
        let direction = direction
            .filter(|_| self.can_move())
            .map(|d| d.horizontal().normalize_or_zero())
            .filter(|d| *d != Vector3::zeros());

        match direction {
            Some(direction) => {
                self.velocity += direction * config.acceleration * dt;
                self.velocity = self.velocity.clamp_horizontal(self.max_speed(config));
            }
            None => {
                let speed = self.speed();
                let reduced = (speed - config.deceleration * dt).max(0.0);
                self.velocity = if speed > 0.0 {
                    self.velocity * (reduced / speed)
                } else {
                    Vector3::zeros()
                };
            }
        }

        self.velocity.z = 0.0;
        self.position += self.velocity * dt;

        if self.speed() > FACING_MIN_SPEED {
            self.facing = self.velocity.normalize_or_zero();
        }
    }

    pub fn tick_timers(&mut self, dt: f32) {
        self.stun_timer = (self.stun_timer - dt).max(0.0);
        self.tackle_cooldown = (self.tackle_cooldown - dt).max(0.0);
        self.tackle_timer = (self.tackle_timer - dt).max(0.0);
        self.celebration_timer = (self.celebration_timer - dt).max(0.0);
    }

    pub fn refresh_state(&mut self, is_charging: bool) {
        self.state = if self.is_celebrating() {
            PlayerState::Celebrating
        } else if self.tackle_timer > 0.0 {
            PlayerState::Tackling
        } else if is_charging {
            PlayerState::Charging
        } else if self.speed() > FACING_MIN_SPEED {
            PlayerState::Moving
        } else {
            PlayerState::Idle
        };
    }

    /// Stunned players lose most of their pace on the spot.
    pub fn stun(&mut self, duration: f32) {
        self.stun_timer = self.stun_timer.max(duration);
        self.velocity *= STUN_SLOWDOWN;
    }

    pub fn start_tackle(&mut self, duration: f32, cooldown: f32) {
        self.tackle_timer = duration;
        self.tackle_cooldown = cooldown;
        self.state = PlayerState::Tackling;
    }

    pub fn celebrate(&mut self, duration: f32) {
        self.celebration_timer = duration;
        self.velocity = Vector3::zeros();
        self.state = PlayerState::Celebrating;
    }

    pub fn reset_to_start(&mut self) {
        self.position = self.start_position;
        self.velocity = Vector3::zeros();
        self.facing = Vector3::new(self.team.attacking_direction(), 0.0, 0.0);
        self.stun_timer = 0.0;
        self.tackle_cooldown = 0.0;
        self.tackle_timer = 0.0;
        self.celebration_timer = 0.0;
        self.state = PlayerState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn striker() -> MatchPlayer {
        MatchPlayer::new(4, TeamSide::Red, PlayerRole::Striker, Vector3::new(100.0, 100.0, 0.0))
    }

    #[test]
    fn test_speed_is_clamped_to_role_max() {
        let config = PlayerConfig::default();
        let mut player = striker();

        for _ in 0..300 {
            player.apply_movement(Some(Vector3::new(1.0, 0.0, 0.0)), &config, DT);
        }

        assert_relative_eq!(player.speed(), player.max_speed(&config), epsilon = 1e-3);
        assert!(player.max_speed(&config) > config.max_speed);
    }

    #[test]
    fn test_velocity_decays_without_intent() {
        let config = PlayerConfig::default();
        let mut player = striker();
        player.velocity = Vector3::new(100.0, 0.0, 0.0);

        player.apply_movement(None, &config, DT);
        assert_relative_eq!(player.speed(), 100.0 - config.deceleration * DT, epsilon = 1e-3);

        for _ in 0..60 {
            player.apply_movement(None, &config, DT);
        }
        assert_eq!(player.speed(), 0.0);
    }

    #[test]
    fn test_stunned_player_ignores_intent() {
        let config = PlayerConfig::default();
        let mut player = striker();
        player.stun(0.5);

        player.apply_movement(Some(Vector3::new(0.0, 1.0, 0.0)), &config, DT);

        assert_eq!(player.velocity, Vector3::zeros());
        assert_eq!(player.position, player.start_position);
    }

    #[test]
    fn test_stun_slows_player_down() {
        let mut player = striker();
        player.velocity = Vector3::new(200.0, 0.0, 0.0);

        player.stun(0.1);

        assert_relative_eq!(player.speed(), 60.0, epsilon = 1e-4);
        assert!(player.is_stunned());
    }

    #[test]
    fn test_facing_follows_velocity() {
        let config = PlayerConfig::default();
        let mut player = striker();

        for _ in 0..10 {
            player.apply_movement(Some(Vector3::new(0.0, -1.0, 0.0)), &config, DT);
        }

        assert_relative_eq!(player.facing.y, -1.0, epsilon = 1e-5);
        player.refresh_state(false);
        assert_eq!(player.state, PlayerState::Moving);
    }

    #[test]
    fn test_timers_expire() {
        let mut player = striker();
        player.start_tackle(0.2, 0.7);
        player.refresh_state(false);
        assert_eq!(player.state, PlayerState::Tackling);
        assert!(!player.can_tackle());

        for _ in 0..70 {
            player.tick_timers(DT);
        }

        player.refresh_state(false);
        assert_eq!(player.state, PlayerState::Idle);
        assert!(player.can_tackle());
    }
}
