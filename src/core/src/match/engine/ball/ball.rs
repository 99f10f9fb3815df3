use crate::r#match::engine::ball::events::BallEvent;
use crate::r#match::engine::config::{BallConfig, MatchConfig};
use crate::r#match::engine::events::EventCollection;
use crate::r#match::engine::pitch::{GoalSide, Pitch};
use crate::r#match::engine::player::MatchPlayer;
use crate::r#match::engine::vector::VectorExtensions;
use nalgebra::Vector3;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlightMode {
    Grounded,
    Aerial,
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub start_position: Vector3<f32>,
    /// `z` is the height above the pitch.
    pub position: Vector3<f32>,
    /// `z` is the vertical velocity.
    pub velocity: Vector3<f32>,
    pub radius: f32,
    pub flight_mode: FlightMode,

    pub current_owner: Option<u32>,
    pub previous_owner: Option<u32>,
    /// Seconds left before the last kicker may collect the ball again.
    pub kick_grace: f32,
}

impl Ball {
    pub fn with_coord(field_width: f32, field_height: f32, radius: f32) -> Self {
        let start_position = Vector3::new(field_width / 2.0, field_height / 2.0, 0.0);

        Ball {
            start_position,
            position: start_position,
            velocity: Vector3::zeros(),
            radius,
            flight_mode: FlightMode::Grounded,
            current_owner: None,
            previous_owner: None,
            kick_grace: 0.0,
        }
    }

    pub fn update(
        &mut self,
        config: &MatchConfig,
        pitch: &Pitch,
        players: &[MatchPlayer],
        dt: f32,
        events: &mut EventCollection,
    ) {
        self.kick_grace = (self.kick_grace - dt).max(0.0);

        let owner = self
            .current_owner
            .and_then(|owner_id| players.iter().find(|p| p.id == owner_id));

        if let Some(owner) = owner {
            self.move_to_owner(owner, config.possession.control_offset, pitch);
            return;
        }

        if self.update_velocity(&config.ball, dt) {
            events.add_ball_event(BallEvent::Landed);
        }

        self.check_boundary_collision(pitch, &config.ball);
        self.check_post_collision(pitch, &config.ball);
    }

    pub fn reset(&mut self) {
        self.position = self.start_position;
        self.velocity = Vector3::zeros();
        self.flight_mode = FlightMode::Grounded;
        self.current_owner = None;
        self.previous_owner = None;
        self.kick_grace = 0.0;
    }

    /// Horizontal speed.
    pub fn speed(&self) -> f32 {
        self.velocity.horizontal_norm()
    }

    pub fn is_aerial(&self) -> bool {
        self.flight_mode == FlightMode::Aerial
    }

    pub fn is_owned(&self) -> bool {
        self.current_owner.is_some()
    }

    /// Grounded, or dropping below the interception height on its way down.
    pub fn is_interceptable(&self, interception_height: f32) -> bool {
        match self.flight_mode {
            FlightMode::Grounded => true,
            FlightMode::Aerial => self.position.z < interception_height && self.velocity.z < 0.0,
        }
    }

    pub fn set_owner(&mut self, player_id: u32) {
        if self.current_owner != Some(player_id) {
            self.previous_owner = self.current_owner.or(self.previous_owner);
        }

        self.current_owner = Some(player_id);
        self.velocity = Vector3::zeros();
        self.position.z = 0.0;
        self.flight_mode = FlightMode::Grounded;
        self.kick_grace = 0.0;
    }

    /// Sends the ball along the ground. Returns the player who lost it.
    pub fn kick(&mut self, velocity: Vector3<f32>, config: &BallConfig, grace: f32) -> Option<u32> {
        let kicker = self.current_owner.take();
        if kicker.is_some() {
            self.previous_owner = kicker;
        }

        self.velocity = velocity.horizontal().clamp_horizontal(config.max_speed);
        self.position.z = 0.0;
        self.flight_mode = FlightMode::Grounded;
        self.kick_grace = grace;

        kicker
    }

    /// Lifts the ball into an aerial arc.
    pub fn launch(
        &mut self,
        horizontal_velocity: Vector3<f32>,
        vertical_velocity: f32,
        config: &BallConfig,
        grace: f32,
    ) -> Option<u32> {
        let kicker = self.kick(horizontal_velocity, config, grace);
        self.velocity.z = vertical_velocity;
        self.flight_mode = FlightMode::Aerial;

        kicker
    }

    pub fn move_to_owner(&mut self, owner: &MatchPlayer, offset: f32, pitch: &Pitch) {
        let target = owner.control_point(offset);

        self.position = if pitch.is_in_goal_mouth(&target) {
            Vector3::new(target.x, target.y, 0.0)
        } else {
            pitch.clamp_inside(&target, self.radius)
        };
        self.velocity = Vector3::zeros();
        self.flight_mode = FlightMode::Grounded;
    }

    /// Integrates one step. Returns true on the step the ball lands.
    pub fn update_velocity(&mut self, config: &BallConfig, dt: f32) -> bool {
        match self.flight_mode {
            FlightMode::Grounded => {
                self.position += self.velocity.horizontal() * dt;
                self.position.z = 0.0;

                let retained = (1.0 - config.friction * dt).max(0.0);
                self.velocity = (self.velocity.horizontal() * retained)
                    .clamp_horizontal(config.max_speed);

                if self.speed() < config.min_speed {
                    self.velocity = Vector3::zeros();
                }

                false
            }
            FlightMode::Aerial => {
                self.position.x += self.velocity.x * dt;
                self.position.y += self.velocity.y * dt;
                self.position.z += self.velocity.z * dt - 0.5 * config.gravity * dt * dt;
                self.velocity.z -= config.gravity * dt;

                if self.position.z <= 0.0 {
                    self.position.z = 0.0;
                    self.velocity = self.velocity.horizontal() * config.landing_damping;
                    self.flight_mode = FlightMode::Grounded;
                    return true;
                }

                false
            }
        }
    }

    pub fn check_boundary_collision(&mut self, pitch: &Pitch, config: &BallConfig) {
        let r = self.radius;
        let damping = config.bounce_damping;
        let in_mouth = pitch.is_in_goal_mouth(&self.position);

        if in_mouth && (self.position.x < 0.0 || self.position.x > pitch.width) {
            // inside the net
            let mouth = pitch.goal(GoalSide::Left);
            let back = pitch.goal_depth - r;

            if self.position.x < -back {
                self.position.x = -back;
                self.velocity.x = self.velocity.x.abs() * damping;
            } else if self.position.x > pitch.width + back {
                self.position.x = pitch.width + back;
                self.velocity.x = -self.velocity.x.abs() * damping;
            }

            let (top, bottom) = (mouth.top_post.y + r, mouth.bottom_post.y - r);
            if self.position.y < top {
                self.position.y = top;
                self.velocity.y = self.velocity.y.abs() * damping;
            } else if self.position.y > bottom {
                self.position.y = bottom;
                self.velocity.y = -self.velocity.y.abs() * damping;
            }

            return;
        }

        if !in_mouth {
            if self.position.x < r {
                self.position.x = r;
                if self.velocity.x < 0.0 {
                    self.velocity.x = -self.velocity.x * damping;
                }
            } else if self.position.x > pitch.width - r {
                self.position.x = pitch.width - r;
                if self.velocity.x > 0.0 {
                    self.velocity.x = -self.velocity.x * damping;
                }
            }
        }

        if self.position.y < r {
            self.position.y = r;
            if self.velocity.y < 0.0 {
                self.velocity.y = -self.velocity.y * damping;
            }
        } else if self.position.y > pitch.height - r {
            self.position.y = pitch.height - r;
            if self.velocity.y > 0.0 {
                self.velocity.y = -self.velocity.y * damping;
            }
        }
    }

    pub fn check_post_collision(&mut self, pitch: &Pitch, config: &BallConfig) {
        if self.position.z > pitch.crossbar_height {
            return;
        }

        let min_distance = self.radius + pitch.post_radius;

        for side in [GoalSide::Left, GoalSide::Right] {
            for post in pitch.goal(side).posts() {
                let offset = (self.position - post).horizontal();
                let distance = offset.horizontal_norm();

                if distance >= min_distance {
                    continue;
                }

                let normal = if distance > f32::EPSILON {
                    offset / distance
                } else {
                    // dead centre on the post, push back onto the pitch
                    Vector3::new(if side == GoalSide::Left { 1.0 } else { -1.0 }, 0.0, 0.0)
                };

                self.position.x = post.x + normal.x * min_distance;
                self.position.y = post.y + normal.y * min_distance;

                let normal_speed = self.velocity.dot(&normal);
                if normal_speed < 0.0 {
                    let reflected = normal * (1.0 + config.bounce_damping) * normal_speed;
                    self.velocity.x -= reflected.x;
                    self.velocity.y -= reflected.y;
                }
            }
        }
    }

    /// Seconds until an aerial ball touches the ground.
    pub fn time_to_landing(&self, gravity: f32) -> f32 {
        if !self.is_aerial() || gravity <= 0.0 {
            return 0.0;
        }

        let vz = self.velocity.z;
        let discriminant = vz * vz + 2.0 * gravity * self.position.z.max(0.0);
        (vz + discriminant.sqrt()) / gravity
    }

    pub fn calculate_landing_position(&self, gravity: f32) -> Vector3<f32> {
        if !self.is_aerial() || self.current_owner.is_some() {
            return self.position.horizontal();
        }

        let time = self.time_to_landing(gravity);
        Vector3::new(
            self.position.x + self.velocity.x * time,
            self.position.y + self.velocity.y * time,
            0.0,
        )
    }

    /// Where the ball will roughly be after `time` seconds.
    pub fn predict_position(&self, time: f32, config: &BallConfig) -> Vector3<f32> {
        if self.is_aerial() {
            return self.calculate_landing_position(config.gravity);
        }

        let retained = (1.0 - config.friction * time * 0.5).max(0.0);
        (self.position + self.velocity * time * retained).horizontal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::engine::config::PitchConfig;
    use crate::r#match::engine::player::{PlayerRole, TeamSide};
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (Ball, Pitch, BallConfig) {
        let pitch = Pitch::new(&PitchConfig::default());
        let config = BallConfig::default();
        (Ball::with_coord(pitch.width, pitch.height, config.radius), pitch, config)
    }

    #[test]
    fn test_ball_starts_at_center() {
        let (ball, pitch, _) = setup();
        assert_eq!(ball.position, pitch.center());
        assert_eq!(ball.flight_mode, FlightMode::Grounded);
        assert!(ball.current_owner.is_none());
    }

    #[test]
    fn test_grounded_friction_slows_ball() {
        let (mut ball, _, config) = setup();
        ball.velocity = Vector3::new(300.0, 0.0, 0.0);

        let mut last_speed = ball.speed();
        for _ in 0..600 {
            ball.update_velocity(&config, DT);
            assert!(ball.speed() <= last_speed);
            last_speed = ball.speed();
        }

        assert_eq!(ball.speed(), 0.0);
    }

    #[test]
    fn test_kick_clears_owner_and_caps_speed() {
        let (mut ball, _, config) = setup();
        ball.set_owner(3);

        let kicker = ball.kick(Vector3::new(5000.0, 0.0, 0.0), &config, 0.2);

        assert_eq!(kicker, Some(3));
        assert_eq!(ball.current_owner, None);
        assert_eq!(ball.previous_owner, Some(3));
        assert_relative_eq!(ball.speed(), config.max_speed, epsilon = 1e-3);
    }

    #[test]
    fn test_aerial_ball_lands_and_grounds() {
        let (mut ball, _, config) = setup();
        ball.launch(Vector3::new(200.0, 0.0, 0.0), 300.0, &config, 0.0);
        assert!(ball.is_aerial());

        let expected = ball.calculate_landing_position(config.gravity);
        let mut landed = false;

        for _ in 0..120 {
            assert!(ball.position.z >= 0.0);
            if ball.update_velocity(&config, DT) {
                landed = true;
                break;
            }
        }

        assert!(landed);
        assert_eq!(ball.flight_mode, FlightMode::Grounded);
        assert_eq!(ball.position.z, 0.0);
        assert!((ball.position.x - expected.x).abs() < 200.0 * DT + 0.1);
        assert_relative_eq!(ball.speed(), 200.0 * config.landing_damping, epsilon = 1e-3);
    }

    #[test]
    fn test_side_line_reflects_with_damping() {
        let (mut ball, pitch, config) = setup();
        ball.position = Vector3::new(400.0, 3.0, 0.0);
        ball.velocity = Vector3::new(0.0, -100.0, 0.0);

        ball.check_boundary_collision(&pitch, &config);

        assert_eq!(ball.position.y, ball.radius);
        assert_relative_eq!(ball.velocity.y, 100.0 * config.bounce_damping);
    }

    #[test]
    fn test_goal_mouth_does_not_reflect() {
        let (mut ball, pitch, config) = setup();
        ball.position = Vector3::new(2.0, 325.0, 0.0);
        ball.velocity = Vector3::new(-300.0, 0.0, 0.0);

        ball.check_boundary_collision(&pitch, &config);

        assert_eq!(ball.position.x, 2.0);
        assert_eq!(ball.velocity.x, -300.0);
    }

    #[test]
    fn test_net_holds_ball() {
        let (mut ball, pitch, config) = setup();
        ball.position = Vector3::new(-40.0, 325.0, 0.0);
        ball.velocity = Vector3::new(-300.0, 0.0, 0.0);

        ball.check_boundary_collision(&pitch, &config);

        assert_eq!(ball.position.x, -(pitch.goal_depth - ball.radius));
        assert!(ball.velocity.x > 0.0);
    }

    #[test]
    fn test_post_pushes_ball_out() {
        let (mut ball, pitch, config) = setup();
        let post = pitch.goal(GoalSide::Left).top_post;
        ball.position = Vector3::new(post.x + 5.0, post.y, 0.0);
        ball.velocity = Vector3::new(-200.0, 0.0, 0.0);

        ball.check_post_collision(&pitch, &config);

        let distance = ball.position.horizontal_distance(&post);
        assert_relative_eq!(distance, ball.radius + pitch.post_radius, epsilon = 1e-4);
        assert!(ball.velocity.x > 0.0);
        assert!(ball.speed() <= 200.0);
    }

    #[test]
    fn test_owned_ball_follows_owner() {
        let (mut ball, pitch, config) = setup();
        let mut player =
            MatchPlayer::new(2, TeamSide::Red, PlayerRole::Defender, Vector3::new(300.0, 300.0, 0.0));
        player.facing = Vector3::new(0.0, 1.0, 0.0);
        ball.set_owner(player.id);

        let mut events = EventCollection::new();
        ball.update(&MatchConfig::default(), &pitch, &[player.clone()], DT, &mut events);

        assert_eq!(ball.position, Vector3::new(300.0, 322.0, 0.0));
        assert_eq!(ball.velocity, Vector3::zeros());
        assert_eq!(config.radius, ball.radius);
    }
}
