use crate::r#match::engine::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub seed: u64,
    pub tick_rate: u32,
    pub pitch: PitchConfig,
    pub player: PlayerConfig,
    pub ball: BallConfig,
    pub possession: PossessionConfig,
    pub passing: PassingConfig,
    pub tackling: TacklingConfig,
    pub timing: MatchTimingConfig,
    pub control: ControlConfig,
    pub ai: AiConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            seed: DEFAULT_SEED,
            tick_rate: 60,
            pitch: PitchConfig::default(),
            player: PlayerConfig::default(),
            ball: BallConfig::default(),
            possession: PossessionConfig::default(),
            passing: PassingConfig::default(),
            tackling: TacklingConfig::default(),
            timing: MatchTimingConfig::default(),
            control: ControlConfig::default(),
            ai: AiConfig::default(),
        }
    }
}

impl MatchConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Seconds per simulation tick.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;

        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::invalid("tick_rate", "must be greater than zero"));
        }

        positive("pitch.width", self.pitch.width)?;
        positive("pitch.height", self.pitch.height)?;
        positive("pitch.goal_width", self.pitch.goal_width)?;
        if self.pitch.goal_width >= self.pitch.height {
            return Err(ConfigError::invalid(
                "pitch.goal_width",
                "goal mouth must be narrower than the pitch",
            ));
        }

        positive("player.radius", self.player.radius)?;
        positive("player.max_speed", self.player.max_speed)?;
        positive("player.acceleration", self.player.acceleration)?;
        positive("ball.radius", self.ball.radius)?;
        positive("ball.max_speed", self.ball.max_speed)?;
        positive("ball.gravity", self.ball.gravity)?;
        unit_interval("ball.bounce_damping", self.ball.bounce_damping)?;
        unit_interval("ball.landing_damping", self.ball.landing_damping)?;
        positive("possession.pickup_radius", self.possession.pickup_radius)?;
        positive("passing.charge_rate", self.passing.charge_rate)?;
        unit_interval("passing.max_power", self.passing.max_power)?;

        if self.passing.lob_min_flight_time > self.passing.lob_max_flight_time {
            return Err(ConfigError::invalid(
                "passing.lob_min_flight_time",
                "must not exceed lob_max_flight_time",
            ));
        }

        unit_interval("tackling.base_success", self.tackling.base_success)?;
        positive("timing.match_duration", self.timing.match_duration)?;

        if self.player.role_speed_factors.iter().any(|f| !f.is_finite() || *f <= 0.0) {
            return Err(ConfigError::invalid(
                "player.role_speed_factors",
                "every factor must be a positive number",
            ));
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be a positive number"))
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must lie within 0..=1"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    pub width: f32,
    pub height: f32,
    pub goal_width: f32,
    pub goal_depth: f32,
    pub post_radius: f32,
    pub crossbar_height: f32,
    /// Allowed overshoot past the lines before a position counts as out of bounds.
    pub boundary_epsilon: f32,
}

impl Default for PitchConfig {
    fn default() -> Self {
        PitchConfig {
            width: 1200.0,
            height: 650.0,
            goal_width: 120.0,
            goal_depth: 30.0,
            post_radius: 5.0,
            crossbar_height: 60.0,
            boundary_epsilon: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub radius: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    /// Goalkeeper, defender, midfielder, striker.
    pub role_speed_factors: [f32; 4],
    pub collision_push: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            radius: 15.0,
            max_speed: 280.0,
            acceleration: 900.0,
            deceleration: 600.0,
            role_speed_factors: [0.9, 0.95, 1.0, 1.05],
            collision_push: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    pub max_speed: f32,
    /// Fraction of grounded speed lost per second.
    pub friction: f32,
    pub min_speed: f32,
    pub bounce_damping: f32,
    pub gravity: f32,
    /// Below this height an aerial ball can be intercepted on landing.
    pub interception_height: f32,
    pub landing_damping: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        BallConfig {
            radius: 8.0,
            max_speed: 650.0,
            friction: 0.9,
            min_speed: 5.0,
            bounce_damping: 0.7,
            gravity: 900.0,
            interception_height: 24.0,
            landing_damping: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PossessionConfig {
    pub pickup_radius: f32,
    pub pickup_speed: f32,
    pub retain_factor: f32,
    /// Distance of the controlled ball from the owner, along the owner's facing.
    pub control_offset: f32,
    /// Seconds after a kick during which the kicker cannot collect the ball again.
    pub kick_grace: f32,
}

impl Default for PossessionConfig {
    fn default() -> Self {
        PossessionConfig {
            pickup_radius: 28.0,
            pickup_speed: 180.0,
            retain_factor: 1.3,
            control_offset: 22.0,
            kick_grace: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassingConfig {
    /// Power gained per second of holding the charge input.
    pub charge_rate: f32,
    pub max_power: f32,
    pub short_min_speed: f32,
    pub short_max_speed: f32,
    /// Half angle of the sector searched around the held direction, radians.
    pub short_sector_half_angle: f32,
    pub through_speed: f32,
    pub through_lead_time: f32,
    pub through_run_distance: f32,
    pub lob_reference_speed: f32,
    pub lob_min_flight_time: f32,
    pub lob_max_flight_time: f32,
    pub shot_min_speed: f32,
    pub shot_max_speed: f32,
    /// Maximum angular error of a full-power shot, radians.
    pub shot_inaccuracy: f32,
}

impl Default for PassingConfig {
    fn default() -> Self {
        PassingConfig {
            charge_rate: 1.8,
            max_power: 1.0,
            short_min_speed: 220.0,
            short_max_speed: 420.0,
            short_sector_half_angle: 0.8,
            through_speed: 480.0,
            through_lead_time: 0.6,
            through_run_distance: 90.0,
            lob_reference_speed: 350.0,
            lob_min_flight_time: 0.6,
            lob_max_flight_time: 1.6,
            shot_min_speed: 250.0,
            shot_max_speed: 650.0,
            shot_inaccuracy: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TacklingConfig {
    pub radius: f32,
    pub base_success: f32,
    pub front_bonus: f32,
    pub behind_penalty: f32,
    pub fast_carrier_penalty: f32,
    /// Fraction of max speed above which a carrier counts as running fast.
    pub fast_carrier_ratio: f32,
    /// Bonus at zero distance, fading linearly to nothing at the tackle radius.
    pub distance_bonus: f32,
    pub cooldown: f32,
    pub tackler_stun: f32,
    pub carrier_stun: f32,
    /// Speed of the ball knocked loose towards a successful tackler.
    pub ball_push: f32,
    /// Seconds the beaten carrier cannot touch the loose ball.
    pub loose_ball_grace: f32,
    pub duration: f32,
}

impl Default for TacklingConfig {
    fn default() -> Self {
        TacklingConfig {
            radius: 32.0,
            base_success: 0.55,
            front_bonus: 0.1,
            behind_penalty: 0.1,
            fast_carrier_penalty: 0.1,
            fast_carrier_ratio: 0.7,
            distance_bonus: 0.1,
            cooldown: 0.7,
            tackler_stun: 0.25,
            carrier_stun: 0.125,
            ball_push: 60.0,
            loose_ball_grace: 0.4,
            duration: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchTimingConfig {
    pub match_duration: f32,
    pub celebration_time: f32,
    pub kickoff_delay: f32,
    pub player_celebration_time: f32,
}

impl Default for MatchTimingConfig {
    fn default() -> Self {
        MatchTimingConfig {
            match_duration: 180.0,
            celebration_time: 4.0,
            kickoff_delay: 1.0,
            player_celebration_time: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    pub auto_switch_on_possession: bool,
    pub auto_switch_on_pass: bool,
}

impl Default for ControlConfig {
    fn default() -> Self {
        ControlConfig {
            auto_switch_on_possession: true,
            auto_switch_on_pass: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub parallel: bool,
    pub decision_cooldown: f32,
    pub smoothing: f32,
    pub chase_distance: f32,
    pub close_chase_distance: f32,
    pub chase_prediction: f32,
    pub shot_distance: f32,
    pub shot_angle_max: f32,
    pub pressure_distance: f32,
    pub open_space: f32,
    pub lane_width: f32,
    pub dribble_distance: f32,
    pub better_position_margin: f32,
    pub through_run_speed: f32,
    pub arrive_distance: f32,
    pub goalkeeper_range_x: f32,
    pub goalkeeper_range_y: f32,
    pub striker_push: f32,
    pub midfielder_support: f32,
    pub short_pass_reach: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            parallel: false,
            decision_cooldown: 0.18,
            smoothing: 0.12,
            chase_distance: 350.0,
            close_chase_distance: 150.0,
            chase_prediction: 0.3,
            shot_distance: 380.0,
            shot_angle_max: 0.6,
            pressure_distance: 120.0,
            open_space: 60.0,
            lane_width: 35.0,
            dribble_distance: 100.0,
            better_position_margin: 80.0,
            through_run_speed: 60.0,
            arrive_distance: 5.0,
            goalkeeper_range_x: 80.0,
            goalkeeper_range_y: 100.0,
            striker_push: 180.0,
            midfielder_support: 120.0,
            short_pass_reach: 400.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(MatchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MatchConfig::from_json_str(r#"{ "seed": 7, "ball": { "friction": 1.2 } }"#)
            .expect("config should parse");

        assert_eq!(config.seed, 7);
        assert_eq!(config.ball.friction, 1.2);
        assert_eq!(config.ball.radius, BallConfig::default().radius);
        assert_eq!(config.pitch, PitchConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = MatchConfig::from_json_str(r#"{ "tick_rate": 0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid { field: "tick_rate", .. })));

        let result = MatchConfig::from_json_str(r#"{ "ball": { "bounce_damping": 1.5 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { field: "ball.bounce_damping", .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_reported() {
        assert!(matches!(
            MatchConfig::from_json_str("{ seed: "),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let result = MatchConfig::from_file("/definitely/not/here/match.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_dt_follows_tick_rate() {
        let config = MatchConfig::default();
        assert!((config.dt() - FIXED_TIMESTEP).abs() < f32::EPSILON);
    }
}
