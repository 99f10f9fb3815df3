use crate::r#match::engine::ball::BallEvent;
use crate::r#match::engine::config::{MatchConfig, PassingConfig};
use crate::r#match::engine::context::MatchContext;
use crate::r#match::engine::error::SimulationError;
use crate::r#match::engine::events::EventCollection;
use crate::r#match::engine::field::MatchField;
use crate::r#match::engine::passing::{KickAction, PassAction, PassMode, ShotAction};
use crate::r#match::engine::player::MatchPlayer;
use crate::r#match::engine::player::events::PlayerEvent;
use crate::r#match::engine::vector::VectorExtensions;
use log::debug;
use nalgebra::Vector3;
use rand::Rng;

const STANDING_SPEED: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LobLaunch {
    pub flight_time: f32,
    pub horizontal_speed: f32,
    pub vertical_velocity: f32,
}

pub struct PassingProtocol;

impl PassingProtocol {
    /// Teammate best matching the held direction: the closest one inside the
    /// sector around it, otherwise the one at the smallest angle.
    pub fn select_receiver(
        field: &MatchField,
        passer: &MatchPlayer,
        direction: &Vector3<f32>,
        sector_half_angle: f32,
    ) -> Option<u32> {
        let direction = if direction.horizontal_norm() > f32::EPSILON {
            *direction
        } else {
            passer.facing
        };

        let candidates: Vec<(f32, f32, u32)> = field
            .teammates(passer)
            .map(|teammate| {
                let offset = teammate.position - passer.position;
                (direction.angle_to(&offset), offset.horizontal_norm(), teammate.id)
            })
            .collect();

        let in_sector = candidates
            .iter()
            .filter(|(angle, _, _)| *angle <= sector_half_angle)
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.2.cmp(&b.2)));

        in_sector
            .or_else(|| {
                candidates
                    .iter()
                    .min_by(|a, b| a.0.total_cmp(&b.0).then(a.2.cmp(&b.2)))
            })
            .map(|(_, _, id)| *id)
    }

    /// Point ahead of the receiver's run, or of the run its role would make when standing.
    pub fn through_target(field: &MatchField, config: &PassingConfig, receiver: &MatchPlayer) -> Vector3<f32> {
        let lead = if receiver.speed() > STANDING_SPEED {
            receiver.velocity.horizontal() * config.through_lead_time
        } else {
            Vector3::new(
                receiver.team.attacking_direction() * config.through_run_distance,
                0.0,
                0.0,
            )
        };

        field.pitch.clamp_inside(&(receiver.position + lead), 0.0)
    }

    pub fn lob_launch(distance: f32, config: &PassingConfig, gravity: f32) -> LobLaunch {
        let flight_time = (distance / config.lob_reference_speed)
            .clamp(config.lob_min_flight_time, config.lob_max_flight_time);

        LobLaunch {
            flight_time,
            horizontal_speed: distance / flight_time,
            vertical_velocity: gravity * flight_time / 2.0,
        }
    }

    pub fn short_pass_speed(config: &PassingConfig, power: f32) -> f32 {
        config.short_min_speed + (config.short_max_speed - config.short_min_speed) * power
    }

    pub fn shot_speed(config: &PassingConfig, power: f32) -> f32 {
        config.shot_min_speed + (config.shot_max_speed - config.shot_min_speed) * power
    }

    /// Turns a released pass or shot into a ball trajectory. Only the owner may kick.
    pub fn execute(
        action: KickAction,
        field: &mut MatchField,
        context: &mut MatchContext,
        events: &mut EventCollection,
    ) -> Result<(), SimulationError> {
        let initiator_id = action.initiator();

        if field.ball.current_owner != Some(initiator_id) {
            return Err(SimulationError::invalid_action(
                initiator_id,
                "kick attempted without owning the ball",
            ));
        }

        let kicker = field
            .player(initiator_id)
            .cloned()
            .ok_or(SimulationError::invalid_action(initiator_id, "unknown player"))?;

        match action {
            KickAction::Pass(pass) => Self::execute_pass(&pass, &kicker, field, &context.config, events),
            KickAction::Shot(shot) => Self::execute_shot(&shot, &kicker, field, context, events),
        }
    }

    fn execute_pass(
        pass: &PassAction,
        passer: &MatchPlayer,
        field: &mut MatchField,
        config: &MatchConfig,
        events: &mut EventCollection,
    ) -> Result<(), SimulationError> {
        let receiver = field
            .player(pass.receiver)
            .filter(|receiver| receiver.team == passer.team && receiver.id != passer.id)
            .cloned()
            .ok_or(SimulationError::invalid_action(pass.initiator, "no valid receiver"))?;

        let target = match pass.mode {
            PassMode::Short | PassMode::Lob => receiver.position,
            PassMode::Through => Self::through_target(field, &config.passing, &receiver),
        };

        let direction = Self::kick_direction(passer, &target);
        Self::place_for_kick(field, passer, &direction, config);

        let grace = config.possession.kick_grace;
        match pass.mode {
            PassMode::Short => {
                let speed = Self::short_pass_speed(&config.passing, pass.charge_power);
                field.ball.kick(direction * speed, &config.ball, grace);
            }
            PassMode::Through => {
                field
                    .ball
                    .kick(direction * config.passing.through_speed, &config.ball, grace);
            }
            PassMode::Lob => {
                let distance = field.ball.position.horizontal_distance(&target);
                let launch = Self::lob_launch(distance, &config.passing, config.ball.gravity);
                field.ball.launch(
                    direction * launch.horizontal_speed,
                    launch.vertical_velocity,
                    &config.ball,
                    grace,
                );
            }
        }

        debug!(
            "{:?} pass {} -> {} power {:.2}",
            pass.mode, pass.initiator, pass.receiver, pass.charge_power
        );

        events.add_ball_event(BallEvent::Released(passer.id));
        events.add_player_event(PlayerEvent::PassTo {
            passer_id: passer.id,
            receiver_id: receiver.id,
            mode: pass.mode,
        });

        Ok(())
    }

    fn execute_shot(
        shot: &ShotAction,
        shooter: &MatchPlayer,
        field: &mut MatchField,
        context: &mut MatchContext,
        events: &mut EventCollection,
    ) -> Result<(), SimulationError> {
        let config = &context.config;
        let power = shot.power.clamp(0.0, config.passing.max_power);

        let spread = config.passing.shot_inaccuracy * power;
        let error = if spread > 0.0 {
            context.rng.gen_range(-spread..=spread)
        } else {
            0.0
        };

        let direction = Self::kick_direction(shooter, &shot.target).rotate_horizontal(error);
        Self::place_for_kick(field, shooter, &direction, config);

        let speed = Self::shot_speed(&config.passing, power);
        field
            .ball
            .kick(direction * speed, &config.ball, config.possession.kick_grace);

        debug!(
            "shot by {} power {:.2} angle error {:.3}",
            shooter.id, power, error
        );

        events.add_ball_event(BallEvent::Released(shooter.id));
        events.add_player_event(PlayerEvent::ShotTaken {
            shooter_id: shooter.id,
        });

        Ok(())
    }

    fn kick_direction(kicker: &MatchPlayer, target: &Vector3<f32>) -> Vector3<f32> {
        let direction = kicker.position.direction_to(target);
        if direction == Vector3::zeros() {
            kicker.facing
        } else {
            direction
        }
    }

    /// The kicker turns to the kick: the ball is put on the kick line.
    fn place_for_kick(
        field: &mut MatchField,
        kicker: &MatchPlayer,
        direction: &Vector3<f32>,
        config: &MatchConfig,
    ) {
        let origin = kicker.position + direction * config.possession.control_offset;

        field.ball.position = if field.pitch.is_in_goal_mouth(&origin) {
            origin.horizontal()
        } else {
            field.pitch.clamp_inside(&origin, field.ball.radius)
        };

        if let Some(player) = field.player_mut(kicker.id) {
            player.facing = *direction;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::engine::ball::FlightMode;
    use crate::r#match::engine::passing::PassActionBuilder;
    use crate::r#match::engine::player::TeamSide;
    use approx::assert_relative_eq;

    fn setup() -> (MatchField, MatchContext) {
        let config = MatchConfig::default();
        (MatchField::new(&config), MatchContext::new(config))
    }

    fn place(field: &mut MatchField, id: u32, x: f32, y: f32) {
        let player = field.player_mut(id).unwrap();
        player.position = Vector3::new(x, y, 0.0);
        player.velocity = Vector3::zeros();
    }

    #[test]
    fn test_select_receiver_in_sector() {
        let (mut field, _) = setup();
        place(&mut field, 3, 600.0, 400.0);
        place(&mut field, 2, 600.0, 200.0);
        place(&mut field, 4, 900.0, 400.0);
        place(&mut field, 1, 100.0, 325.0);

        let passer = field.player(3).unwrap().clone();
        let up = Vector3::new(0.0, -1.0, 0.0);
        let right = Vector3::new(1.0, 0.0, 0.0);

        assert_eq!(PassingProtocol::select_receiver(&field, &passer, &up, 0.8), Some(2));
        assert_eq!(PassingProtocol::select_receiver(&field, &passer, &right, 0.8), Some(4));
    }

    #[test]
    fn test_select_receiver_falls_back_to_smallest_angle() {
        let (mut field, _) = setup();
        place(&mut field, 3, 600.0, 300.0);
        place(&mut field, 1, 100.0, 300.0);
        place(&mut field, 2, 300.0, 300.0);
        place(&mut field, 4, 900.0, 600.0);

        let passer = field.player(3).unwrap().clone();
        let up_right = Vector3::new(1.0, -1.0, 0.0).normalize();

        // nobody within 0.3 rad, teammate 4 is a right angle away and the others behind
        let selected = PassingProtocol::select_receiver(&field, &passer, &up_right, 0.3);
        assert_eq!(selected, Some(4));
    }

    #[test]
    fn test_non_owner_cannot_kick() {
        let (mut field, mut context) = setup();
        field.ball.set_owner(2);
        let mut events = EventCollection::new();

        let pass = PassActionBuilder::new(PassMode::Short)
            .with_initiator(3)
            .with_receiver(4)
            .build()
            .unwrap();

        let result =
            PassingProtocol::execute(KickAction::Pass(pass), &mut field, &mut context, &mut events);

        assert!(matches!(result, Err(SimulationError::InvalidAction { player_id: 3, .. })));
        assert_eq!(field.ball.current_owner, Some(2));
        assert!(events.is_empty());
    }

    #[test]
    fn test_through_ball_leads_runner() {
        let (mut field, mut context) = setup();
        place(&mut field, 3, 400.0, 325.0);
        place(&mut field, 4, 600.0, 200.0);
        field.player_mut(4).unwrap().velocity = Vector3::new(200.0, 0.0, 0.0);
        field.ball.set_owner(3);

        let pass = PassActionBuilder::new(PassMode::Through)
            .with_initiator(3)
            .with_receiver(4)
            .build()
            .unwrap();
        let mut events = EventCollection::new();
        PassingProtocol::execute(KickAction::Pass(pass), &mut field, &mut context, &mut events).unwrap();

        let lead_point = Vector3::new(600.0 + 200.0 * context.config.passing.through_lead_time, 200.0, 0.0);
        let expected = (lead_point - Vector3::new(400.0, 325.0, 0.0)).normalize();
        let actual = field.ball.velocity.normalize();

        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-4);
        assert_relative_eq!(field.ball.speed(), context.config.passing.through_speed, epsilon = 1e-2);
        assert_eq!(field.ball.flight_mode, FlightMode::Grounded);
        assert!(field.ball.current_owner.is_none());
    }

    #[test]
    fn test_standing_receiver_gets_ball_ahead_along_attack() {
        let (mut field, _) = setup();
        place(&mut field, 4, 600.0, 200.0);
        let receiver = field.player(4).unwrap().clone();

        let target = PassingProtocol::through_target(&field, &PassingConfig::default(), &receiver);
        assert_eq!(target.x, 600.0 + PassingConfig::default().through_run_distance);
        assert_eq!(receiver.team, TeamSide::Red);
    }

    #[test]
    fn test_lob_launch_parameters() {
        let config = PassingConfig::default();
        let launch = PassingProtocol::lob_launch(300.0, &config, 900.0);

        assert_relative_eq!(launch.flight_time, 300.0 / config.lob_reference_speed);
        assert_relative_eq!(launch.horizontal_speed * launch.flight_time, 300.0, epsilon = 1e-3);
        assert_relative_eq!(launch.vertical_velocity, 900.0 * launch.flight_time / 2.0);

        let short = PassingProtocol::lob_launch(10.0, &config, 900.0);
        assert_eq!(short.flight_time, config.lob_min_flight_time);
    }

    #[test]
    fn test_shot_is_seeded() {
        let shoot = || {
            let (mut field, mut context) = setup();
            field.ball.set_owner(4);
            let shot = ShotAction {
                shooter: 4,
                target: field.pitch.goal(crate::r#match::engine::pitch::GoalSide::Right).center(),
                power: 1.0,
                issued_at_tick: 0,
            };
            let mut events = EventCollection::new();
            PassingProtocol::execute(KickAction::Shot(shot), &mut field, &mut context, &mut events)
                .unwrap();
            field.ball.velocity
        };

        let first = shoot();
        assert_eq!(first, shoot());
        assert_relative_eq!(first.horizontal_norm(), PassingConfig::default().shot_max_speed, epsilon = 1e-2);
        assert!(first.x > 0.0);
    }
}
