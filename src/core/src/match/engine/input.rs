use crate::r#match::engine::config::MatchConfig;
use crate::r#match::engine::context::MatchContext;
use crate::r#match::engine::error::SimulationError;
use crate::r#match::engine::events::EventCollection;
use crate::r#match::engine::field::MatchField;
use crate::r#match::engine::passing::{
    ChargeKind, KickAction, PassActionBuilder, PassMode, PassingProtocol, ReleasedCharge, ShotAction,
};
use crate::r#match::engine::player::events::PlayerEvent;
use crate::r#match::engine::player::{ActionIntent, MatchPlayer, PlayerIntent};
use crate::r#match::engine::snapshot::MatchSnapshot;
use crate::r#match::engine::vector::VectorExtensions;
use log::debug;
use nalgebra::Vector3;

/// Fraction of the goal width a human shot is steered off-centre by the held direction.
const SHOT_STEER: f32 = 0.35;

/// Discrete intents read from the input device for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub move_direction: Option<Vector3<f32>>,
    pub charge_start: bool,
    pub charge_release: bool,
    pub pass_trigger: Option<PassMode>,
    pub switch_player: bool,
    pub reset_kickoff: bool,
    pub reset_match: bool,
    pub celebrate: bool,
    pub quit: bool,
}

impl TickInput {
    pub fn moving(direction: Vector3<f32>) -> Self {
        TickInput {
            move_direction: Some(direction),
            ..TickInput::default()
        }
    }
}

/// Adapter seam for whatever produces the human team's input.
pub trait IntentSource {
    fn next_input(&mut self, snapshot: &MatchSnapshot) -> TickInput;
}

/// Never touches the controls.
pub struct IdleInput;

impl IntentSource for IdleInput {
    fn next_input(&mut self, _: &MatchSnapshot) -> TickInput {
        TickInput::default()
    }
}

/// Plays the selected Red player: runs at the ball, carries it towards goal
/// and shoots with a short charge once in range.
pub struct AutopilotInput {
    goal: Vector3<f32>,
    shot_range: f32,
    charge_ticks: u32,
    charging_for: Option<u32>,
}

impl AutopilotInput {
    const CHARGE_TICKS: u32 = 20;

    pub fn new(config: &MatchConfig) -> Self {
        AutopilotInput {
            goal: Vector3::new(config.pitch.width, config.pitch.height / 2.0, 0.0),
            shot_range: config.ai.shot_distance,
            charge_ticks: Self::CHARGE_TICKS,
            charging_for: None,
        }
    }
}

impl IntentSource for AutopilotInput {
    fn next_input(&mut self, snapshot: &MatchSnapshot) -> TickInput {
        let Some(player) = snapshot.selected_player() else {
            return TickInput::default();
        };

        let owns_ball = snapshot.ball.owner == Some(player.id);

        if let Some(ticks) = self.charging_for.as_mut() {
            *ticks += 1;
            if *ticks >= self.charge_ticks || !owns_ball {
                self.charging_for = None;
                return TickInput {
                    charge_release: true,
                    ..TickInput::moving(player.position.direction_to(&self.goal))
                };
            }
            return TickInput::moving(player.position.direction_to(&self.goal));
        }

        if !owns_ball {
            return TickInput::moving(player.position.direction_to(&snapshot.ball.position));
        }

        let mut input = TickInput::moving(player.position.direction_to(&self.goal));
        if player.position.horizontal_distance(&self.goal) < self.shot_range {
            self.charging_for = Some(0);
            input.charge_start = true;
        }

        input
    }
}

/// Turns the human player's input into an intent, charges and kicks.
pub struct HumanInputProcessor;

impl HumanInputProcessor {
    pub fn process(
        input: &TickInput,
        field: &mut MatchField,
        context: &mut MatchContext,
        kicks: &mut Vec<KickAction>,
        events: &mut EventCollection,
    ) -> Option<PlayerIntent> {
        if input.switch_player {
            if let Some(player_id) = field.cycle_selection() {
                debug!("human control switched to {}", player_id);
                context.charge.cancel();
                context.ai_memory.forget(player_id);
            }
        }

        let player = field
            .selected_player_id()
            .and_then(|id| field.player(id))
            .cloned()?;

        let movement = input
            .move_direction
            .map(|direction| direction.horizontal().normalize_or_zero())
            .filter(|direction| *direction != Vector3::zeros());
        let aim = movement.unwrap_or(player.facing);

        let mut intent = PlayerIntent {
            player_id: player.id,
            movement,
            action: None,
        };

        if input.celebrate {
            events.add_player_event(PlayerEvent::Celebrate(player.id));
        }

        if input.charge_start {
            Self::start_charge(ChargeKind::Shot, &player, field, context, events);
        }

        match input.pass_trigger {
            Some(PassMode::Short) => {
                Self::start_charge(ChargeKind::ShortPass, &player, field, context, events)
            }
            Some(mode) => {
                let receiver = PassingProtocol::select_receiver(
                    field,
                    &player,
                    &aim,
                    context.config.passing.short_sector_half_angle,
                );

                let pass = receiver.and_then(|receiver| {
                    PassActionBuilder::new(mode)
                        .with_initiator(player.id)
                        .with_receiver(receiver)
                        .at_tick(context.tick)
                        .build()
                });

                match pass {
                    Some(pass) => kicks.push(KickAction::Pass(pass)),
                    None => events.add_player_event(PlayerEvent::InvalidAction(
                        SimulationError::invalid_action(player.id, "no teammate to pass to"),
                    )),
                }
            }
            None => {}
        }

        if input.charge_release {
            if let Some(released) = context.charge.release(&context.config.passing) {
                if let Some(kick) = Self::released_kick(&released, &player, &aim, field, context) {
                    kicks.push(kick);
                }
            }
        }

        if !kicks.iter().any(|kick| kick.initiator() == player.id) {
            intent.action = Self::auto_tackle(&player, field, context);
        }

        Some(intent)
    }

    fn start_charge(
        kind: ChargeKind,
        player: &MatchPlayer,
        field: &MatchField,
        context: &mut MatchContext,
        events: &mut EventCollection,
    ) {
        if field.ball.current_owner != Some(player.id) {
            events.add_player_event(PlayerEvent::InvalidAction(SimulationError::invalid_action(
                player.id,
                "charge started without the ball",
            )));
            return;
        }

        if context.charge.start(kind, player.id) {
            debug!("player {} charging {:?}", player.id, kind);
        }
    }

    fn released_kick(
        released: &ReleasedCharge,
        player: &MatchPlayer,
        aim: &Vector3<f32>,
        field: &MatchField,
        context: &MatchContext,
    ) -> Option<KickAction> {
        if released.player_id != player.id {
            return None;
        }

        match released.kind {
            ChargeKind::Shot => Some(KickAction::Shot(ShotAction {
                shooter: player.id,
                target: Self::shot_target(field, player, aim),
                power: released.power,
                issued_at_tick: context.tick,
            })),
            ChargeKind::ShortPass => {
                let receiver = PassingProtocol::select_receiver(
                    field,
                    player,
                    aim,
                    context.config.passing.short_sector_half_angle,
                )?;

                PassActionBuilder::new(PassMode::Short)
                    .with_initiator(player.id)
                    .with_receiver(receiver)
                    .with_power(released.power)
                    .at_tick(context.tick)
                    .build()
                    .map(KickAction::Pass)
            }
        }
    }

    /// Centre of the opponent goal, nudged up or down by the held direction.
    pub fn shot_target(field: &MatchField, player: &MatchPlayer, aim: &Vector3<f32>) -> Vector3<f32> {
        let goal = field.pitch.opponent_goal(player.team);
        let center = goal.center();
        let goal_width = goal.bottom_post.y - goal.top_post.y;

        Vector3::new(
            goal.line_x + player.team.attacking_direction() * field.pitch.goal_depth / 2.0,
            center.y + aim.y.clamp(-1.0, 1.0) * SHOT_STEER * goal_width,
            0.0,
        )
    }

    /// The human player tackles an opposing carrier automatically once in reach.
    fn auto_tackle(player: &MatchPlayer, field: &MatchField, context: &MatchContext) -> Option<ActionIntent> {
        let carrier = field.ball_owner()?;

        (carrier.team != player.team
            && player.can_tackle()
            && player.distance_to(&carrier.position) <= context.config.tackling.radius)
            .then_some(ActionIntent::Tackle {
                carrier_id: carrier.id,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::engine::events::Event;

    fn setup() -> (MatchField, MatchContext) {
        let config = MatchConfig::default();
        (MatchField::new(&config), MatchContext::new(config))
    }

    fn selected(field: &MatchField) -> u32 {
        field.selected_player_id().unwrap()
    }

    #[test]
    fn test_movement_is_normalized() {
        let (mut field, mut context) = setup();
        let input = TickInput::moving(Vector3::new(3.0, 4.0, 0.0));

        let intent = HumanInputProcessor::process(
            &input,
            &mut field,
            &mut context,
            &mut Vec::new(),
            &mut EventCollection::new(),
        )
        .unwrap();

        let movement = intent.movement.unwrap();
        assert!((movement.norm() - 1.0).abs() < 1e-5);
        assert!((movement.x - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_charge_and_release_builds_shot() {
        let (mut field, mut context) = setup();
        let id = selected(&field);
        field.ball.set_owner(id);

        let start = TickInput {
            charge_start: true,
            ..TickInput::default()
        };
        let mut kicks = Vec::new();
        let mut events = EventCollection::new();
        HumanInputProcessor::process(&start, &mut field, &mut context, &mut kicks, &mut events);
        assert!(context.charge.is_charging());

        context.charge.advance(0.25);

        let release = TickInput {
            charge_release: true,
            ..TickInput::default()
        };
        HumanInputProcessor::process(&release, &mut field, &mut context, &mut kicks, &mut events);

        assert!(!context.charge.is_charging());
        match kicks.as_slice() {
            [KickAction::Shot(shot)] => {
                assert_eq!(shot.shooter, id);
                assert!((shot.power - 0.45).abs() < 1e-5);
                assert!(shot.target.x > field.pitch.width);
            }
            other => panic!("expected one shot, got {:?}", other),
        }
        assert!(events.is_empty());
    }

    #[test]
    fn test_charge_without_ball_is_invalid() {
        let (mut field, mut context) = setup();
        let input = TickInput {
            pass_trigger: Some(PassMode::Short),
            ..TickInput::default()
        };
        let mut events = EventCollection::new();

        HumanInputProcessor::process(&input, &mut field, &mut context, &mut Vec::new(), &mut events);

        assert!(!context.charge.is_charging());
        assert!(matches!(
            events.iter().next(),
            Some(Event::PlayerEvent(PlayerEvent::InvalidAction(_)))
        ));
    }

    #[test]
    fn test_through_pass_is_immediate() {
        let (mut field, mut context) = setup();
        let id = selected(&field);
        field.ball.set_owner(id);
        let input = TickInput {
            pass_trigger: Some(PassMode::Through),
            move_direction: Some(Vector3::new(-1.0, 0.0, 0.0)),
            ..TickInput::default()
        };
        let mut kicks = Vec::new();

        HumanInputProcessor::process(&input, &mut field, &mut context, &mut kicks, &mut EventCollection::new());

        assert!(!context.charge.is_charging());
        assert!(matches!(
            kicks.as_slice(),
            [KickAction::Pass(pass)] if pass.mode == PassMode::Through && pass.initiator == id
        ));
    }

    #[test]
    fn test_switch_cycles_selection_and_cancels_charge() {
        let (mut field, mut context) = setup();
        let before = selected(&field);
        field.ball.set_owner(before);
        context.charge.start(ChargeKind::Shot, before);

        let input = TickInput {
            switch_player: true,
            ..TickInput::default()
        };
        let intent = HumanInputProcessor::process(
            &input,
            &mut field,
            &mut context,
            &mut Vec::new(),
            &mut EventCollection::new(),
        )
        .unwrap();

        assert_ne!(intent.player_id, before);
        assert_eq!(selected(&field), intent.player_id);
        assert!(!context.charge.is_charging());
    }

    #[test]
    fn test_auto_tackle_on_nearby_carrier() {
        let (mut field, mut context) = setup();
        let id = selected(&field);
        let position = field.player(id).unwrap().position;
        field.player_mut(8).unwrap().position = position + Vector3::new(20.0, 0.0, 0.0);
        field.ball.set_owner(8);

        let intent = HumanInputProcessor::process(
            &TickInput::default(),
            &mut field,
            &mut context,
            &mut Vec::new(),
            &mut EventCollection::new(),
        )
        .unwrap();

        assert_eq!(intent.action, Some(ActionIntent::Tackle { carrier_id: 8 }));
    }

    #[test]
    fn test_autopilot_charges_near_goal() {
        let config = MatchConfig::default();
        let mut field = MatchField::new(&config);
        let id = selected(&field);
        field.player_mut(id).unwrap().position = Vector3::new(1000.0, 325.0, 0.0);
        field.ball.set_owner(id);
        let context = MatchContext::new(config.clone());
        let mut autopilot = AutopilotInput::new(&config);

        let first = autopilot.next_input(&MatchSnapshot::capture(&field, &context));
        assert!(first.charge_start);

        let released = (0..AutopilotInput::CHARGE_TICKS)
            .map(|_| autopilot.next_input(&MatchSnapshot::capture(&field, &context)))
            .filter(|input| input.charge_release)
            .count();
        assert_eq!(released, 1);
    }
}
