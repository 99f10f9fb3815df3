use crate::r#match::engine::ball::BallEvent;
use crate::r#match::engine::config::MatchConfig;
use crate::r#match::engine::context::MatchContext;
use crate::r#match::engine::events::EventCollection;
use crate::r#match::engine::field::MatchField;
use crate::r#match::engine::player::MatchPlayer;
use crate::r#match::engine::player::events::PlayerEvent;
use crate::r#match::engine::vector::VectorExtensions;
use log::debug;
use rand::Rng;

const MIN_TACKLE_CHANCE: f32 = 0.05;
const MAX_TACKLE_CHANCE: f32 = 0.95;
/// Facing alignment beyond which a tackle counts as coming from the front or from behind.
const APPROACH_ALIGNMENT: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TackleAttempt {
    pub tackler_id: u32,
    pub carrier_id: u32,
}

pub struct PossessionResolver;

impl PossessionResolver {
    pub fn resolve(
        field: &mut MatchField,
        context: &mut MatchContext,
        attempts: &[TackleAttempt],
        events: &mut EventCollection,
    ) {
        Self::resolve_tackles(field, context, attempts, events);
        Self::resolve_acquisition(field, &context.config, events);
    }

    pub fn tackle_success_probability(
        tackler: &MatchPlayer,
        carrier: &MatchPlayer,
        config: &MatchConfig,
    ) -> f32 {
        let tackling = &config.tackling;
        let mut chance = tackling.base_success;

        let to_tackler = carrier.position.direction_to(&tackler.position);
        let alignment = carrier.facing.dot(&to_tackler);
        if alignment > APPROACH_ALIGNMENT {
            chance += tackling.front_bonus;
        } else if alignment < -APPROACH_ALIGNMENT {
            chance -= tackling.behind_penalty;
        }

        if carrier.speed() > carrier.max_speed(&config.player) * tackling.fast_carrier_ratio {
            chance -= tackling.fast_carrier_penalty;
        }

        let distance = tackler.distance_to(&carrier.position);
        let closeness = (1.0 - distance / tackling.radius).clamp(0.0, 1.0);
        chance += tackling.distance_bonus * closeness;

        chance.clamp(MIN_TACKLE_CHANCE, MAX_TACKLE_CHANCE)
    }

    /// Attempts are processed in tackler id order; the first success ends the round.
    pub fn resolve_tackles(
        field: &mut MatchField,
        context: &mut MatchContext,
        attempts: &[TackleAttempt],
        events: &mut EventCollection,
    ) {
        if field.ball.is_aerial() {
            return;
        }

        let mut attempts = attempts.to_vec();
        attempts.sort_by_key(|a| a.tackler_id);
        attempts.dedup_by_key(|a| a.tackler_id);

        for attempt in attempts {
            if field.ball.current_owner != Some(attempt.carrier_id) {
                continue;
            }

            let (Some(tackler), Some(carrier)) = (
                field.player(attempt.tackler_id).cloned(),
                field.player(attempt.carrier_id).cloned(),
            ) else {
                continue;
            };

            if tackler.team == carrier.team
                || !tackler.can_tackle()
                || tackler.distance_to(&carrier.position) > context.config.tackling.radius
            {
                continue;
            }

            let chance = Self::tackle_success_probability(&tackler, &carrier, &context.config);
            let success = context.rng.gen_range(0.0..1.0) < chance;
            let tackling = context.config.tackling.clone();

            if let Some(player) = field.player_mut(tackler.id) {
                player.start_tackle(tackling.duration, tackling.cooldown);
                if !success {
                    player.stun(tackling.tackler_stun);
                }
            }

            debug!(
                "tackle {} on {} chance {:.2}: {}",
                tackler.id,
                carrier.id,
                chance,
                if success { "won" } else { "missed" }
            );

            events.add_player_event(PlayerEvent::Tackle {
                tackler_id: tackler.id,
                carrier_id: carrier.id,
                success,
            });

            if success {
                if let Some(player) = field.player_mut(carrier.id) {
                    player.stun(tackling.carrier_stun);
                }

                // knocked loose towards the tackler, the carrier sits out the grace
                let push = field.ball.position.direction_to(&tackler.position) * tackling.ball_push;
                field
                    .ball
                    .kick(push, &context.config.ball, tackling.loose_ball_grace);
                events.add_ball_event(BallEvent::Released(carrier.id));
                break;
            }
        }
    }

    pub fn resolve_acquisition(
        field: &mut MatchField,
        config: &MatchConfig,
        events: &mut EventCollection,
    ) {
        // a lob can only be taken once it drops below head height
        if !field.ball.is_interceptable(config.ball.interception_height) {
            return;
        }

        let possession = &config.possession;

        if let Some(owner_id) = field.ball.current_owner {
            let keeps = field.player(owner_id).is_some_and(|owner| {
                owner.distance_to(&field.ball.position)
                    <= possession.pickup_radius * possession.retain_factor
            });

            if !keeps {
                field.ball.current_owner = None;
                field.ball.previous_owner = Some(owner_id);
                events.add_ball_event(BallEvent::Released(owner_id));
            }
            return;
        }

        if field.ball.speed() >= possession.pickup_speed {
            return;
        }

        let ball = &field.ball;
        let locked_out = ball.previous_owner.filter(|_| ball.kick_grace > 0.0);

        let winner = field
            .players
            .iter()
            .filter(|p| !p.is_stunned() && !p.is_celebrating())
            .filter(|p| Some(p.id) != locked_out)
            .map(|p| (p.distance_to(&ball.position), p.id))
            .filter(|(distance, _)| *distance <= possession.pickup_radius)
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(_, id)| id);

        if let Some(player_id) = winner {
            field.ball.set_owner(player_id);
            events.add_ball_event(BallEvent::Claimed(player_id));
        }
    }
}
