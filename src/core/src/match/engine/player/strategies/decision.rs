use crate::r#match::engine::config::MatchConfig;
use crate::r#match::engine::error::SimulationError;
use crate::r#match::engine::field::MatchField;
use crate::r#match::engine::passing::PassMode;
use crate::r#match::engine::player::memory::{AiMemory, AiSlot};
use crate::r#match::engine::player::strategies::common::{StrategyContext, is_lane_clear};
use crate::r#match::engine::player::strategies::roles::RoleStrategy;
use crate::r#match::engine::player::{ActionIntent, MatchPlayer, PlayerIntent, PlayerRole};
use crate::r#match::engine::vector::VectorExtensions;
use log::warn;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Minimum and range of the shot power scale over the shooting distance.
const SHOT_BASE_POWER: f32 = 0.55;
const SHOT_POWER_RANGE: f32 = 0.45;
/// Fraction of the goal width the aim point sits off-centre, away from the keeper.
const SHOT_AIM_OFFSET: f32 = 0.3;
const SHORT_PASS_SOFT_DISTANCE: f32 = 100.0;
const SPACE_CAP: f32 = 200.0;
const SCORE_SCALE: f32 = 100.0;
const CHASERS_PER_TEAM: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AiDecision {
    MoveTo(Vector3<f32>),
    Chase,
    Hold,
    Shoot { target: Vector3<f32>, power: f32 },
    Pass { mode: PassMode, receiver: u32, power: f32 },
    Tackle { carrier_id: u32 },
}

impl AiDecision {
    /// Kicks are emitted once and then the player decides again.
    pub fn is_one_shot(&self) -> bool {
        matches!(self, AiDecision::Shoot { .. } | AiDecision::Pass { .. })
    }
}

pub struct AiDecisionEngine;

impl AiDecisionEngine {
    /// Intents for every player not under human control.
    pub fn evaluate(
        field: &MatchField,
        config: &MatchConfig,
        memory: &mut AiMemory,
        dt: f32,
    ) -> Vec<PlayerIntent> {
        memory.tick(dt);

        let due: Vec<&MatchPlayer> = field
            .players
            .iter()
            .filter(|p| !p.is_human_controlled && memory.slot(p.id).is_due())
            .collect();

        let decide = |player: &&MatchPlayer| (player.id, Self::decide_checked(field, config, player));

        let decisions: Vec<(u32, AiDecision)> = if config.ai.parallel {
            due.par_iter().map(decide).collect()
        } else {
            due.iter().map(decide).collect()
        };

        for (player_id, decision) in decisions {
            let slot = memory.slot_mut(player_id);
            slot.decision = Some(decision);
            slot.cooldown = config.ai.decision_cooldown;
        }

        field
            .players
            .iter()
            .filter(|p| !p.is_human_controlled)
            .map(|player| Self::execute(field, config, player, memory.slot_mut(player.id), dt))
            .collect()
    }

    fn decide_checked(field: &MatchField, config: &MatchConfig, player: &MatchPlayer) -> AiDecision {
        let ctx = StrategyContext::new(field, config, player);

        match Self::validate(player.id, Self::decide(&ctx)) {
            Ok(decision) => decision,
            Err(error) => {
                warn!("{}", error);
                AiDecision::Hold
            }
        }
    }

    pub fn decide(ctx: &StrategyContext<'_>) -> AiDecision {
        let strategy = RoleStrategy::of(ctx.player.role);
        let ball = ctx.ball();

        if ball.owned_by_self() {
            return Self::evaluate_shot(ctx, strategy)
                .or_else(|| Self::evaluate_pass(ctx))
                .unwrap_or_else(|| AiDecision::MoveTo(Self::dribble_target(ctx)));
        }

        if !ball.is_owned() {
            if let Some(point) = (strategy.intercept_point)(ctx) {
                return AiDecision::MoveTo(point);
            }

            if Self::is_reachable(ctx, strategy) {
                return AiDecision::Chase;
            }

            return AiDecision::MoveTo((strategy.support_position)(ctx));
        }

        if ball.team_has_ball() {
            return AiDecision::MoveTo((strategy.support_position)(ctx));
        }

        if let Some(carrier) = ball.carrier() {
            if strategy.may_tackle
                && ctx.player.can_tackle()
                && ctx.player.distance_to(&carrier.position) <= ctx.config.tackling.radius
            {
                return AiDecision::Tackle {
                    carrier_id: carrier.id,
                };
            }
        }

        AiDecision::MoveTo((strategy.defensive_position)(ctx))
    }

    /// Shoots when in range, facing the goal roughly head on, with no outfield player in the way.
    pub fn evaluate_shot(ctx: &StrategyContext<'_>, strategy: &RoleStrategy) -> Option<AiDecision> {
        let ai = &ctx.config.ai;
        let range = ai.shot_distance * strategy.shot_range_factor;
        if range <= 0.0 {
            return None;
        }

        let goal = ctx.opponent_goal();
        let center = goal.center();
        let position = ctx.player.position;
        let distance = position.horizontal_distance(&center);
        if distance > range {
            return None;
        }

        let axis = Vector3::new(ctx.attacking_direction(), 0.0, 0.0);
        if axis.angle_to(&(center - position)) > ai.shot_angle_max {
            return None;
        }

        let goal_width = goal.bottom_post.y - goal.top_post.y;
        let away_from_keeper = match ctx.opponents().goalkeeper() {
            Some(keeper) if keeper.position.y > center.y => -1.0,
            _ => 1.0,
        };

        let target = Vector3::new(
            goal.line_x + ctx.attacking_direction() * ctx.config.pitch.goal_depth / 2.0,
            center.y + away_from_keeper * SHOT_AIM_OFFSET * goal_width,
            0.0,
        );

        if !is_lane_clear(&position, &target, ctx.opponents().outfield(), ai.lane_width) {
            return None;
        }

        let power = (SHOT_BASE_POWER + SHOT_POWER_RANGE * distance / ai.shot_distance).min(1.0);

        Some(AiDecision::Shoot { target, power })
    }

    /// Best outfield teammate by progress, space and a clear lane.
    pub fn evaluate_pass(ctx: &StrategyContext<'_>) -> Option<AiDecision> {
        let ai = &ctx.config.ai;
        let position = ctx.player.position;
        let own_progress = ctx.progress(&position);
        let under_pressure = ctx.opponents().exists(ai.pressure_distance);

        let (teammate, gain, space, lane_clear, _) = ctx
            .teammates()
            .outfield()
            .filter_map(|teammate| {
                let gain = ctx.progress(&teammate.position) - own_progress;
                let space = ctx.opponents().distance_to_nearest(&teammate.position);

                let qualifies = gain >= ai.better_position_margin
                    || (under_pressure && space > ai.open_space && gain > -ai.better_position_margin);
                if !qualifies {
                    return None;
                }

                let lane_clear = is_lane_clear(
                    &position,
                    &teammate.position,
                    ctx.opponents().all(),
                    ai.lane_width,
                );

                let score = gain / SCORE_SCALE
                    + space.min(SPACE_CAP) / SCORE_SCALE
                    + if lane_clear { 1.0 } else { 0.0 };

                Some((teammate, gain, space, lane_clear, score))
            })
            .max_by(|a, b| a.4.total_cmp(&b.4).then(b.0.id.cmp(&a.0.id)))?;

        let distance = position.horizontal_distance(&teammate.position);
        let running_forward = teammate.speed() > ai.through_run_speed
            && teammate.velocity.x * ctx.attacking_direction() > 0.0
            && gain > 0.0
            && space > ai.open_space;

        let (mode, power) = if running_forward {
            (PassMode::Through, 1.0)
        } else if !lane_clear || distance > ai.short_pass_reach {
            (PassMode::Lob, 1.0)
        } else {
            (
                PassMode::Short,
                ((distance - SHORT_PASS_SOFT_DISTANCE) / (ai.short_pass_reach - SHORT_PASS_SOFT_DISTANCE))
                    .clamp(0.0, 1.0),
            )
        };

        Some(AiDecision::Pass {
            mode,
            receiver: teammate.id,
            power,
        })
    }

    /// Carries the ball towards goal, bending away from a pressing opponent.
    pub fn dribble_target(ctx: &StrategyContext<'_>) -> Vector3<f32> {
        let ai = &ctx.config.ai;
        let position = ctx.player.position;
        let forward = position.direction_to(&ctx.opponent_goal().center());

        let direction = match ctx.opponents().nearest_to(&position) {
            Some(opponent) if opponent.distance_to(&position) < ai.pressure_distance => {
                let away = opponent.position.direction_to(&position);
                let blended = (forward + away).normalize_or_zero();
                if blended == Vector3::zeros() { forward } else { blended }
            }
            _ => forward,
        };

        ctx.on_pitch(position + direction * ai.dribble_distance)
    }

    pub fn is_reachable(ctx: &StrategyContext<'_>, strategy: &RoleStrategy) -> bool {
        if strategy.role == PlayerRole::Goalkeeper {
            return (strategy.should_chase)(ctx);
        }

        let ai = &ctx.config.ai;
        let predicted = ctx.ball().predicted_position();
        let distance = ctx.player.distance_to(&predicted);

        distance < ai.close_chase_distance
            || (distance < ai.chase_distance
                && (strategy.should_chase)(ctx)
                && ctx.teammates().is_among_closest_to(&predicted, CHASERS_PER_TEAM))
    }

    pub fn validate(player_id: u32, decision: AiDecision) -> Result<AiDecision, SimulationError> {
        let finite = match decision {
            AiDecision::MoveTo(target) => target.is_finite_vector(),
            AiDecision::Shoot { target, power } => target.is_finite_vector() && power.is_finite(),
            AiDecision::Pass { power, .. } => power.is_finite(),
            AiDecision::Chase | AiDecision::Hold | AiDecision::Tackle { .. } => true,
        };

        if finite {
            Ok(decision)
        } else {
            Err(SimulationError::AiEvaluationFailure {
                player_id,
                reason: "non-finite decision target",
            })
        }
    }

    /// Turns the stored decision into this tick's intent and smooths the steering.
    pub fn execute(
        field: &MatchField,
        config: &MatchConfig,
        player: &MatchPlayer,
        slot: &mut AiSlot,
        dt: f32,
    ) -> PlayerIntent {
        let decision = slot.decision.unwrap_or(AiDecision::Hold);

        let (target, action) = match decision {
            AiDecision::MoveTo(target) => (Some(target), None),
            AiDecision::Chase => {
                let ctx = StrategyContext::new(field, config, player);
                (Some(ctx.ball().predicted_position()), None)
            }
            AiDecision::Hold => (None, None),
            AiDecision::Shoot { target, power } => (None, Some(ActionIntent::Shoot { target, power })),
            AiDecision::Pass {
                mode,
                receiver,
                power,
            } => (None, Some(ActionIntent::Pass { mode, receiver, power })),
            AiDecision::Tackle { carrier_id } => (
                field.player(carrier_id).map(|carrier| carrier.position),
                Some(ActionIntent::Tackle { carrier_id }),
            ),
        };

        if decision.is_one_shot() {
            slot.decision = None;
        }

        let desired = target
            .filter(|target| player.distance_to(target) > config.ai.arrive_distance)
            .map(|target| player.position.direction_to(&target));

        let alpha = (dt / config.ai.smoothing).min(1.0);
        slot.steering = match desired {
            Some(direction) => slot.steering + (direction - slot.steering) * alpha,
            None => Vector3::zeros(),
        };

        let steering = slot.steering.normalize_or_zero();
        let movement = (steering != Vector3::zeros()).then_some(steering);

        PlayerIntent {
            player_id: player.id,
            movement,
            action,
        }
    }
}
