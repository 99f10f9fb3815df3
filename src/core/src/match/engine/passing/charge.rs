use crate::r#match::engine::config::PassingConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChargeKind {
    Shot,
    ShortPass,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargeState {
    Idle,
    Charging {
        kind: ChargeKind,
        player_id: u32,
        /// Seconds held so far.
        elapsed: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleasedCharge {
    pub kind: ChargeKind,
    pub player_id: u32,
    pub power: f32,
}

impl ChargeState {
    /// Starts charging. Does nothing when a charge is already running.
    pub fn start(&mut self, kind: ChargeKind, player_id: u32) -> bool {
        if self.is_charging() {
            return false;
        }

        *self = ChargeState::Charging {
            kind,
            player_id,
            elapsed: 0.0,
        };
        true
    }

    pub fn advance(&mut self, dt: f32) {
        if let ChargeState::Charging { elapsed, .. } = self {
            *elapsed += dt;
        }
    }

    pub fn power(&self, config: &PassingConfig) -> f32 {
        match self {
            ChargeState::Idle => 0.0,
            ChargeState::Charging { elapsed, .. } => {
                (elapsed * config.charge_rate).min(config.max_power)
            }
        }
    }

    pub fn release(&mut self, config: &PassingConfig) -> Option<ReleasedCharge> {
        let power = self.power(config);

        match std::mem::replace(self, ChargeState::Idle) {
            ChargeState::Idle => None,
            ChargeState::Charging { kind, player_id, .. } => Some(ReleasedCharge {
                kind,
                player_id,
                power,
            }),
        }
    }

    pub fn cancel(&mut self) {
        *self = ChargeState::Idle;
    }

    pub fn is_charging(&self) -> bool {
        matches!(self, ChargeState::Charging { .. })
    }

    pub fn player_id(&self) -> Option<u32> {
        match self {
            ChargeState::Idle => None,
            ChargeState::Charging { player_id, .. } => Some(*player_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_power_grows_linearly_and_caps() {
        let config = PassingConfig::default();
        let mut charge = ChargeState::Idle;
        assert!(charge.start(ChargeKind::Shot, 4));

        charge.advance(0.25);
        assert_relative_eq!(charge.power(&config), 0.25 * config.charge_rate);

        charge.advance(5.0);
        assert_eq!(charge.power(&config), config.max_power);
    }

    #[test]
    fn test_release_returns_to_idle() {
        let config = PassingConfig::default();
        let mut charge = ChargeState::Idle;
        charge.start(ChargeKind::ShortPass, 2);
        charge.advance(0.5);

        let released = charge.release(&config).unwrap();

        assert_eq!(released.kind, ChargeKind::ShortPass);
        assert_eq!(released.player_id, 2);
        assert_relative_eq!(released.power, 0.9);
        assert_eq!(charge, ChargeState::Idle);
        assert!(charge.release(&config).is_none());
    }

    #[test]
    fn test_second_start_is_ignored() {
        let mut charge = ChargeState::Idle;
        charge.start(ChargeKind::Shot, 1);
        assert!(!charge.start(ChargeKind::ShortPass, 3));
        assert_eq!(charge.player_id(), Some(1));
    }
}
