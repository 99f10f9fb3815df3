use nalgebra::Vector3;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PassMode {
    Short,
    Through,
    Lob,
}

/// A pass waiting to be turned into a ball trajectory. Lives for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassAction {
    pub mode: PassMode,
    pub initiator: u32,
    pub receiver: u32,
    pub charge_power: f32,
    pub issued_at_tick: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotAction {
    pub shooter: u32,
    pub target: Vector3<f32>,
    pub power: f32,
    pub issued_at_tick: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KickAction {
    Pass(PassAction),
    Shot(ShotAction),
}

impl KickAction {
    pub fn initiator(&self) -> u32 {
        match self {
            KickAction::Pass(pass) => pass.initiator,
            KickAction::Shot(shot) => shot.shooter,
        }
    }
}

pub struct PassActionBuilder {
    mode: PassMode,
    initiator: Option<u32>,
    receiver: Option<u32>,
    charge_power: f32,
    issued_at_tick: u64,
}

impl PassActionBuilder {
    pub fn new(mode: PassMode) -> Self {
        PassActionBuilder {
            mode,
            initiator: None,
            receiver: None,
            charge_power: 1.0,
            issued_at_tick: 0,
        }
    }

    pub fn with_initiator(mut self, player_id: u32) -> Self {
        self.initiator = Some(player_id);
        self
    }

    pub fn with_receiver(mut self, player_id: u32) -> Self {
        self.receiver = Some(player_id);
        self
    }

    pub fn with_power(mut self, power: f32) -> Self {
        self.charge_power = power.clamp(0.0, 1.0);
        self
    }

    pub fn at_tick(mut self, tick: u64) -> Self {
        self.issued_at_tick = tick;
        self
    }

    pub fn build(self) -> Option<PassAction> {
        Some(PassAction {
            mode: self.mode,
            initiator: self.initiator?,
            receiver: self.receiver?,
            charge_power: self.charge_power,
            issued_at_tick: self.issued_at_tick,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_both_players() {
        assert!(PassActionBuilder::new(PassMode::Short).with_initiator(1).build().is_none());

        let action = PassActionBuilder::new(PassMode::Lob)
            .with_initiator(1)
            .with_receiver(3)
            .with_power(1.7)
            .at_tick(12)
            .build()
            .unwrap();

        assert_eq!(action.receiver, 3);
        assert_eq!(action.charge_power, 1.0);
        assert_eq!(KickAction::Pass(action).initiator(), 1);
    }
}
