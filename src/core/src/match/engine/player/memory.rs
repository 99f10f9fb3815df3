use crate::r#match::engine::player::strategies::AiDecision;
use nalgebra::Vector3;
use std::collections::BTreeMap;

/// Per-player AI slot: the current plan and the smoothed steering that follows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiSlot {
    pub cooldown: f32,
    pub decision: Option<AiDecision>,
    pub steering: Vector3<f32>,
}

impl Default for AiSlot {
    fn default() -> Self {
        AiSlot {
            cooldown: 0.0,
            decision: None,
            steering: Vector3::zeros(),
        }
    }
}

impl AiSlot {
    pub fn is_due(&self) -> bool {
        self.cooldown <= 0.0 || self.decision.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AiMemory {
    slots: BTreeMap<u32, AiSlot>,
}

impl AiMemory {
    pub fn new() -> Self {
        AiMemory::default()
    }

    pub fn slot(&self, player_id: u32) -> AiSlot {
        self.slots.get(&player_id).copied().unwrap_or_default()
    }

    pub fn slot_mut(&mut self, player_id: u32) -> &mut AiSlot {
        self.slots.entry(player_id).or_default()
    }

    pub fn tick(&mut self, dt: f32) {
        for slot in self.slots.values_mut() {
            slot.cooldown = (slot.cooldown - dt).max(0.0);
        }
    }

    /// Drops the slot of a player now under human control.
    pub fn forget(&mut self, player_id: u32) {
        self.slots.remove(&player_id);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
