use crate::r#match::engine::passing::PassMode;
use nalgebra::Vector3;

/// What one player wants to do this tick, from either the human or the AI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerIntent {
    pub player_id: u32,
    /// Unit direction, none to brake.
    pub movement: Option<Vector3<f32>>,
    pub action: Option<ActionIntent>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionIntent {
    Shoot { target: Vector3<f32>, power: f32 },
    Pass { mode: PassMode, receiver: u32, power: f32 },
    Tackle { carrier_id: u32 },
}

impl PlayerIntent {
    pub fn idle(player_id: u32) -> Self {
        PlayerIntent {
            player_id,
            movement: None,
            action: None,
        }
    }

    pub fn moving(player_id: u32, direction: Vector3<f32>) -> Self {
        PlayerIntent {
            player_id,
            movement: Some(direction),
            action: None,
        }
    }

    pub fn with_action(mut self, action: ActionIntent) -> Self {
        self.action = Some(action);
        self
    }
}
