use thiserror::Error;

/// Failures raised inside a tick. All of them are recovered within the same tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid action by player {player_id}: {reason}")]
    InvalidAction { player_id: u32, reason: &'static str },

    #[error("{entity} left a finite state and was recovered at ({x:.1}, {y:.1})")]
    OutOfBoundsState { entity: String, x: f32, y: f32 },

    #[error("ai evaluation failed for player {player_id}: {reason}")]
    AiEvaluationFailure { player_id: u32, reason: &'static str },
}

impl SimulationError {
    pub fn invalid_action(player_id: u32, reason: &'static str) -> Self {
        SimulationError::InvalidAction { player_id, reason }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read match config {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse match config")]
    Json(#[from] serde_json::Error),

    #[error("invalid match config value {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: &'static str) -> Self {
        ConfigError::Invalid { field, reason }
    }
}
