pub mod events;
pub mod intent;
pub mod memory;
pub mod player;
pub mod state;
pub mod strategies;
pub mod team;

pub use intent::*;
pub use memory::{AiMemory, AiSlot};
pub use player::*;
pub use state::*;
pub use team::*;
