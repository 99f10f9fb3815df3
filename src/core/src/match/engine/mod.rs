pub mod ball;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod events;
pub mod field;
pub mod input;
pub mod passing;
pub mod physics;
pub mod pitch;
pub mod player;
pub mod possession;
pub mod snapshot;
pub mod state;
pub mod timestep;
pub mod vector;

pub use ball::{Ball, BallEvent, FlightMode};
pub use config::*;
pub use context::*;
pub use engine::*;
pub use error::*;
pub use events::*;
pub use field::*;
pub use input::*;
pub use passing::*;
pub use physics::PhysicsEngine;
pub use pitch::*;
pub use player::{
    ActionIntent, MatchPlayer, MatchTeam, PlayerIntent, PlayerRole, PlayerState, TeamSide,
};
pub use possession::*;
pub use snapshot::*;
pub use state::*;
pub use timestep::*;
pub use vector::VectorExtensions;
