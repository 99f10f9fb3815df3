pub mod common;
pub mod decision;
pub mod defenders;
pub mod forwarders;
pub mod goalkeepers;
pub mod midfielders;
pub mod roles;

pub use common::StrategyContext;
pub use decision::{AiDecision, AiDecisionEngine};
pub use roles::RoleStrategy;
