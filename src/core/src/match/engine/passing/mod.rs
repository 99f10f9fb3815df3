pub mod action;
pub mod charge;
pub mod protocol;

pub use action::*;
pub use charge::*;
pub use protocol::*;
