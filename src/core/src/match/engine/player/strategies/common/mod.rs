pub mod ball;
pub mod context;
pub mod lanes;
pub mod opponents;
pub mod teammates;

pub use ball::*;
pub use context::*;
pub use lanes::*;
pub use opponents::*;
pub use teammates::*;
