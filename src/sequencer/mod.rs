pub mod manual;
pub mod ops;
pub mod session;

pub use manual::ManualOrder;
pub use session::{SessionStats, SimulationState};
