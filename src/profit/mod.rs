pub mod engine;
pub mod report;

pub use engine::{compute_profit, ProfitEngine};
pub use report::{ProfitBreakdownItem, ProfitReport, StrategyKind};
