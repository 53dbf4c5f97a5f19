//! Sequencer sandwich-attack simulation.
//!
//! A random mempool is generated, the caller plays sequencer (reorder,
//! censor, insert own trades, quick sandwiches) and submitting the block
//! yields a profit report attributing gains and losses to the inserted trades.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod market;
pub mod profit;
pub mod sequencer;
pub mod types;

pub use config::{SandwichSpread, SimulationConfig};
pub use crate::core::{PairId, Transaction, TxSide, TxUid};
pub use error::{Result, SimError};
pub use logging::init_logging;
pub use market::{GeneratorConfig, MarketGenerator, TokenConfig};
pub use profit::{compute_profit, ProfitBreakdownItem, ProfitEngine, ProfitReport, StrategyKind};
pub use sequencer::{ManualOrder, SessionStats, SimulationState};
pub use types::{Price, Size, Token};
