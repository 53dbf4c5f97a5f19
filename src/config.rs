use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::market::GeneratorConfig;

/// Flat per-token spread constants of the simulation.
///
/// These are balance constants, not derived from market depth, and apply
/// unchanged to every token regardless of its price scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandwichSpread {
    /// Quick-sandwich front-run BUY is placed this far below the victim price
    pub front_run_discount: Decimal,
    /// Quick-sandwich back-run SELL is placed this far above the victim price
    pub back_run_premium: Decimal,
    /// Per-token gain (or loss) of an unpaired sequencer trade ahead of an organic one
    pub front_run_edge: Decimal,
}

pub const DEFAULT_FRONT_RUN_DISCOUNT: Decimal = Decimal::ONE;
pub const DEFAULT_BACK_RUN_PREMIUM: Decimal = Decimal::TWO;
pub const DEFAULT_FRONT_RUN_EDGE: Decimal = Decimal::TWO;

impl Default for SandwichSpread {
    fn default() -> Self {
        Self {
            front_run_discount: DEFAULT_FRONT_RUN_DISCOUNT,
            back_run_premium: DEFAULT_BACK_RUN_PREMIUM,
            front_run_edge: DEFAULT_FRONT_RUN_EDGE,
        }
    }
}

impl SandwichSpread {
    pub fn validate(&self) -> Result<()> {
        if self.front_run_discount < Decimal::ZERO
            || self.back_run_premium < Decimal::ZERO
            || self.front_run_edge < Decimal::ZERO
        {
            return Err(SimError::InvalidConfig(
                "spread constants must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level configuration of a simulation session
#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    pub generator: GeneratorConfig,
    pub spread: SandwichSpread,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        self.spread.validate()?;
        // quick-sandwich front-run legs must keep a positive price
        for token in &self.generator.tokens {
            if token.min_price() - self.spread.front_run_discount <= Decimal::ZERO {
                return Err(SimError::InvalidConfig(format!(
                    "{}: front-run discount {} reaches a non-positive price",
                    token.symbol, self.spread.front_run_discount
                )));
            }
        }
        Ok(())
    }
}
