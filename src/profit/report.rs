use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SimError};
use crate::types::{Price, Size};

/// How a sequencer trade earned (or lost) money
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Paired BUY/SELL around a victim
    Sandwich,
    /// Unpaired trade ahead of a same-direction organic trade
    FrontRun,
    /// Unpaired trade ahead of an opposite-direction organic trade
    BadTiming,
}

/// One attributed line of the profit report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitBreakdownItem {
    /// Transaction label, or `"<buy> → <sell>"` for sandwich pairs
    pub label: String,
    pub profit: Decimal,
    pub kind: StrategyKind,
    /// Human-readable description of the strategy
    pub strategy: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub buy_price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sell_price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub amount: Option<Size>,
}

/// Result of submitting a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitReport {
    pub gross_profit: Decimal,
    /// Always zero in this simulation
    pub fees: Decimal,
    pub net_profit: Decimal,
    pub sequencer_tx_count: usize,
    /// Distinct sandwich pair ids seen, validated or not
    pub sandwich_pairs: usize,
    pub profit_breakdown: Vec<ProfitBreakdownItem>,
}

impl Default for ProfitReport {
    fn default() -> Self {
        Self::empty()
    }
}

impl ProfitReport {
    pub fn empty() -> Self {
        Self {
            gross_profit: Decimal::ZERO,
            fees: Decimal::ZERO,
            net_profit: Decimal::ZERO,
            sequencer_tx_count: 0,
            sandwich_pairs: 0,
            profit_breakdown: Vec::new(),
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.net_profit > Decimal::ZERO
    }

    pub fn entries_of(&self, kind: StrategyKind) -> impl Iterator<Item = &ProfitBreakdownItem> {
        self.profit_breakdown
            .iter()
            .filter(move |item| item.kind == kind)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SimError::Serialization(e.to_string()))
    }
}

impl fmt::Display for ProfitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gross profit:      ${}", self.gross_profit.round_dp(2))?;
        writeln!(f, "Fees:              ${}", self.fees.round_dp(2))?;
        writeln!(f, "Net profit:        ${}", self.net_profit.round_dp(2))?;
        writeln!(f, "Sequencer txs:     {}", self.sequencer_tx_count)?;
        writeln!(f, "Sandwich pairs:    {}", self.sandwich_pairs)?;
        if self.profit_breakdown.is_empty() {
            return writeln!(f, "No attributable profit");
        }
        writeln!(f, "Breakdown:")?;
        for item in &self.profit_breakdown {
            writeln!(
                f,
                "  {:<28} {:>12}  {}",
                item.label,
                format!("${}", item.profit.round_dp(2)),
                item.strategy
            )?;
        }
        Ok(())
    }
}
