use log::debug;
use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::config::SandwichSpread;
use crate::core::{PairId, Transaction, TxSide};
use crate::profit::report::{ProfitBreakdownItem, ProfitReport, StrategyKind};

/// Legs collected under one sandwich pair id, in first-seen order
type PairGroup<'a> = (&'a PairId, SmallVec<[&'a Transaction; 2]>);

/// Attributes gains and losses of a submitted block to the sequencer's own trades.
///
/// The engine is a pure function over the final ordering; it never mutates the
/// queue and never errors. Degenerate inputs (missing legs, no eligible
/// successor) simply contribute nothing.
#[derive(Debug, Clone, Default)]
pub struct ProfitEngine {
    spread: SandwichSpread,
}

impl ProfitEngine {
    pub fn new(spread: SandwichSpread) -> Self {
        Self { spread }
    }

    pub fn compute(&self, queue: &[Transaction]) -> ProfitReport {
        let (pairs, individuals) = partition_sequencer_txs(queue);

        let mut breakdown = Vec::new();
        breakdown.extend(pairs.iter().filter_map(|(_, legs)| evaluate_pair(legs)));
        breakdown.extend(
            individuals
                .iter()
                .filter_map(|&index| self.evaluate_individual(queue, index)),
        );

        let gross_profit: Decimal = breakdown.iter().map(|item| item.profit).sum();
        let fees = Decimal::ZERO;

        ProfitReport {
            gross_profit,
            fees,
            net_profit: gross_profit - fees,
            sequencer_tx_count: queue.iter().filter(|tx| tx.is_sequencer_tx()).count(),
            sandwich_pairs: pairs.len(),
            profit_breakdown: breakdown,
        }
    }

    /// Unpaired sequencer trade at `index`, judged against its successor in final order
    fn evaluate_individual(
        &self,
        queue: &[Transaction],
        index: usize,
    ) -> Option<ProfitBreakdownItem> {
        let tx = &queue[index];
        let next = queue.get(index + 1).filter(|next| next.is_organic())?;

        let edge = self.spread.front_run_edge;
        let edge_text = edge.normalize();
        let (kind, sign, strategy) = match (tx.side(), next.side()) {
            (TxSide::Buy, TxSide::Buy) => (
                StrategyKind::FrontRun,
                Decimal::ONE,
                format!(
                    "Front-run BUY: Bought before {}, gained ${}/token",
                    next.tx_id(),
                    edge_text
                ),
            ),
            (TxSide::Sell, TxSide::Sell) => (
                StrategyKind::FrontRun,
                Decimal::ONE,
                format!(
                    "Front-run SELL: Sold before {}, gained ${}/token",
                    next.tx_id(),
                    edge_text
                ),
            ),
            (TxSide::Buy, TxSide::Sell) => (
                StrategyKind::BadTiming,
                Decimal::NEGATIVE_ONE,
                format!(
                    "Bad timing: Bought before {} SELL, lost ${}/token",
                    next.tx_id(),
                    edge_text
                ),
            ),
            (TxSide::Sell, TxSide::Buy) => (
                StrategyKind::BadTiming,
                Decimal::NEGATIVE_ONE,
                format!(
                    "Bad timing: Sold before {} BUY, lost ${}/token",
                    next.tx_id(),
                    edge_text
                ),
            ),
        };

        Some(ProfitBreakdownItem {
            label: tx.tx_id().to_string(),
            profit: tx.amount() * (sign * edge),
            kind,
            strategy,
            buy_price: None,
            sell_price: None,
            amount: None,
        })
    }
}

/// Convenience wrapper using the default spread constants
pub fn compute_profit(queue: &[Transaction]) -> ProfitReport {
    ProfitEngine::default().compute(queue)
}

/// Split sequencer transactions into sandwich groups (by pair id, first-seen
/// order) and the queue positions of unpaired ones.
fn partition_sequencer_txs(queue: &[Transaction]) -> (Vec<PairGroup<'_>>, Vec<usize>) {
    let mut pairs: Vec<PairGroup<'_>> = Vec::new();
    let mut individuals = Vec::new();

    for (index, tx) in queue.iter().enumerate() {
        if !tx.is_sequencer_tx() {
            continue;
        }
        match tx.sandwich_pair_id() {
            Some(pair_id) => match pairs.iter_mut().find(|(id, _)| *id == pair_id) {
                Some((_, legs)) => legs.push(tx),
                None => pairs.push((pair_id, SmallVec::from_elem(tx, 1))),
            },
            None => individuals.push(index),
        }
    }

    (pairs, individuals)
}

fn evaluate_pair(legs: &[&Transaction]) -> Option<ProfitBreakdownItem> {
    let buy = legs.iter().find(|tx| tx.side() == TxSide::Buy)?;
    let sell = legs.iter().find(|tx| tx.side() == TxSide::Sell)?;

    if buy.amount() != sell.amount() || buy.symbol() != sell.symbol() {
        debug!(
            "Ignoring mismatched sandwich legs {} / {}",
            buy.tx_id(),
            sell.tx_id()
        );
        return None;
    }

    let profit = (sell.price() - buy.price()) * buy.amount();
    Some(ProfitBreakdownItem {
        label: format!("{} → {}", buy.tx_id(), sell.tx_id()),
        profit,
        kind: StrategyKind::Sandwich,
        strategy: format!(
            "Sandwich: Buy {} {} at ${}, sell at ${}",
            buy.amount().value().normalize(),
            buy.symbol(),
            buy.price().value().normalize(),
            sell.price().value().normalize()
        ),
        buy_price: Some(buy.price()),
        sell_price: Some(sell.price()),
        amount: Some(buy.amount()),
    })
}
