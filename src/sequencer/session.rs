use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{SandwichSpread, SimulationConfig};
use crate::core::{PairId, Transaction, TxUid};
use crate::error::Result;
use crate::market::MarketGenerator;
use crate::profit::{ProfitEngine, ProfitReport};
use crate::sequencer::manual::ManualOrder;
use crate::sequencer::ops;

/// Snapshot of the stats panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub reordered_count: u32,
    pub censored_count: u32,
    pub sequencer_tx_count: usize,
    pub queue_len: usize,
}

/// One sequencer session: the pending queue plus its counters.
///
/// The state is owned by a single caller and every transition runs to
/// completion synchronously. Clone it to keep a snapshot.
#[derive(Debug, Clone)]
pub struct SimulationState {
    queue: Vec<Transaction>,
    reordered_count: u32,
    censored_count: u32,
    /// Sequencer labels issued so far; keeps labels unique across censorship
    labels_issued: usize,
    last_report: Option<ProfitReport>,
    generator: MarketGenerator,
    spread: SandwichSpread,
}

impl SimulationState {
    /// Start a session with a freshly generated market
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let mut state = Self::with_queue(config, Vec::new())?;
        state.reset();
        Ok(state)
    }

    /// Start a session from a known queue instead of a random one
    pub fn with_queue(config: SimulationConfig, queue: Vec<Transaction>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            queue,
            reordered_count: 0,
            censored_count: 0,
            labels_issued: 0,
            last_report: None,
            generator: MarketGenerator::new(config.generator)?,
            spread: config.spread,
        })
    }

    pub fn queue(&self) -> &[Transaction] {
        &self.queue
    }

    pub fn reordered_count(&self) -> u32 {
        self.reordered_count
    }

    pub fn censored_count(&self) -> u32 {
        self.censored_count
    }

    /// Report from the last submit, cleared by any later change to the queue
    pub fn last_report(&self) -> Option<&ProfitReport> {
        self.last_report.as_ref()
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            reordered_count: self.reordered_count,
            censored_count: self.censored_count,
            sequencer_tx_count: self.queue.iter().filter(|tx| tx.is_sequencer_tx()).count(),
            queue_len: self.queue.len(),
        }
    }

    /// Replace the queue with a new random market and clear all counters
    pub fn reset(&mut self) {
        let queue = self.generator.generate();
        self.replace_market(queue);
    }

    pub fn reset_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let queue = self.generator.generate_with_rng(rng);
        self.replace_market(queue);
    }

    fn replace_market(&mut self, queue: Vec<Transaction>) {
        info!("New market with {} transactions", queue.len());
        self.queue = queue;
        self.reordered_count = 0;
        self.censored_count = 0;
        self.labels_issued = 0;
        self.last_report = None;
    }

    /// Move `id` to `target_index`; returns false on a no-op
    pub fn reorder(&mut self, id: &TxUid, target_index: usize) -> bool {
        match ops::reorder(&self.queue, id, target_index) {
            Some(queue) => {
                debug!("Reordered {} to position {}", id, target_index);
                self.apply(queue);
                self.reordered_count += 1;
                true
            }
            None => {
                debug!("Reorder of {} to {} ignored", id, target_index);
                false
            }
        }
    }

    /// Exclude `id` from the block, returning the censored transaction
    pub fn censor(&mut self, id: &TxUid) -> Option<Transaction> {
        let Some((queue, removed)) = ops::censor(&self.queue, id) else {
            debug!("Censor of {} ignored, not in queue", id);
            return None;
        };
        info!("Censored {}", removed.tx_id());
        self.apply(queue);
        self.censored_count += 1;
        Some(removed)
    }

    /// Prepend a validated manual order; returns the inserted transaction
    pub fn insert_manual(&mut self, order: ManualOrder) -> &Transaction {
        let label = format!("{}{}", order.side(), self.next_label());
        let tx = order.into_transaction(label);
        info!("Inserted sequencer transaction {}", tx);
        let queue = ops::prepend(&self.queue, tx);
        self.apply(queue);
        &self.queue[0]
    }

    /// Sandwich the organic BUY at `target_index`.
    ///
    /// Returns the new pair id, or `None` if the target is missing, a SELL,
    /// itself a sequencer transaction, or priced too low for the front-run discount.
    pub fn insert_quick_sandwich(&mut self, target_index: usize) -> Option<PairId> {
        if !ops::is_sandwich_target(&self.queue, target_index) {
            debug!("Quick sandwich at {} ignored", target_index);
            return None;
        }

        let buy_label = format!("SandwichBuy{}", self.labels_issued + 1);
        let sell_label = format!("SandwichSell{}", self.labels_issued + 2);
        let Some((front, back)) =
            ops::sandwich_legs(&self.queue[target_index], &self.spread, buy_label, sell_label)
        else {
            debug!(
                "Quick sandwich at {} ignored, price {} too low for discount {}",
                target_index,
                self.queue[target_index].price(),
                self.spread.front_run_discount
            );
            return None;
        };
        let pair_id = front.sandwich_pair_id().cloned();

        let queue = ops::insert_sandwich(&self.queue, target_index, front, back)?;
        info!(
            "Sandwiched {} with pair {:?}",
            self.queue[target_index].tx_id(),
            pair_id
        );
        self.labels_issued += 2;
        self.apply(queue);
        pair_id
    }

    /// Compute the profit of the current ordering and remember it
    pub fn submit(&mut self) -> &ProfitReport {
        let report = ProfitEngine::new(self.spread).compute(&self.queue);
        info!(
            "Block submitted: {} txs, gross ${}, net ${}",
            self.queue.len(),
            report.gross_profit,
            report.net_profit
        );
        self.last_report.insert(report)
    }

    fn next_label(&mut self) -> usize {
        self.labels_issued += 1;
        self.labels_issued
    }

    fn apply(&mut self, queue: Vec<Transaction>) {
        self.queue = queue;
        self.last_report = None;
    }
}
