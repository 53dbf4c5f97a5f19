//! Queue transforms. Each function reads the current ordering and returns a
//! new one, or `None` when the request is a no-op.

use crate::config::SandwichSpread;
use crate::core::{PairId, Transaction, TxSide, TxUid};
use crate::types::Price;

pub fn position_of(queue: &[Transaction], id: &TxUid) -> Option<usize> {
    queue.iter().position(|tx| tx.id() == id)
}

/// Move `id` to `target_index` of the remaining sequence.
///
/// Indices past the end clamp to the last slot. Returns `None` when `id` is
/// missing or the transaction would land where it already is.
pub fn reorder(
    queue: &[Transaction],
    id: &TxUid,
    target_index: usize,
) -> Option<Vec<Transaction>> {
    let from = position_of(queue, id)?;
    let to = target_index.min(queue.len() - 1);
    if from == to {
        return None;
    }

    let mut next = queue.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    Some(next)
}

/// Drop `id` from the queue, returning the new queue and the censored transaction
pub fn censor(queue: &[Transaction], id: &TxUid) -> Option<(Vec<Transaction>, Transaction)> {
    let index = position_of(queue, id)?;
    let mut next = queue.to_vec();
    let removed = next.remove(index);
    Some((next, removed))
}

/// Prepend a sequencer transaction so it executes first
pub fn prepend(queue: &[Transaction], tx: Transaction) -> Vec<Transaction> {
    let mut next = Vec::with_capacity(queue.len() + 1);
    next.push(tx);
    next.extend_from_slice(queue);
    next
}

/// Whether the transaction at `index` may be sandwiched: an organic BUY
pub fn is_sandwich_target(queue: &[Transaction], index: usize) -> bool {
    queue
        .get(index)
        .map_or(false, |tx| tx.side() == TxSide::Buy && tx.is_organic())
}

/// Build the front-run BUY and back-run SELL around `target`.
///
/// Returns `None` when the discount would put the front-run price at or below zero.
pub fn sandwich_legs(
    target: &Transaction,
    spread: &SandwichSpread,
    buy_label: String,
    sell_label: String,
) -> Option<(Transaction, Transaction)> {
    let pair_id = PairId::generate();
    let buy_price = target.price() - Price::new(spread.front_run_discount);
    let sell_price = target.price() + Price::new(spread.back_run_premium);

    let front = Transaction::sequencer(
        target.symbol(),
        TxSide::Buy,
        target.amount(),
        buy_price,
        buy_label,
        Some(pair_id.clone()),
    )
    .ok()?;
    let back = Transaction::sequencer(
        target.symbol(),
        TxSide::Sell,
        target.amount(),
        sell_price,
        sell_label,
        Some(pair_id),
    )
    .ok()?;
    Some((front, back))
}

/// Wrap the organic BUY at `target_index` as `[front, target, back]`.
///
/// Returns `None` if the index is out of range or the target is not an organic BUY.
pub fn insert_sandwich(
    queue: &[Transaction],
    target_index: usize,
    front: Transaction,
    back: Transaction,
) -> Option<Vec<Transaction>> {
    if !is_sandwich_target(queue, target_index) {
        return None;
    }

    let mut next = Vec::with_capacity(queue.len() + 2);
    next.extend_from_slice(&queue[..target_index]);
    next.push(front);
    next.push(queue[target_index].clone());
    next.push(back);
    next.extend_from_slice(&queue[target_index + 1..]);
    Some(next)
}
