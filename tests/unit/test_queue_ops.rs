use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use sandwich_sim::sequencer::ops;
use sandwich_sim::{MarketGenerator, SimulationConfig, SimulationState, Transaction, TxUid};

fn market(seed: u64) -> Vec<Transaction> {
    MarketGenerator::default().generate_with_rng(&mut StdRng::seed_from_u64(seed))
}

fn sorted_ids(queue: &[Transaction]) -> Vec<TxUid> {
    let mut ids: Vec<TxUid> = queue.iter().map(|tx| tx.id().clone()).collect();
    ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    ids
}

proptest! {
    #[test]
    fn reorder_is_a_permutation(seed in any::<u64>(), pick in 0usize..7, target in 0usize..10) {
        let queue = market(seed);
        let id = queue[pick % queue.len()].id().clone();

        if let Some(next) = ops::reorder(&queue, &id, target) {
            prop_assert_eq!(next.len(), queue.len());
            prop_assert_eq!(sorted_ids(&next), sorted_ids(&queue));
            prop_assert_eq!(ops::position_of(&next, &id), Some(target.min(queue.len() - 1)));
        }
    }

    #[test]
    fn reorder_to_current_position_is_noop(seed in any::<u64>(), pick in 0usize..7) {
        let queue = market(seed);
        let index = pick % queue.len();
        let mut state = SimulationState::with_queue(SimulationConfig::default(), queue).unwrap();
        let id = state.queue()[index].id().clone();
        let before = state.queue().to_vec();

        prop_assert!(!state.reorder(&id, index));
        prop_assert_eq!(state.queue(), &before[..]);
        prop_assert_eq!(state.reordered_count(), 0);
    }

    #[test]
    fn censor_removes_exactly_one(seed in any::<u64>(), pick in 0usize..7) {
        let queue = market(seed);
        let index = pick % queue.len();
        let id = queue[index].id().clone();

        let (next, removed) = ops::censor(&queue, &id).unwrap();
        prop_assert_eq!(next.len(), queue.len() - 1);
        prop_assert_eq!(removed.id(), &id);
        prop_assert!(ops::position_of(&next, &id).is_none());
    }

    #[test]
    fn quick_sandwich_wraps_every_organic_buy(seed in any::<u64>()) {
        let queue = market(seed);
        for (index, target) in queue.iter().enumerate() {
            let mut state =
                SimulationState::with_queue(SimulationConfig::default(), queue.clone()).unwrap();
            let outcome = state.insert_quick_sandwich(index);

            if !ops::is_sandwich_target(&queue, index) {
                prop_assert!(outcome.is_none());
                prop_assert_eq!(state.queue(), &queue[..]);
                continue;
            }

            let pair = outcome.unwrap();
            let q = state.queue();
            prop_assert_eq!(q.len(), queue.len() + 2);
            prop_assert_eq!(q[index + 1].id(), target.id());
            prop_assert_eq!(q[index].price().value(), target.price().value() - Decimal::ONE);
            prop_assert_eq!(q[index + 2].price().value(), target.price().value() + Decimal::TWO);
            prop_assert_eq!(q[index].sandwich_pair_id(), Some(&pair));
            prop_assert_eq!(q[index + 2].sandwich_pair_id(), Some(&pair));
            prop_assert_eq!(q[index].amount(), q[index + 2].amount());
            prop_assert_eq!(q[index].symbol(), q[index + 2].symbol());
        }
    }
}

#[test]
fn test_reorder_abc_to_cab() {
    let queue = market(11);
    let queue: Vec<Transaction> = queue.into_iter().take(3).collect();
    let (a, b, c) = (
        queue[0].id().clone(),
        queue[1].id().clone(),
        queue[2].id().clone(),
    );
    let mut state = SimulationState::with_queue(SimulationConfig::default(), queue).unwrap();

    assert!(state.reorder(&c, 0));
    let order: Vec<&TxUid> = state.queue().iter().map(|tx| tx.id()).collect();
    assert_eq!(order, vec![&c, &a, &b]);
    assert_eq!(state.reordered_count(), 1);
}

#[test]
fn test_censor_absent_id_is_noop() {
    let queue = market(5);
    let len = queue.len();
    let mut state = SimulationState::with_queue(SimulationConfig::default(), queue).unwrap();

    assert!(state.censor(&TxUid::from("not-there")).is_none());
    assert_eq!(state.queue().len(), len);
    assert_eq!(state.censored_count(), 0);
}
