pub mod transaction;

pub use transaction::{generate_unique_id, PairId, Transaction, TxSide, TxUid};
