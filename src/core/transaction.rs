use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SimError};
use crate::types::{Price, Size, Token};

/// Transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxSide {
    Buy,
    Sell,
}

impl TxSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxSide::Buy => "BUY",
            TxSide::Sell => "SELL",
        }
    }

}

impl fmt::Display for TxSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TxSide {
    type Err = SimError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(TxSide::Buy),
            "SELL" => Ok(TxSide::Sell),
            _ => Err(SimError::UnknownSide(s.to_string())),
        }
    }
}

/// Opaque identity of a queued transaction.
/// Used for keying and drag tracking only; profit logic never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxUid(String);

impl TxUid {
    pub fn generate() -> Self {
        Self(generate_unique_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TxUid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Correlation id shared by the two legs of one sandwich
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairId(String);

impl PairId {
    pub fn generate() -> Self {
        Self(generate_unique_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PairId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a session-unique identifier.
///
/// Prefers a v4 UUID from the OS entropy source. If that source is unavailable,
/// falls back to `<unix millis>-<random base36>`.
pub fn generate_unique_id() -> String {
    let mut bytes = [0u8; 16];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string(),
        Err(e) => {
            log::debug!("OS entropy unavailable ({}), using time-based id", e);
            fallback_unique_id()
        }
    }
}

fn fallback_unique_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..11)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}

/// One order in the simulated mempool/block.
///
/// Transactions are immutable once built. Queue operations move, drop or add
/// whole transactions, they never edit one in place. Every constructor checks
/// that amount and price are positive, and only sequencer transactions carry
/// a sandwich pair id. Serialization is one-way for that reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: TxUid,
    symbol: Token,
    #[serde(rename = "type")]
    side: TxSide,
    amount: Size,
    price: Price,
    /// Human-readable label used in reports
    tx_id: String,
    is_sequencer_tx: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    sandwich_pair_id: Option<PairId>,
    timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Organic market transaction at 1-based `batch_position` of a generated batch
    pub fn organic(
        symbol: Token,
        side: TxSide,
        amount: Size,
        price: Price,
        batch_position: usize,
    ) -> Result<Self> {
        check_positive(amount, price)?;
        Ok(Self::assemble(
            symbol,
            side,
            amount,
            price,
            format!("Tx{}", batch_position),
            false,
            None,
        ))
    }

    /// Transaction inserted by the sequencer, optionally as one leg of a sandwich
    pub fn sequencer(
        symbol: Token,
        side: TxSide,
        amount: Size,
        price: Price,
        label: impl Into<String>,
        sandwich_pair_id: Option<PairId>,
    ) -> Result<Self> {
        check_positive(amount, price)?;
        Ok(Self::assemble(
            symbol,
            side,
            amount,
            price,
            label.into(),
            true,
            sandwich_pair_id,
        ))
    }

    /// Caller guarantees positive amount and price
    pub(crate) fn assemble(
        symbol: Token,
        side: TxSide,
        amount: Size,
        price: Price,
        tx_id: String,
        is_sequencer_tx: bool,
        sandwich_pair_id: Option<PairId>,
    ) -> Self {
        debug_assert!(amount.is_positive() && price.is_positive());
        debug_assert!(is_sequencer_tx || sandwich_pair_id.is_none());
        Self {
            id: TxUid::generate(),
            symbol,
            side,
            amount,
            price,
            tx_id,
            is_sequencer_tx,
            sandwich_pair_id,
            timestamp: Utc::now(),
        }
    }

    pub fn id(&self) -> &TxUid {
        &self.id
    }

    pub fn symbol(&self) -> Token {
        self.symbol
    }

    pub fn side(&self) -> TxSide {
        self.side
    }

    pub fn amount(&self) -> Size {
        self.amount
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    pub fn is_sequencer_tx(&self) -> bool {
        self.is_sequencer_tx
    }

    pub fn is_organic(&self) -> bool {
        !self.is_sequencer_tx
    }

    pub fn sandwich_pair_id(&self) -> Option<&PairId> {
        self.sandwich_pair_id.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

fn check_positive(amount: Size, price: Price) -> Result<()> {
    if !amount.is_positive() {
        return Err(SimError::InvalidAmount(amount.to_string()));
    }
    if !price.is_positive() {
        return Err(SimError::InvalidPrice(price.to_string()));
    }
    Ok(())
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} @ ${}",
            self.tx_id, self.side, self.amount, self.symbol, self.price
        )?;
        if self.is_sequencer_tx {
            write!(f, " [sequencer]")?;
        }
        if self.sandwich_pair_id.is_some() {
            write!(f, " [paired]")?;
        }
        Ok(())
    }
}
