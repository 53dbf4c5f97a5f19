use log::debug;
use rand::Rng;
use rust_decimal::prelude::*;

use crate::core::{Transaction, TxSide};
use crate::error::{Result, SimError};
use crate::types::{Price, Size, Token};

/// Baseline market parameters for one token
#[derive(Debug, Clone, PartialEq)]
pub struct TokenConfig {
    pub symbol: Token,
    /// Centre of the generated price band
    pub base_price: Decimal,
    /// Half-width of the price band
    pub price_range: Decimal,
    pub amount_min: Decimal,
    pub amount_max: Decimal,
}

impl TokenConfig {
    pub fn new(
        symbol: Token,
        base_price: Decimal,
        price_range: Decimal,
        amount_min: Decimal,
        amount_max: Decimal,
    ) -> Self {
        Self {
            symbol,
            base_price,
            price_range,
            amount_min,
            amount_max,
        }
    }

    pub fn min_price(&self) -> Decimal {
        self.base_price - self.price_range
    }

    pub fn max_price(&self) -> Decimal {
        self.base_price + self.price_range
    }

    fn validate(&self) -> Result<()> {
        if self.amount_min <= Decimal::ZERO || self.amount_min > self.amount_max {
            return Err(SimError::InvalidConfig(format!(
                "{}: amount range [{}, {}] must be positive and ordered",
                self.symbol, self.amount_min, self.amount_max
            )));
        }
        if self.price_range < Decimal::ZERO || self.min_price() <= Decimal::ZERO {
            return Err(SimError::InvalidConfig(format!(
                "{}: price band {} +/- {} must stay positive",
                self.symbol, self.base_price, self.price_range
            )));
        }
        Ok(())
    }
}

/// Token table used by the generator.
///
/// Scales are deliberately heterogeneous: BTC is high price/low amount,
/// MATIC is low price/high amount.
pub fn default_token_table() -> Vec<TokenConfig> {
    vec![
        TokenConfig::new(
            Token::Eth,
            Decimal::new(3200, 0),
            Decimal::new(100, 0),
            Decimal::new(1, 1),
            Decimal::new(5, 0),
        ),
        TokenConfig::new(
            Token::Btc,
            Decimal::new(67000, 0),
            Decimal::new(2000, 0),
            Decimal::new(1, 2),
            Decimal::new(5, 1),
        ),
        TokenConfig::new(
            Token::Sol,
            Decimal::new(85, 0),
            Decimal::new(5, 0),
            Decimal::new(5, 0),
            Decimal::new(50, 0),
        ),
        TokenConfig::new(
            Token::Avax,
            Decimal::new(40, 0),
            Decimal::new(3, 0),
            Decimal::new(10, 0),
            Decimal::new(100, 0),
        ),
        TokenConfig::new(
            Token::Matic,
            Decimal::new(12, 1),
            Decimal::new(1, 1),
            Decimal::new(100, 0),
            Decimal::new(2000, 0),
        ),
    ]
}

/// Generator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Minimum transactions per batch (inclusive)
    pub min_count: usize,
    /// Maximum transactions per batch (inclusive)
    pub max_count: usize,
    pub tokens: Vec<TokenConfig>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_count: 5,
            max_count: 7,
            tokens: default_token_table(),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_count == 0 || self.min_count > self.max_count {
            return Err(SimError::InvalidConfig(format!(
                "batch size range [{}, {}] is invalid",
                self.min_count, self.max_count
            )));
        }
        if self.tokens.is_empty() {
            return Err(SimError::InvalidConfig("token table is empty".to_string()));
        }
        self.tokens.iter().try_for_each(TokenConfig::validate)
    }

    pub fn token(&self, symbol: Token) -> Option<&TokenConfig> {
        self.tokens.iter().find(|t| t.symbol == symbol)
    }
}

/// Random market generator producing a fresh organic mempool
#[derive(Debug, Clone)]
pub struct MarketGenerator {
    config: GeneratorConfig,
}

impl Default for MarketGenerator {
    fn default() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }
}

impl MarketGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generate a new batch using thread-local randomness
    pub fn generate(&self) -> Vec<Transaction> {
        self.generate_with_rng(&mut rand::thread_rng())
    }

    /// Generate a new batch from the supplied RNG.
    ///
    /// Each call is independent of any previous batch; labels restart at `Tx1`.
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Transaction> {
        let count = rng.gen_range(self.config.min_count..=self.config.max_count);
        let batch: Vec<Transaction> = (1..=count)
            .map(|position| self.random_transaction(rng, position))
            .collect();
        debug!("Generated {} organic transactions", batch.len());
        batch
    }

    fn random_transaction<R: Rng + ?Sized>(&self, rng: &mut R, position: usize) -> Transaction {
        let token = &self.config.tokens[rng.gen_range(0..self.config.tokens.len())];
        let side = if rng.gen_bool(0.5) {
            TxSide::Buy
        } else {
            TxSide::Sell
        };

        let amount = uniform_2dp(rng, token.amount_min, token.amount_max);
        let price = uniform_2dp(rng, token.min_price(), token.max_price());

        // validated token bands keep both values positive
        Transaction::assemble(
            token.symbol,
            side,
            Size::new(amount),
            Price::new(price),
            format!("Tx{}", position),
            false,
            None,
        )
    }
}

/// Uniform draw in `[low, high]`, rounded to 2 dp and clamped back into the range
fn uniform_2dp<R: Rng + ?Sized>(rng: &mut R, low: Decimal, high: Decimal) -> Decimal {
    let lo = low.to_f64().unwrap_or_default();
    let hi = high.to_f64().unwrap_or_default();
    let draw = if hi > lo { rng.gen_range(lo..=hi) } else { lo };
    Decimal::from_f64(draw)
        .unwrap_or(low)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .clamp(low, high)
}
