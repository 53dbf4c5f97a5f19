use rust_decimal::prelude::*;

use crate::core::{Transaction, TxSide};
use crate::error::{Result, SimError};
use crate::types::{Price, Size, Token};

/// A validated manual order from the sequencer's entry form.
///
/// Can only be built through the checked constructors, so a `ManualOrder`
/// always has a positive amount and price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualOrder {
    symbol: Token,
    side: TxSide,
    amount: Size,
    price: Price,
}

impl ManualOrder {
    pub fn new(symbol: Token, side: TxSide, amount: Decimal, price: Decimal) -> Result<Self> {
        if amount <= Decimal::ZERO {
            return Err(SimError::InvalidAmount(amount.to_string()));
        }
        if price <= Decimal::ZERO {
            return Err(SimError::InvalidPrice(price.to_string()));
        }
        Ok(Self {
            symbol,
            side,
            amount: Size::new(amount),
            price: Price::new(price),
        })
    }

    /// Build from raw form text
    pub fn parse(symbol: &str, side: &str, amount: &str, price: &str) -> Result<Self> {
        let symbol: Token = symbol.parse()?;
        let side: TxSide = side.parse()?;
        let amount =
            parse_number(amount).ok_or_else(|| SimError::InvalidAmount(amount.to_string()))?;
        let price =
            parse_number(price).ok_or_else(|| SimError::InvalidPrice(price.to_string()))?;
        Self::new(symbol, side, amount, price)
    }

    /// Build from floating-point input; NaN and infinities are rejected
    pub fn from_f64(symbol: Token, side: TxSide, amount: f64, price: f64) -> Result<Self> {
        let amount = Decimal::from_f64(amount)
            .filter(|_| amount.is_finite())
            .ok_or_else(|| SimError::InvalidAmount(amount.to_string()))?;
        let price = Decimal::from_f64(price)
            .filter(|_| price.is_finite())
            .ok_or_else(|| SimError::InvalidPrice(price.to_string()))?;
        Self::new(symbol, side, amount, price)
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

    /// Turn the order into a sequencer transaction carrying `label`
    pub fn into_transaction(self, label: impl Into<String>) -> Transaction {
        Transaction::assemble(
            self.symbol,
            self.side,
            self.amount,
            self.price,
            label.into(),
            true,
            None,
        )
    }
}

fn parse_number(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
