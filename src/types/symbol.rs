use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

/// Token traded in the simulated mempool
/// The set is closed; every token has its own price and amount scale in the generator table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Token {
    Eth,
    Btc,
    Sol,
    Avax,
    Matic,
}

impl Token {
    /// All tokens, in display order
    pub const ALL: [Token; 5] = [Token::Eth, Token::Btc, Token::Sol, Token::Avax, Token::Matic];

    /// Ticker string (e.g. "ETH")
    pub fn as_str(&self) -> &'static str {
        match self {
            Token::Eth => "ETH",
            Token::Btc => "BTC",
            Token::Sol => "SOL",
            Token::Avax => "AVAX",
            Token::Matic => "MATIC",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Token {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Token::ALL
            .iter()
            .copied()
            .find(|token| token.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SimError::UnknownSymbol(s.to_string()))
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
