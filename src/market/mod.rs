pub mod generator;

pub use generator::{default_token_table, GeneratorConfig, MarketGenerator, TokenConfig};
