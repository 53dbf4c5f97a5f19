/// End-to-end sequencer sessions: generate, manipulate, submit.
///
/// Run with: cargo test --test integration
mod test_profit_attribution;
