use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use sandwich_sim::{
    init_logging, ManualOrder, SimulationConfig, SimulationState, StrategyKind, Transaction,
    TxSide,
};

/// Print the pending queue in execution order
fn print_queue(title: &str, queue: &[Transaction]) {
    println!("\n╔════════════════════════════════════════════════════════════╗");
    println!("║ {:58} ║", title);
    println!("╠════════════════════════════════════════════════════════════╣");
    for (position, tx) in queue.iter().enumerate() {
        println!("║ {:>2}. {:54} ║", position + 1, tx.to_string());
    }
    println!("╚════════════════════════════════════════════════════════════╝");
}

struct Args {
    seed: Option<u64>,
    json: bool,
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut args = Args {
        seed: None,
        json: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--seed" => {
                let value = it.next().ok_or("--seed needs a value")?;
                args.seed = Some(value.parse()?);
            }
            "--json" => args.json = true,
            other => return Err(format!("unknown argument '{}'", other).into()),
        }
    }
    Ok(args)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;
    init_logging("info", None)?;

    info!("Starting sequencer dry run");

    let mut state = SimulationState::with_queue(SimulationConfig::default(), Vec::new())?;
    match args.seed {
        Some(seed) => state.reset_with_rng(&mut StdRng::seed_from_u64(seed)),
        None => state.reset(),
    }
    print_queue("📋 MEMPOOL (initial order)", state.queue());

    // Sandwich the first organic BUY
    let victim = state
        .queue()
        .iter()
        .position(|tx| tx.side() == TxSide::Buy && tx.is_organic());
    match victim {
        Some(index) => {
            state.insert_quick_sandwich(index);
        }
        None => warn!("No organic BUY to sandwich in this market"),
    }

    // Front-run the last organic transaction in its own direction
    if let Some(target) = state.queue().iter().rev().find(|tx| tx.is_organic()).cloned() {
        let order = ManualOrder::new(
            target.symbol(),
            target.side(),
            rust_decimal::Decimal::ONE,
            target.price().value(),
        )?;
        let own_id = state.insert_manual(order).id().clone();
        if let Some(target_index) = state.queue().iter().position(|tx| tx.id() == target.id()) {
            state.reorder(&own_id, target_index - 1);
        }
    }

    // Censor the first organic SELL that is not already a front-run target
    let queue = state.queue();
    let censor_id = queue
        .iter()
        .enumerate()
        .find(|&(i, tx)| {
            tx.is_organic() && tx.side() == TxSide::Sell && (i == 0 || queue[i - 1].is_organic())
        })
        .map(|(_, tx)| tx.id().clone());
    if let Some(id) = censor_id {
        state.censor(&id);
    }

    print_queue("🧱 BLOCK (submitted order)", state.queue());

    let stats = state.stats();
    info!(
        "Reorders: {}, censored: {}, own transactions: {}",
        stats.reordered_count, stats.censored_count, stats.sequencer_tx_count
    );

    let report = state.submit();
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("\n💰 PROFIT REPORT");
        println!("{}", report);
    }

    for kind in [StrategyKind::Sandwich, StrategyKind::FrontRun, StrategyKind::BadTiming] {
        let (count, total) = report
            .entries_of(kind)
            .fold((0usize, Decimal::ZERO), |(n, sum), item| (n + 1, sum + item.profit));
        if count > 0 {
            info!("{:?}: {} entries, ${}", kind, count, total.round_dp(2));
        }
    }
    if report.is_profitable() {
        info!("Block is profitable: net ${}", report.net_profit.round_dp(2));
    } else {
        warn!("Block is not profitable: net ${}", report.net_profit.round_dp(2));
    }

    Ok(())
}
