use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use tf_runtime::init_tracing;
use tf_views::TopNScanExt;

/// Fold a parsed record sequence through the top-N scan adapter,
/// emitting each snapshot as a JSON line.
#[derive(Parser, Debug)]
#[command(name = "scan_demo")]
struct Args {
    /// Retention width of the selector.
    #[arg(long, default_value_t = 3)]
    width: usize,

    /// Number of generated records.
    #[arg(long, default_value_t = 12)]
    count: usize,

    /// RNG seed; the default keeps runs reproducible.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Corrupt the record at this index to demonstrate fault
    /// propagation: snapshots stop at the fault.
    #[arg(long)]
    corrupt: Option<usize>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    info!(?args, "scan_demo starting");

    let mut rng = StdRng::seed_from_u64(args.seed);
    let records: Vec<String> = (0..args.count)
        .map(|index| {
            let score: i64 = rng.gen_range(0..500);
            if args.corrupt == Some(index) {
                format!("score-{score}")
            } else {
                score.to_string()
            }
        })
        .collect();

    let parsed = records.iter().map(|record| {
        record
            .parse::<i64>()
            .with_context(|| format!("malformed record {record:?}"))
    });

    for (index, step) in parsed.try_top_n_scan(args.width).enumerate() {
        match step {
            Ok(snapshot) => {
                info!(index, "{}", snapshot.to_json_line()?);
            }
            Err(fault) => {
                warn!(index, "sequence faulted; no further snapshots");
                return Err(fault);
            }
        }
    }
    Ok(())
}
