use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use timely::dataflow::operators::probe::{Handle as ProbeHandle, Probe};
use timely::dataflow::operators::{Input, Inspect};
use timely::dataflow::InputHandle;

use tf_runtime::metrics::{EpochTimer, MetricsRegistry};
use tf_runtime::{init_tracing, start_runtime};
use tf_views::TopNStream;

/// Stream seeded random integers through the top-N view, one epoch per
/// element, logging every snapshot.
#[derive(Parser, Debug, Clone)]
#[command(name = "integers_demo")]
struct Args {
    /// Retention width of the selector.
    #[arg(long, default_value_t = 5)]
    width: usize,

    /// Number of random elements to stream.
    #[arg(long, default_value_t = 20)]
    count: usize,

    /// RNG seed; the default keeps runs reproducible.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    info!(?args, "integers_demo starting");

    start_runtime(1, move |_index, worker| {
        let width = args.width;
        let metrics = MetricsRegistry::default();
        let timer = EpochTimer::start();

        let mut input = InputHandle::<u64, i64>::new();
        let mut probe = ProbeHandle::new();

        let metrics_out = metrics.clone();
        worker.dataflow::<u64, _, _>(|scope| {
            let mut last_floor: Option<i64> = None;
            scope
                .input_from(&mut input)
                .top_n(width)
                .inspect(move |snapshot| {
                    metrics_out.inc_snapshots_out(1);
                    metrics_out.record_retained_peak(snapshot.len() as u64);
                    if snapshot.len() == width {
                        let floor = snapshot.floor().copied();
                        if let (Some(prev), Some(cur)) = (last_floor, floor) {
                            if cur > prev {
                                metrics_out.inc_floor_raises(1);
                            }
                        }
                        last_floor = floor;
                    }
                    info!(
                        len = snapshot.len(),
                        max = ?snapshot.max(),
                        floor = ?snapshot.floor(),
                        "snapshot"
                    );
                })
                .probe_with(&mut probe);
        });

        let mut rng = StdRng::seed_from_u64(args.seed);
        for epoch in 0..args.count as u64 {
            let element: i64 = rng.gen_range(0..1_000);
            metrics.inc_elements_in(1);
            input.send(element);
            input.advance_to(epoch + 1);
            while probe.less_than(input.time()) {
                worker.step();
            }
        }
        input.close();
        while worker.step() {}

        let summary = metrics.snapshot();
        info!("{}", summary.to_json_line("integers_demo", Some(timer.elapsed())));
    })
}
