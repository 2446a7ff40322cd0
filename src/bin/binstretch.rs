//! Command-line entry point: parse a `GameParams` triple and tuning
//! thresholds, run the queen to a decided root, and report the
//! verdict through the process exit code (§6, External Interfaces).
//!
//! Exit codes:
//!   0 - proved a lower bound (the adversary wins)
//!   1 - proved the algorithm wins
//!   2 - user error (invalid parameters)
//!   other - internal failure

use clap::Parser;

use binstretch::messaging::local::LocalChannel;
use binstretch::params::{GameParams, SearchConfig, Thresholds};
use binstretch::scheduler::Queen;
use binstretch::{init_logging, minimax::SearchContext};

/// solve an online bin stretching instance and print the verdict.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// number of bins.
    #[arg(long)]
    bins: u8,

    /// offline (optimal) bin capacity.
    #[arg(long)]
    optimal: binstretch::Size,

    /// online (stretched) bin capacity, must exceed `optimal`.
    #[arg(long)]
    stretch: binstretch::Size,

    /// load-based task boundary threshold tau.
    #[arg(long)]
    tau: Option<binstretch::Load>,

    /// depth-based task boundary threshold delta.
    #[arg(long)]
    delta: Option<usize>,

    /// worker thread count; defaults to the number of logical cores.
    #[arg(long)]
    workers: Option<usize>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("failed to initialize logging: {e}");
    }

    let params = match GameParams::new(cli.bins, cli.optimal, cli.stretch) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("invalid parameters: {e}");
            std::process::exit(2);
        }
    };

    let mut thresholds = Thresholds::default();
    if let Some(tau) = cli.tau {
        thresholds.tau = tau;
    }
    if let Some(delta) = cli.delta {
        thresholds.delta = delta;
    }

    let mut config = SearchConfig::new(params).with_thresholds(thresholds);
    config.workers = cli.workers;

    let ctx = match SearchContext::new(params, &config.thresholds) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("failed to build search context: {e}");
            std::process::exit(3);
        }
    };

    if let Some(workers) = config.workers {
        if rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()
            .is_err()
        {
            log::warn!("global rayon pool already initialized, ignoring --workers");
        }
    }

    let channel = LocalChannel::new();
    let queen = Queen::new(&ctx, &config);
    let solution = queen.solve(&channel);

    log::info!(
        "solved {}/{}/{} in {} rounds, {} vertices, final monotonicity {}: {:?}",
        params.bins,
        params.optimal,
        params.stretch,
        solution.rounds,
        solution.vertices,
        solution.final_monotonicity,
        solution.verdict
    );

    match solution.verdict {
        binstretch::dag::Victory::AdvWins => {
            println!("lower bound proved: the adversary wins ({}, {}, {})", params.bins, params.optimal, params.stretch);
            std::process::exit(0);
        }
        binstretch::dag::Victory::AlgWins => {
            println!("upper bound proved: the algorithm wins ({}, {}, {})", params.bins, params.optimal, params.stretch);
            std::process::exit(1);
        }
        other => {
            eprintln!("internal failure: search terminated undecided ({other:?})");
            std::process::exit(70);
        }
    }
}
