#![allow(dead_code)]

pub mod binconf;
pub mod cache;
pub mod dag;
pub mod dp;
pub mod error;
pub mod heuristics;
pub mod maxfeas;
pub mod messaging;
pub mod minimax;
pub mod monotonicity;
pub mod params;
pub mod scheduler;
pub mod task;

pub use error::Error;

/// dimensional aliases, kept small and direct the way the teacher
/// keeps `Chips`/`Utility`/`Probability` as crate-root type aliases.
pub type Size = u8;
pub type Load = i32;
pub type BinHash = u64;

/// every task is expected to terminate deterministically; nothing in
/// this crate retries a failed operation (see the error handling design).
pub type Result<T> = std::result::Result<T, Error>;

/// how often (in recursion iterations) a worker polls the shared
/// root-solved flag and the task-pruned signal.
pub const POLL_INTERVAL: usize = 1000;

/// default probe length for the open-addressed caches.
pub const DEFAULT_PROBE_LEN: usize = 4;

/// trait for deterministic random generation, used by Zobrist table
/// construction and by tests -- never by the hot search path.
pub trait Arbitrary {
    fn random(rng: &mut impl rand::Rng) -> Self;
}

/// initialize logging for the binary entry point: a terminal logger at
/// info level plus a debug-level file logger under `logs/`, mirroring
/// the teacher's combined `simplelog` setup in `lib.rs::init()`.
#[cfg(feature = "server")]
pub fn init_logging() -> anyhow::Result<()> {
    use std::time::SystemTime;
    use std::time::UNIX_EPOCH;

    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{time}.log"))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

/// progress bar for a round of generation/exploration.
#[cfg(feature = "server")]
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_millis(250);
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan} {pos}/{len}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let bar = indicatif::ProgressBar::new(n as u64);
    bar.set_style(style);
    bar.enable_steady_tick(tick);
    bar
}
