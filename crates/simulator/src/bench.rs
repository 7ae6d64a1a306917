//! Replay benchmark for the cascade resolver.
//!
//! Consumes the move records a simulation batch produced and re-drives the
//! resolver through the replay harness, with no randomness and no image
//! I/O, so the timings measure resolution alone.

use crate::runner::RunnerError;
use cascade_engine::{replay_record, PlayoutLog};
use cascade_types::Board;
use hdrhistogram::Histogram;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Replays recorded moves and measures resolver throughput.
pub struct ReplayBench {
    board: Arc<Board>,
}

impl ReplayBench {
    /// Create a benchmark over the board the records were captured on.
    pub fn new(board: Arc<Board>) -> Self {
        Self { board }
    }

    /// Replay every recorded move in every log, timing each replay.
    pub fn run(&self, logs: &[PlayoutLog]) -> Result<BenchReport, RunnerError> {
        let mut latency_ns =
            Histogram::<u64>::new(3).expect("histogram construction cannot fail");
        let mut moves = 0u64;

        let start = Instant::now();
        for (i, log) in logs.iter().enumerate() {
            for record in &log.records {
                let move_start = Instant::now();
                replay_record(&self.board, record)
                    .map_err(|source| RunnerError::Playout { playout: i, source })?;
                latency_ns
                    .record(move_start.elapsed().as_nanos() as u64)
                    .expect("latency fits in histogram range");
                moves += 1;
            }
        }
        let elapsed = start.elapsed();

        let report = BenchReport {
            moves,
            elapsed,
            p50_ns: latency_ns.value_at_quantile(0.50),
            p99_ns: latency_ns.value_at_quantile(0.99),
        };
        info!(
            moves,
            elapsed_ms = elapsed.as_millis() as u64,
            "replay benchmark finished"
        );
        Ok(report)
    }
}

/// Throughput and latency summary of a replay benchmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchReport {
    /// Moves replayed.
    pub moves: u64,

    /// Total wall-clock time spent replaying.
    pub elapsed: Duration,

    /// Median per-move replay latency in nanoseconds.
    pub p50_ns: u64,

    /// 99th-percentile per-move replay latency in nanoseconds.
    pub p99_ns: u64,
}

impl BenchReport {
    /// Replayed moves per second.
    pub fn moves_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.moves as f64 / secs
        }
    }

    /// Print a human-readable summary.
    pub fn print(&self) {
        println!("replayed moves:  {}", self.moves);
        println!("elapsed:         {:?}", self.elapsed);
        println!("throughput:      {:.0} moves/s", self.moves_per_sec());
        println!(
            "latency:         p50 {}ns, p99 {}ns",
            self.p50_ns, self.p99_ns
        );
    }
}
