//! Metrics collection for simulation runs.

use cascade_engine::PlayoutLog;
use hdrhistogram::Histogram;

/// Accumulates per-move and per-playout statistics.
pub struct MetricsCollector {
    depth_hist: Histogram<u64>,
    moves: u64,
    overload_moves: u64,
    playouts: u64,
    terminated: u64,
    ply_capped: u64,
}

impl MetricsCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self {
            // Depths are small integers; 3 significant digits is plenty.
            depth_hist: Histogram::new(3).expect("histogram construction cannot fail"),
            moves: 0,
            overload_moves: 0,
            playouts: 0,
            terminated: 0,
            ply_capped: 0,
        }
    }

    /// Record every move of a finished playout.
    pub fn record_playout(&mut self, log: &PlayoutLog) {
        self.playouts += 1;
        if log.terminated {
            self.terminated += 1;
        } else {
            self.ply_capped += 1;
        }
        for stats in &log.stats {
            self.moves += 1;
            if stats.caused_overload {
                self.overload_moves += 1;
            }
            self.depth_hist
                .record(stats.depth as u64)
                .expect("depth fits in histogram range");
        }
    }

    /// Finish collection and produce a report.
    pub fn finish(self) -> SimulationReport {
        SimulationReport {
            playouts: self.playouts,
            terminated: self.terminated,
            ply_capped: self.ply_capped,
            moves: self.moves,
            overload_moves: self.overload_moves,
            mean_depth: self.depth_hist.mean(),
            max_depth: self.depth_hist.max(),
            p99_depth: self.depth_hist.value_at_quantile(0.99),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of a batch of playouts.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    /// Playouts driven.
    pub playouts: u64,

    /// Playouts that reached the terminal condition.
    pub terminated: u64,

    /// Playouts cut off by the ply bound.
    pub ply_capped: u64,

    /// Total moves across all playouts.
    pub moves: u64,

    /// Moves that triggered at least one cascade wave.
    pub overload_moves: u64,

    /// Mean propagation depth over all moves.
    pub mean_depth: f64,

    /// Largest propagation depth observed.
    pub max_depth: u64,

    /// 99th-percentile propagation depth.
    pub p99_depth: u64,
}

impl SimulationReport {
    /// Fraction of moves that caused an overload.
    pub fn overload_ratio(&self) -> f64 {
        if self.moves == 0 {
            0.0
        } else {
            self.overload_moves as f64 / self.moves as f64
        }
    }

    /// Print a human-readable summary.
    pub fn print(&self) {
        println!("playouts:        {}", self.playouts);
        println!(
            "  terminated:    {} ({} hit the ply bound)",
            self.terminated, self.ply_capped
        );
        println!("moves:           {}", self.moves);
        println!(
            "  with cascades: {} ({:.1}%)",
            self.overload_moves,
            self.overload_ratio() * 100.0
        );
        println!("cascade depth:   mean {:.2}", self.mean_depth);
        println!(
            "                 p99 {}, max {}",
            self.p99_depth, self.max_depth
        );
    }
}
