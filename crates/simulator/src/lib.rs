//! Cascade Simulator
//!
//! Runs batches of independent playouts over synthetic boards and benchmarks
//! the cascade resolver through the replay harness.
//!
//! # Architecture
//!
//! The simulator builds on `cascade-engine` to provide:
//!
//! - **Configuration**: board dimensions, playout counts, seeds, ply bounds
//! - **Parallel Execution**: one board/roster copy per playout, fanned out
//!   with rayon; no shared mutable state
//! - **Metrics Collection**: propagation-depth distribution, termination
//!   accounting, quiet-move filtering for the dataset seam
//! - **Replay Benchmark**: re-drives every recorded move with no randomness
//!   and reports resolver throughput
//!
//! # Example
//!
//! ```ignore
//! use cascade_engine::NullSink;
//! use cascade_simulator::{Runner, SimulatorConfig};
//!
//! let config = SimulatorConfig::new(8, 8)
//!     .with_playouts(64)
//!     .with_seed(12345);
//!
//! let output = Runner::new(config)?.run(&NullSink)?;
//! output.report.print();
//! ```

pub mod bench;
pub mod config;
pub mod metrics;
pub mod runner;
pub mod sink;

pub use bench::{BenchReport, ReplayBench};
pub use config::SimulatorConfig;
pub use metrics::{MetricsCollector, SimulationReport};
pub use runner::{Runner, SimulationOutput};
pub use sink::ChannelSink;
