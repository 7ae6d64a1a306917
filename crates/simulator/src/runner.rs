//! Data-parallel playout execution.

use crate::config::SimulatorConfig;
use crate::metrics::{MetricsCollector, SimulationReport};
use cascade_engine::{EngineError, Playout, PlayoutLog, RenderSink};
use cascade_types::{Board, BoardError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors setting up or running a simulation batch.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Board construction failed.
    #[error(transparent)]
    Board(#[from] BoardError),

    /// A playout failed with an engine error.
    #[error("playout {playout} failed: {source}")]
    Playout {
        playout: usize,
        source: EngineError,
    },
}

/// Result of a simulation batch: the aggregate report plus every playout's
/// recorded moves (the benchmark harness and dataset writer both consume
/// the logs).
pub struct SimulationOutput {
    /// Aggregate metrics over all playouts.
    pub report: SimulationReport,

    /// One log per playout, in playout order.
    pub logs: Vec<PlayoutLog>,
}

impl SimulationOutput {
    /// Total recorded moves across all playouts, after quiet-move filtering
    /// if the configuration discards them.
    pub fn sample_count(&self, keep_quiet_moves: bool) -> usize {
        self.logs
            .iter()
            .flat_map(|log| &log.stats)
            .filter(|s| keep_quiet_moves || s.caused_overload)
            .count()
    }
}

/// Runs batches of independent playouts in parallel.
///
/// Each playout owns a private copy of the board's cells and its own roster
/// and RNG; playouts never share mutable state, so no locking is involved.
pub struct Runner {
    config: SimulatorConfig,
    board: Arc<Board>,
}

impl Runner {
    /// Create a runner over a synthetic grid board from the configuration.
    pub fn new(config: SimulatorConfig) -> Result<Self, RunnerError> {
        let board = Arc::new(Board::grid(config.board_width, config.board_height)?);
        Ok(Self { config, board })
    }

    /// Create a runner over an explicit board (e.g. one built by a board
    /// loader collaborator).
    pub fn with_board(config: SimulatorConfig, board: Arc<Board>) -> Self {
        Self { config, board }
    }

    /// The board all playouts copy from.
    pub fn board(&self) -> &Arc<Board> {
        &self.board
    }

    /// Run the configured number of playouts and collect metrics.
    pub fn run(&self, sink: &(impl RenderSink + Sync)) -> Result<SimulationOutput, RunnerError> {
        info!(
            playouts = self.config.playouts,
            cells = self.board.num_cells(),
            seed = self.config.seed,
            "starting simulation batch"
        );

        let logs: Result<Vec<PlayoutLog>, RunnerError> = (0..self.config.playouts)
            .into_par_iter()
            .map(|i| {
                let mut rng = ChaCha8Rng::seed_from_u64(self.config.playout_seed(i));
                let mut playout = Playout::new(self.board.clone());
                playout
                    .run(self.config.max_plies, &mut rng, sink)
                    .map_err(|source| RunnerError::Playout {
                        playout: i,
                        source,
                    })
            })
            .collect();
        let logs = logs?;

        let mut collector = MetricsCollector::new();
        for log in &logs {
            collector.record_playout(log);
        }
        let report = collector.finish();
        info!(
            moves = report.moves,
            terminated = report.terminated,
            "simulation batch finished"
        );

        Ok(SimulationOutput { report, logs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_engine::NullSink;

    #[test]
    fn test_batch_runs_and_terminates() {
        let config = SimulatorConfig::new(4, 4).with_playouts(4).with_seed(7);
        let runner = Runner::new(config).unwrap();
        let output = runner.run(&NullSink).unwrap();

        assert_eq!(output.report.playouts, 4);
        assert_eq!(output.report.terminated, 4);
        assert_eq!(output.logs.len(), 4);
        assert!(output.report.moves > 0);
    }

    #[test]
    fn test_same_seed_same_records() {
        let config = SimulatorConfig::new(4, 4).with_playouts(2).with_seed(99);
        let runner = Runner::new(config.clone()).unwrap();

        let a = runner.run(&NullSink).unwrap();
        let b = Runner::new(config).unwrap().run(&NullSink).unwrap();

        for (log_a, log_b) in a.logs.iter().zip(&b.logs) {
            assert_eq!(log_a.records, log_b.records);
        }
    }

    #[test]
    fn test_quiet_move_filtering() {
        let config = SimulatorConfig::new(4, 4).with_playouts(2).with_seed(5);
        let runner = Runner::new(config).unwrap();
        let output = runner.run(&NullSink).unwrap();

        let all = output.sample_count(true);
        let changes_only = output.sample_count(false);
        assert!(changes_only <= all);
        assert_eq!(changes_only as u64, output.report.overload_moves);
    }
}
