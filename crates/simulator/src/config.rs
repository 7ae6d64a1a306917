//! Configuration types for the simulator.

/// Configuration for a simulation run.
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Width of the synthetic grid board.
    pub board_width: u16,

    /// Height of the synthetic grid board.
    pub board_height: u16,

    /// Number of independent playouts to run.
    pub playouts: usize,

    /// Safety valve: maximum plies per playout.
    pub max_plies: u32,

    /// Master seed; per-playout seeds are derived from it.
    pub seed: u64,

    /// Whether moves that triggered no cascade are kept as dataset samples.
    /// Mirrors the "changes-only" dataset switch.
    pub keep_quiet_moves: bool,
}

impl SimulatorConfig {
    /// Create a configuration for a `width` x `height` grid board.
    pub fn new(board_width: u16, board_height: u16) -> Self {
        Self {
            board_width,
            board_height,
            playouts: 16,
            max_plies: 100_000,
            seed: 12345,
            keep_quiet_moves: true,
        }
    }

    /// Set the number of playouts.
    pub fn with_playouts(mut self, playouts: usize) -> Self {
        self.playouts = playouts;
        self
    }

    /// Set the per-playout ply bound.
    pub fn with_max_plies(mut self, max_plies: u32) -> Self {
        self.max_plies = max_plies;
        self
    }

    /// Set the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Keep or discard quiet (zero-depth) moves as dataset samples.
    pub fn with_keep_quiet_moves(mut self, keep: bool) -> Self {
        self.keep_quiet_moves = keep;
        self
    }

    /// Seed for one playout, derived from the master seed.
    pub fn playout_seed(&self, index: usize) -> u64 {
        self.seed.wrapping_add(index as u64)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let config = SimulatorConfig::new(6, 4)
            .with_playouts(3)
            .with_max_plies(500)
            .with_seed(99)
            .with_keep_quiet_moves(false);

        assert_eq!(config.board_width, 6);
        assert_eq!(config.board_height, 4);
        assert_eq!(config.playouts, 3);
        assert_eq!(config.max_plies, 500);
        assert_eq!(config.seed, 99);
        assert!(!config.keep_quiet_moves);
    }

    #[test]
    fn test_playout_seeds_are_distinct() {
        let config = SimulatorConfig::default();
        assert_ne!(config.playout_seed(0), config.playout_seed(1));
    }
}
