//! Playout driver: one complete simulated game.

use crate::cascade::{apply_move, MoveEffect};
use crate::error::EngineError;
use crate::scheduler::next_actor;
use crate::selector::select_move;
use crate::sink::{RenderSink, ResolvedFrame};
use cascade_types::{Board, BoardState, CellIndex, MoveRecord, PlayerSlot, Ply, Roster, Snapshot};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, warn};

/// State machine position of a playout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayoutStatus {
    /// Ready to accept the next move.
    AwaitingMove,

    /// Fewer than two players held charge after the opening grace period.
    Terminated,
}

/// Per-move stratification data handed to the dataset-writer collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveStats {
    /// Propagation depth (wave count) of the move.
    pub depth: u32,

    /// Whether the move caused an overload at all. Quiet moves are normal
    /// outcomes, kept or discarded by the dataset writer.
    pub caused_overload: bool,
}

/// Outcome of a single driven ply.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// The recorded move (pre-move snapshot plus chosen cell).
    pub record: MoveRecord,

    /// Stratification data for this move.
    pub stats: MoveStats,
}

/// Everything a finished (or ply-capped) playout produced.
#[derive(Debug, Clone, Default)]
pub struct PlayoutLog {
    /// Ordered move records, one per ply.
    pub records: Vec<MoveRecord>,

    /// Per-move stratification data, parallel to `records`.
    pub stats: Vec<MoveStats>,

    /// Whether the playout reached its terminal condition (as opposed to
    /// hitting the caller's ply bound).
    pub terminated: bool,
}

impl PlayoutLog {
    /// Number of plies driven.
    pub fn plies(&self) -> usize {
        self.records.len()
    }
}

/// One mutable simulated game: a private board copy, eight players, a ply
/// counter, and the last acting slot.
///
/// Playouts are independent data-parallel units; nothing here is shared
/// with any other playout.
#[derive(Debug, Clone)]
pub struct Playout {
    state: BoardState,
    roster: Roster,
    ply: Ply,
    last_slot: Option<PlayerSlot>,
    status: PlayoutStatus,
}

impl Playout {
    /// Start a fresh playout over a board.
    pub fn new(board: Arc<Board>) -> Self {
        Self {
            state: BoardState::new(board),
            roster: Roster::new(),
            ply: Ply::START,
            last_slot: None,
            status: PlayoutStatus::AwaitingMove,
        }
    }

    /// Current board state.
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Current roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Completed plies.
    pub fn ply(&self) -> Ply {
        self.ply
    }

    /// Current state machine position.
    pub fn status(&self) -> PlayoutStatus {
        self.status
    }

    /// Whether the terminal condition holds. Checked only once the opening
    /// grace period is over: fewer than two players with positive aggregate
    /// charge.
    fn is_decided(&self) -> bool {
        self.ply.past_grace() && self.roster.charged_count() < 2
    }

    /// Drive one ply: schedule, select, record, apply, resolve, emit.
    ///
    /// Returns `Ok(None)` once the playout is terminated. The pre-move
    /// snapshot is captured before any mutation so the move can be replayed
    /// exactly.
    pub fn step(
        &mut self,
        rng: &mut impl Rng,
        sink: &impl RenderSink,
    ) -> Result<Option<MoveOutcome>, EngineError> {
        if self.status == PlayoutStatus::Terminated {
            return Ok(None);
        }
        if self.is_decided() {
            self.status = PlayoutStatus::Terminated;
            return Ok(None);
        }

        let acting = match next_actor(&self.roster, self.last_slot, self.ply) {
            Some(slot) => slot,
            None => {
                // Unreachable with a live roster; treat defensively as over.
                self.status = PlayoutStatus::Terminated;
                return Ok(None);
            }
        };
        self.last_slot = Some(acting);

        let chosen = select_move(&self.state, acting, self.ply, rng)?;
        let snapshot = self.snapshot(acting);

        self.ply = self.ply.next();
        let effect = apply_move(&mut self.state, &mut self.roster, acting, chosen, self.ply)?;

        if effect.caused_overload {
            sink.frame(self.frame(&snapshot, acting, effect));
        }

        if self.is_decided() {
            self.status = PlayoutStatus::Terminated;
            debug!(ply = %self.ply, "playout terminated");
        }

        Ok(Some(MoveOutcome {
            record: MoveRecord { snapshot, chosen },
            stats: MoveStats {
                depth: effect.depth,
                caused_overload: effect.caused_overload,
            },
        }))
    }

    /// Drive plies until the playout terminates or `max_plies` is reached.
    ///
    /// The ply bound is a safety valve against non-terminating play; hitting
    /// it is reported in the log, not an error.
    pub fn run(
        &mut self,
        max_plies: u32,
        rng: &mut impl Rng,
        sink: &impl RenderSink,
    ) -> Result<PlayoutLog, EngineError> {
        let mut log = PlayoutLog::default();
        while (log.plies() as u32) < max_plies {
            match self.step(rng, sink)? {
                Some(outcome) => {
                    log.records.push(outcome.record);
                    log.stats.push(outcome.stats);
                }
                None => {
                    log.terminated = true;
                    return Ok(log);
                }
            }
        }
        warn!(max_plies, "playout hit ply bound before terminating");
        Ok(log)
    }

    /// Capture a full pre-move snapshot.
    fn snapshot(&self, acting: PlayerSlot) -> Snapshot {
        Snapshot {
            ply: self.ply,
            acting,
            players: self.roster.clone(),
            cells: self.state.cells().to_vec(),
        }
    }

    /// Build the render frame for a resolved move, diffing against the
    /// pre-move snapshot so charge-only changes are included.
    fn frame(&self, pre: &Snapshot, acting: PlayerSlot, effect: MoveEffect) -> ResolvedFrame {
        let changed = self
            .state
            .cells()
            .iter()
            .zip(&pre.cells)
            .enumerate()
            .filter(|(_, (now, before))| now != before)
            .map(|(i, _)| CellIndex(i as u32))
            .collect();
        ResolvedFrame {
            ply: self.ply,
            acting,
            depth: effect.depth,
            cells: self.state.cells().to_vec(),
            changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;
    use cascade_types::GRACE_PLIES;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_playout_terminates_within_bound() {
        // Empirical liveness: a small grid with eight slots entering during
        // the grace period settles to a winner well before the valve trips.
        let board = Arc::new(Board::grid(4, 4).unwrap());
        for seed in 0..8 {
            let mut playout = Playout::new(board.clone());
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let log = playout.run(10_000, &mut rng, &NullSink).unwrap();
            assert!(
                log.terminated,
                "seed {seed} did not terminate within the ply bound"
            );
            assert!(playout.roster().charged_count() < 2);
        }
    }

    #[test]
    fn test_grace_period_forces_all_slots_in() {
        let board = Arc::new(Board::grid(5, 5).unwrap());
        let mut playout = Playout::new(board);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..GRACE_PLIES {
            playout.step(&mut rng, &NullSink).unwrap().unwrap();
        }

        // After eight plies every slot made exactly one placement.
        for player in playout.roster().iter() {
            assert!(
                player.aggregate_charge >= 1,
                "{} never placed during the grace period",
                player.slot
            );
        }
    }

    #[test]
    fn test_chargeless_slot_never_acts_after_grace() {
        let board = Arc::new(Board::grid(4, 4).unwrap());
        let mut playout = Playout::new(board);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let log = playout.run(10_000, &mut rng, &NullSink).unwrap();
        for record in &log.records {
            let snap = &record.snapshot;
            if snap.ply.past_grace() {
                assert!(
                    snap.players.player(snap.acting).is_charged(),
                    "{} acted at {} with no charge",
                    snap.acting,
                    snap.ply
                );
            }
        }
    }

    #[test]
    fn test_snapshot_precedes_mutation() {
        let board = Arc::new(Board::grid(3, 3).unwrap());
        let mut playout = Playout::new(board);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let outcome = playout.step(&mut rng, &NullSink).unwrap().unwrap();
        let snap = &outcome.record.snapshot;
        assert_eq!(snap.ply, Ply::START);
        assert!(snap.cells.iter().all(|c| c.charge == 0));
        assert_eq!(snap.players.charged_count(), 0);
        // The live state moved on.
        assert_eq!(playout.ply(), Ply(1));
        assert_eq!(playout.state().total_charge(), 1);
    }

    struct CountingSink(Mutex<Vec<ResolvedFrame>>);

    impl RenderSink for CountingSink {
        fn frame(&self, frame: ResolvedFrame) {
            self.0.lock().unwrap().push(frame);
        }
    }

    #[test]
    fn test_frames_emitted_per_resolved_move() {
        let board = Arc::new(Board::grid(4, 4).unwrap());
        let mut playout = Playout::new(board);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let sink = CountingSink(Mutex::new(Vec::new()));

        let log = playout.run(10_000, &mut rng, &sink).unwrap();
        let overload_moves = log.stats.iter().filter(|s| s.caused_overload).count();

        let frames = sink.0.lock().unwrap();
        assert_eq!(frames.len(), overload_moves);
        for frame in frames.iter() {
            assert!(!frame.changed.is_empty(), "resolved frame with no delta");
        }
    }
}
