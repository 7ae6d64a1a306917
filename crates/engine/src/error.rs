//! Engine error taxonomy.
//!
//! Structural errors (`NoLegalMove`, `CascadeCeiling`) violate preconditions
//! the board loader is expected to guarantee; invariant errors
//! (`OverloadAfterResolve`) are internal defects. Neither is retried: both
//! terminate the playout and carry enough context (ply, cell coordinate) to
//! reproduce the failure through the replay harness. A propagation depth of
//! zero is a normal outcome, not an error.

use cascade_types::{CellIndex, Coord, PlayerSlot, Ply};
use thiserror::Error;

/// Errors raised while driving a playout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The acting player has no legal cell at all. Every active player is
    /// expected to retain at least one legal cell, so this is a structural
    /// violation, not a reason to keep searching.
    #[error("no legal move for {slot} at {ply}")]
    NoLegalMove { slot: PlayerSlot, ply: Ply },

    /// A cascade exceeded the defensive wave ceiling; the board topology
    /// likely contains an oscillating cycle (e.g. two mutually adjacent
    /// capacity-1 cells).
    #[error("cascade exceeded {waves} waves at {ply}; board topology is likely degenerate")]
    CascadeCeiling { ply: Ply, waves: u32 },

    /// A cell is still at or above capacity after a fully-resolved cascade.
    #[error("{cell} at {coord} still overloaded after cascade at {ply}")]
    OverloadAfterResolve {
        cell: CellIndex,
        coord: Coord,
        ply: Ply,
    },

    /// A replayed move produced a state that does not match the next
    /// recorded snapshot.
    #[error("replayed state diverges from recorded snapshot at {ply}")]
    ReplayMismatch { ply: Ply },
}
