//! Snapshots and move records for replay.

use crate::{Cell, CellIndex, PlayerSlot, Ply, Roster};
use serde::{Deserialize, Serialize};

/// Full copy of players and cells captured immediately before a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Completed plies at capture time.
    pub ply: Ply,

    /// The slot about to act.
    pub acting: PlayerSlot,

    /// All eight players at capture time.
    pub players: Roster,

    /// The full cell arena at capture time, in arena order.
    pub cells: Vec<Cell>,
}

/// One recorded move: the pre-move snapshot plus the chosen cell.
///
/// Owned by the playout driver that recorded it; the replay harness consumes
/// records read-only and reproduces the exact post-move state with no
/// randomness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// State immediately before the move.
    pub snapshot: Snapshot,

    /// The cell the acting player placed a unit on.
    pub chosen: CellIndex,
}
