//! Domain-specific identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of player slots in every simulation, regardless of board size.
pub const PLAYER_SLOTS: usize = 8;

/// Number of opening plies during which no slot may be skipped as eliminated.
///
/// Every slot gets exactly one forced placement before eliminations can occur.
pub const GRACE_PLIES: u32 = 8;

/// Player slot identifier (0..=7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerSlot(pub u8);

impl PlayerSlot {
    /// Iterate over all eight slots in order.
    pub fn all() -> impl Iterator<Item = PlayerSlot> {
        (0..PLAYER_SLOTS as u8).map(PlayerSlot)
    }

    /// Slot index as a usize for roster indexing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

/// Index of a cell in the board arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex(pub u32);

impl CellIndex {
    /// Arena index as a usize.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// Ply counter: the number of completed moves in a playout.
///
/// Moves are stamped with the ply value after incrementing, so the first
/// move of a game stamps `Ply(1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ply(pub u32);

impl Ply {
    /// First ply of a playout (no moves completed yet).
    pub const START: Self = Ply(0);

    /// The next ply.
    pub fn next(self) -> Self {
        Ply(self.0 + 1)
    }

    /// Whether the opening grace period is over.
    pub fn past_grace(self) -> bool {
        self.0 >= GRACE_PLIES
    }
}

impl fmt::Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ply({})", self.0)
    }
}

/// Grid coordinate identity of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: u16,
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
