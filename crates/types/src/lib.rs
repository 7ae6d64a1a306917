//! Core types for the cascade board simulation.
//!
//! A board is a flat arena of cells connected by a fixed symmetric adjacency.
//! Each cell has a capacity equal to its number of neighbors; charge at or
//! above capacity makes the cell overloaded. Eight player slots compete to
//! own cells; a playout mutates a private copy of the board move by move.
//!
//! Cells never hold references to their neighbors. Adjacency is stored as
//! indices into the arena, so a per-playout copy is an index-preserving
//! clone of the cell vector rather than a deep reference graph.

mod board;
mod identifiers;
mod player;
mod snapshot;

pub use board::{Board, BoardError, BoardState, Cell};
pub use identifiers::{CellIndex, Coord, PlayerSlot, Ply, GRACE_PLIES, PLAYER_SLOTS};
pub use player::{Player, PlayerColor, Roster, PLAYER_COLORS};
pub use snapshot::{MoveRecord, Snapshot};
