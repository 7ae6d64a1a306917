//! Board arena and per-playout board state.

use crate::{CellIndex, Coord, PlayerSlot, Ply};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Maximum adjacency degree a cell may have (4-connected grids).
pub const MAX_DEGREE: usize = 4;

/// Errors constructing a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The board has no cells.
    #[error("board has no cells")]
    Empty,

    /// An edge references a cell outside the arena.
    #[error("edge ({0}, {1}) references a cell out of range")]
    EdgeOutOfRange(u32, u32),

    /// An edge connects a cell to itself.
    #[error("cell {0} is adjacent to itself")]
    SelfEdge(u32),

    /// The same edge was given twice.
    #[error("duplicate edge ({0}, {1})")]
    DuplicateEdge(u32, u32),

    /// A cell's degree is outside 1..=4.
    #[error("cell {cell} has degree {degree}, expected 1..={max}", max = MAX_DEGREE)]
    BadDegree { cell: u32, degree: usize },
}

/// Smallest simulation unit: a capacity, a charge, and an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Grid coordinate identity.
    pub coord: Coord,

    /// Fixed at construction: the number of adjacent cells.
    pub capacity: u8,

    /// Current charge. At or above capacity the cell is overloaded.
    pub charge: u32,

    /// Owning slot, if any.
    pub owner: Option<PlayerSlot>,

    /// Ply of the last ownership or charge change.
    pub last_changed: Ply,
}

impl Cell {
    /// Whether the cell is overloaded (charge at or above capacity).
    pub fn is_overloaded(&self) -> bool {
        self.charge >= self.capacity as u32
    }
}

/// Immutable adjacency graph of cells.
///
/// Cells and their neighbor lists are stored in flat arenas indexed by
/// [`CellIndex`]; the graph is fixed for the lifetime of the board. Playouts
/// never mutate a `Board` directly: each one clones the cell arena into its
/// own [`BoardState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Cell>,
    /// CSR offsets into `neighbors`, one extra entry at the end.
    neighbor_offsets: Vec<u32>,
    neighbors: Vec<CellIndex>,
}

impl Board {
    /// Build a board from cell coordinates and symmetric adjacency edges.
    ///
    /// Each edge `(a, b)` must be listed once; both directions are derived.
    /// Capacities are fixed to the resulting adjacency degrees.
    pub fn from_adjacency(coords: Vec<Coord>, edges: &[(u32, u32)]) -> Result<Self, BoardError> {
        if coords.is_empty() {
            return Err(BoardError::Empty);
        }
        let n = coords.len() as u32;

        let mut adjacency: Vec<Vec<CellIndex>> = vec![Vec::new(); coords.len()];
        for &(a, b) in edges {
            if a >= n || b >= n {
                return Err(BoardError::EdgeOutOfRange(a, b));
            }
            if a == b {
                return Err(BoardError::SelfEdge(a));
            }
            if adjacency[a as usize].contains(&CellIndex(b)) {
                return Err(BoardError::DuplicateEdge(a, b));
            }
            adjacency[a as usize].push(CellIndex(b));
            adjacency[b as usize].push(CellIndex(a));
        }

        let mut cells = Vec::with_capacity(coords.len());
        let mut neighbor_offsets = Vec::with_capacity(coords.len() + 1);
        let mut neighbors = Vec::new();
        neighbor_offsets.push(0);

        for (i, (coord, adj)) in coords.into_iter().zip(&adjacency).enumerate() {
            let degree = adj.len();
            if degree == 0 || degree > MAX_DEGREE {
                return Err(BoardError::BadDegree {
                    cell: i as u32,
                    degree,
                });
            }
            cells.push(Cell {
                coord,
                capacity: degree as u8,
                charge: 0,
                owner: None,
                last_changed: Ply::START,
            });
            neighbors.extend_from_slice(adj);
            neighbor_offsets.push(neighbors.len() as u32);
        }

        Ok(Self {
            cells,
            neighbor_offsets,
            neighbors,
        })
    }

    /// Build a 4-connected `width` x `height` grid board.
    ///
    /// Stand-in for map-derived boards: the simulator and tests use it to get
    /// deterministic topologies without a map asset.
    pub fn grid(width: u16, height: u16) -> Result<Self, BoardError> {
        let w = width as u32;
        let h = height as u32;
        let mut coords = Vec::with_capacity((w * h) as usize);
        let mut edges = Vec::new();
        for y in 0..h {
            for x in 0..w {
                coords.push(Coord::new(x as u16, y as u16));
                let idx = y * w + x;
                if x + 1 < w {
                    edges.push((idx, idx + 1));
                }
                if y + 1 < h {
                    edges.push((idx, idx + w));
                }
            }
        }
        Self::from_adjacency(coords, &edges)
    }

    /// Build a path graph of `n` cells in a horizontal line.
    pub fn line(n: u16) -> Result<Self, BoardError> {
        let coords = (0..n).map(|x| Coord::new(x, 0)).collect();
        let edges: Vec<_> = (0..n.saturating_sub(1) as u32).map(|i| (i, i + 1)).collect();
        Self::from_adjacency(coords, &edges)
    }

    /// Number of cells in the arena.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// The pristine cell arena (all charges zero, all cells unowned).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Neighbor indices of a cell.
    pub fn neighbors(&self, index: CellIndex) -> &[CellIndex] {
        let start = self.neighbor_offsets[index.index()] as usize;
        let end = self.neighbor_offsets[index.index() + 1] as usize;
        &self.neighbors[start..end]
    }
}

/// Mutable per-playout copy of a board's cells.
///
/// The adjacency topology stays shared behind an `Arc`; only the cell arena
/// is cloned, so independent playouts never share mutable state.
#[derive(Debug, Clone)]
pub struct BoardState {
    board: Arc<Board>,
    cells: Vec<Cell>,
}

impl BoardState {
    /// Create a fresh state from a board, cloning its pristine cells.
    pub fn new(board: Arc<Board>) -> Self {
        let cells = board.cells().to_vec();
        Self { board, cells }
    }

    /// Restore a state from previously captured cells.
    ///
    /// The cells must have been captured from a state over the same board.
    pub fn restore(board: Arc<Board>, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(board.num_cells(), cells.len());
        Self { board, cells }
    }

    /// The shared board topology.
    pub fn board(&self) -> &Arc<Board> {
        &self.board
    }

    /// Number of cells.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Current cells, in arena order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// A single cell.
    pub fn cell(&self, index: CellIndex) -> &Cell {
        &self.cells[index.index()]
    }

    /// Mutable access to a single cell.
    pub fn cell_mut(&mut self, index: CellIndex) -> &mut Cell {
        &mut self.cells[index.index()]
    }

    /// Neighbor indices of a cell.
    pub fn neighbors(&self, index: CellIndex) -> &[CellIndex] {
        self.board.neighbors(index)
    }

    /// Whether `slot` may place a unit on the cell: unowned with zero charge,
    /// or already owned by the acting slot.
    pub fn is_legal(&self, index: CellIndex, slot: PlayerSlot) -> bool {
        let cell = self.cell(index);
        cell.charge == 0 || cell.owner == Some(slot)
    }

    /// Materialize the exact legal-move subset for a slot.
    pub fn legal_cells(&self, slot: PlayerSlot) -> Vec<CellIndex> {
        (0..self.cells.len() as u32)
            .map(CellIndex)
            .filter(|&i| self.is_legal(i, slot))
            .collect()
    }

    /// Total charge summed over all cells.
    pub fn total_charge(&self) -> u64 {
        self.cells.iter().map(|c| c.charge as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_capacities() {
        let board = Board::line(3).unwrap();
        assert_eq!(board.num_cells(), 3);

        // End cells have one neighbor, the middle has two.
        assert_eq!(board.cells()[0].capacity, 1);
        assert_eq!(board.cells()[1].capacity, 2);
        assert_eq!(board.cells()[2].capacity, 1);

        assert_eq!(board.neighbors(CellIndex(0)), &[CellIndex(1)]);
        assert_eq!(board.neighbors(CellIndex(1)), &[CellIndex(0), CellIndex(2)]);
    }

    #[test]
    fn test_grid_capacities() {
        let board = Board::grid(3, 3).unwrap();
        assert_eq!(board.num_cells(), 9);

        // Corners have 2 neighbors, edges 3, the center 4.
        assert_eq!(board.cells()[0].capacity, 2);
        assert_eq!(board.cells()[1].capacity, 3);
        assert_eq!(board.cells()[4].capacity, 4);
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let board = Board::grid(4, 2).unwrap();
        for i in 0..board.num_cells() as u32 {
            for &nb in board.neighbors(CellIndex(i)) {
                assert!(
                    board.neighbors(nb).contains(&CellIndex(i)),
                    "edge {} -> {} has no reverse",
                    i,
                    nb
                );
            }
        }
    }

    #[test]
    fn test_rejects_bad_boards() {
        assert_eq!(
            Board::from_adjacency(vec![], &[]),
            Err(BoardError::Empty)
        );

        let coords = vec![Coord::new(0, 0), Coord::new(1, 0)];
        assert_eq!(
            Board::from_adjacency(coords.clone(), &[(0, 2)]),
            Err(BoardError::EdgeOutOfRange(0, 2))
        );
        assert_eq!(
            Board::from_adjacency(coords.clone(), &[(1, 1)]),
            Err(BoardError::SelfEdge(1))
        );
        assert_eq!(
            Board::from_adjacency(coords.clone(), &[(0, 1), (1, 0)]),
            Err(BoardError::DuplicateEdge(1, 0))
        );

        // Isolated cell: degree 0.
        let coords = vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(9, 9)];
        assert_eq!(
            Board::from_adjacency(coords, &[(0, 1)]),
            Err(BoardError::BadDegree { cell: 2, degree: 0 })
        );
    }

    #[test]
    fn test_state_is_independent_copy() {
        let board = Arc::new(Board::line(3).unwrap());
        let mut state_a = BoardState::new(board.clone());
        let state_b = BoardState::new(board.clone());

        state_a.cell_mut(CellIndex(0)).charge = 5;
        assert_eq!(state_b.cell(CellIndex(0)).charge, 0);
        assert_eq!(board.cells()[0].charge, 0);
    }

    #[test]
    fn test_legality() {
        let board = Arc::new(Board::line(3).unwrap());
        let mut state = BoardState::new(board);
        let a = PlayerSlot(0);
        let b = PlayerSlot(1);

        // Everything is legal on an empty board.
        assert_eq!(state.legal_cells(a).len(), 3);

        let cell = state.cell_mut(CellIndex(1));
        cell.owner = Some(b);
        cell.charge = 1;

        assert!(!state.is_legal(CellIndex(1), a));
        assert!(state.is_legal(CellIndex(1), b));
        assert_eq!(state.legal_cells(a), vec![CellIndex(0), CellIndex(2)]);
    }
}
