//! Random move selection with a bounded two-phase search.

use crate::error::EngineError;
use cascade_types::{BoardState, CellIndex, PlayerSlot, Ply};
use rand::Rng;

/// Pick a legal cell for the acting slot.
///
/// A cell is legal if it has zero charge or is already owned by the acting
/// slot. Two phases bound the worst case:
///
/// 1. Up to `ceil(N/2)` uniform random probes over all cells, returning the
///    first legal hit. With abundant legal moves this is O(1) expected.
/// 2. Otherwise materialize the exact legal subset and pick uniformly from
///    it, capping the worst case at ~1.5N cell touches.
///
/// An empty legal subset means the board loader's precondition was violated;
/// fail fast rather than loop.
pub fn select_move(
    state: &BoardState,
    slot: PlayerSlot,
    ply: Ply,
    rng: &mut impl Rng,
) -> Result<CellIndex, EngineError> {
    let n = state.num_cells();
    let probes = n.div_ceil(2);

    for _ in 0..probes {
        let candidate = CellIndex(rng.gen_range(0..n as u32));
        if state.is_legal(candidate, slot) {
            return Ok(candidate);
        }
    }

    let legal = state.legal_cells(slot);
    if legal.is_empty() {
        return Err(EngineError::NoLegalMove { slot, ply });
    }
    Ok(legal[rng.gen_range(0..legal.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_types::Board;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;

    #[test]
    fn test_selects_legal_cell_on_empty_board() {
        let board = Arc::new(Board::grid(4, 4).unwrap());
        let state = BoardState::new(board);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..100 {
            let chosen = select_move(&state, PlayerSlot(0), Ply::START, &mut rng).unwrap();
            assert!(state.is_legal(chosen, PlayerSlot(0)));
        }
    }

    #[test]
    fn test_falls_back_to_exact_subset() {
        let board = Arc::new(Board::grid(4, 4).unwrap());
        let mut state = BoardState::new(board);
        let opponent = PlayerSlot(1);

        // Leave a single legal cell; random probes will usually miss it, so
        // the exact-subset fallback must find it regardless of seed.
        for i in 1..state.num_cells() as u32 {
            let cell = state.cell_mut(CellIndex(i));
            cell.owner = Some(opponent);
            cell.charge = 1;
        }

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let chosen = select_move(&state, PlayerSlot(0), Ply(9), &mut rng).unwrap();
            assert_eq!(chosen, CellIndex(0));
        }
    }

    #[test]
    fn test_fails_fast_with_no_legal_moves() {
        let board = Arc::new(Board::line(3).unwrap());
        let mut state = BoardState::new(board);
        let opponent = PlayerSlot(1);

        for i in 0..state.num_cells() as u32 {
            let cell = state.cell_mut(CellIndex(i));
            cell.owner = Some(opponent);
            cell.charge = 1;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = select_move(&state, PlayerSlot(0), Ply(12), &mut rng).unwrap_err();
        assert_eq!(
            err,
            EngineError::NoLegalMove {
                slot: PlayerSlot(0),
                ply: Ply(12)
            }
        );
    }
}
