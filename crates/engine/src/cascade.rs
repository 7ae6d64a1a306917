//! Cascade resolution: wave-by-wave overload propagation.

use crate::error::EngineError;
use cascade_types::{BoardState, CellIndex, PlayerSlot, Ply, Roster};
use tracing::{debug, trace};

/// Defensive ceiling on cascade depth.
///
/// A pair of mutually adjacent capacity-1 cells can oscillate forever, each
/// firing into the other every wave. Board loaders are expected to never
/// produce such topologies, but if one slips through the resolver reports it
/// as a structural error instead of spinning.
pub const MAX_WAVES: u32 = 4096;

/// Resolve a cascade starting from the cells that just became overloaded.
///
/// Processes overloads in discrete waves over an explicit worklist (never
/// call-stack recursion, so depth is bounded by memory rather than stack).
/// Per wave, every overloaded cell discharges by exactly its capacity; any
/// excess carries forward. Each neighbor of a discharging cell is captured
/// by the firing player if owned by someone else (transferring the
/// neighbor's pre-increment charge between aggregate counters), then gains
/// one unit of charge. Cells at or above capacity after the wave form the
/// next wave.
///
/// Returns the propagation depth: the number of waves processed. Zero only
/// if no seed was actually overloaded.
///
/// Once the opening grace period is over, a cascade stops at the first wave
/// boundary after the charged-player count drops below two: the wave that
/// eliminates the last opponent still completes, then resolution halts, so
/// a decided game never keeps cascading. A cascade cut short this way may
/// leave overloaded cells behind; callers skip the post-cascade invariant
/// check in that case because the playout is terminal.
pub fn resolve(
    state: &mut BoardState,
    roster: &mut Roster,
    firing: PlayerSlot,
    seeds: Vec<CellIndex>,
    ply: Ply,
) -> Result<u32, EngineError> {
    let board = state.board().clone();
    let mut wave = seeds;
    let mut depth = 0u32;

    while !wave.is_empty() {
        if depth >= MAX_WAVES {
            return Err(EngineError::CascadeCeiling { ply, waves: depth });
        }

        // Count before the wave's transfers: the eliminating wave itself
        // still runs to completion.
        let charged_before = roster.charged_count();

        let mut next: Vec<CellIndex> = Vec::new();
        for &cell_idx in &wave {
            let capacity = state.cell(cell_idx).capacity as u32;
            if state.cell(cell_idx).charge < capacity {
                continue;
            }

            // Discharge by exactly the capacity; excess carries forward.
            state.cell_mut(cell_idx).charge -= capacity;
            if state.cell(cell_idx).charge >= capacity && !next.contains(&cell_idx) {
                next.push(cell_idx);
            }

            for &nb in board.neighbors(cell_idx) {
                let pre_charge = state.cell(nb).charge;
                if state.cell(nb).owner != Some(firing) {
                    // Capture: move the pre-increment charge between the
                    // aggregate counters, then hand over ownership.
                    if let Some(old) = state.cell(nb).owner {
                        roster.player_mut(old).aggregate_charge -= pre_charge as i64;
                    }
                    roster.player_mut(firing).aggregate_charge += pre_charge as i64;

                    let cell = state.cell_mut(nb);
                    cell.owner = Some(firing);
                    cell.last_changed = ply;
                }

                let cell = state.cell_mut(nb);
                cell.charge += 1;
                if cell.is_overloaded() && !next.contains(&nb) {
                    next.push(nb);
                }
            }
        }

        depth += 1;
        trace!(depth, queued = next.len(), "cascade wave resolved");

        if charged_before < 2 && ply.past_grace() {
            debug!(depth, %ply, "cascade stopped: fewer than two charged players");
            return Ok(depth);
        }
        wave = next;
    }

    Ok(depth)
}

/// Effect of one applied move, after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEffect {
    /// Number of cascade waves the move triggered (zero for a quiet move).
    pub depth: u32,

    /// Whether the move overloaded its cell at all.
    pub caused_overload: bool,
}

/// Apply one move for `acting` on `chosen` and resolve any cascade.
///
/// This is the single mutation path shared by the playout driver and the
/// replay harness: a pure function of the pre-move state and the chosen
/// cell. Exactly one unit of charge is injected; resolution only moves
/// units between cells.
///
/// `ply` is the stamp for this move (the caller's counter after
/// incrementing). Validates the post-cascade invariant (`charge < capacity`
/// everywhere) unless the cascade legitimately stopped on elimination.
pub fn apply_move(
    state: &mut BoardState,
    roster: &mut Roster,
    acting: PlayerSlot,
    chosen: CellIndex,
    ply: Ply,
) -> Result<MoveEffect, EngineError> {
    let cell = state.cell_mut(chosen);
    cell.owner = Some(acting);
    cell.last_changed = ply;
    cell.charge += 1;
    roster.player_mut(acting).aggregate_charge += 1;

    if !state.cell(chosen).is_overloaded() {
        return Ok(MoveEffect {
            depth: 0,
            caused_overload: false,
        });
    }

    let depth = resolve(state, roster, acting, vec![chosen], ply)?;

    let terminal = roster.charged_count() < 2 && ply.past_grace();
    if !terminal {
        if let Some((idx, cell)) = state
            .cells()
            .iter()
            .enumerate()
            .find(|(_, c)| c.is_overloaded())
        {
            return Err(EngineError::OverloadAfterResolve {
                cell: CellIndex(idx as u32),
                coord: cell.coord,
                ply,
            });
        }
    }

    Ok(MoveEffect {
        depth,
        caused_overload: true,
    })
}
