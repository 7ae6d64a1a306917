//! Round-robin turn scheduling with an opening grace period.

use cascade_types::{PlayerSlot, Ply, Roster, PLAYER_SLOTS};

/// Determine the next acting slot.
///
/// Round-robins over the eight slots starting after `last_slot` (or slot 0
/// when no move has been made yet). A slot is skipped only if its aggregate
/// charge is below 1 **and** the opening grace period is over; during the
/// first eight plies every slot is eligible, guaranteeing each slot one
/// forced placement before eliminations can occur.
///
/// Returns `None` if no slot qualifies. The driver checks the termination
/// condition before scheduling, so with two or more charged players a
/// candidate always exists among the seven slots after the last actor.
pub fn next_actor(roster: &Roster, last_slot: Option<PlayerSlot>, ply: Ply) -> Option<PlayerSlot> {
    let last = match last_slot {
        Some(slot) => slot.index(),
        None => PLAYER_SLOTS - 1,
    };

    for i in 1..PLAYER_SLOTS {
        let candidate = PlayerSlot(((last + i) % PLAYER_SLOTS) as u8);
        if !roster.player(candidate).is_charged() && ply.past_grace() {
            continue;
        }
        return Some(candidate);
    }
    None
}
