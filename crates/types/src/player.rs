//! Player slots and the fixed eight-player roster.

use crate::{PlayerSlot, PLAYER_SLOTS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color associated with a player slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerColor(pub u32);

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// Canonical colors for the eight slots, in slot order.
pub const PLAYER_COLORS: [PlayerColor; PLAYER_SLOTS] = [
    PlayerColor(0xFF_00_00_FF), // red
    PlayerColor(0x00_FF_00_FF), // green
    PlayerColor(0x00_00_FF_FF), // blue
    PlayerColor(0xFF_FF_00_FF), // yellow
    PlayerColor(0xFF_00_FF_FF), // magenta
    PlayerColor(0x00_FF_FF_FF), // cyan
    PlayerColor(0xFF_80_00_FF), // orange
    PlayerColor(0x80_00_FF_FF), // purple
];

/// One player slot's mutable state.
///
/// `aggregate_charge` is a running counter used only for elimination
/// decisions. It is credited on own moves and captures and debited when a
/// cell is captured away, but per-unit cascade increments to cells a player
/// already owns are never mirrored into it, so it can diverge from the true
/// sum of owned cells' charge over a long game. It may also go negative;
/// elimination only cares about `aggregate_charge > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// The slot this player occupies.
    pub slot: PlayerSlot,

    /// Rendering color for this slot.
    pub color: PlayerColor,

    /// Elimination counter, not an exact charge sum (see type docs).
    pub aggregate_charge: i64,
}

impl Player {
    /// Whether the player still counts as active for elimination purposes.
    pub fn is_charged(&self) -> bool {
        self.aggregate_charge > 0
    }
}

/// The fixed set of eight players in a playout.
///
/// Exactly eight slots exist regardless of board size; slots that never act
/// simply stay chargeless and behave as permanently eliminated once the
/// opening grace period ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: [Player; PLAYER_SLOTS],
}

impl Roster {
    /// Create a fresh roster with all aggregates at zero.
    pub fn new() -> Self {
        let mut players = [Player {
            slot: PlayerSlot(0),
            color: PLAYER_COLORS[0],
            aggregate_charge: 0,
        }; PLAYER_SLOTS];
        for (i, player) in players.iter_mut().enumerate() {
            player.slot = PlayerSlot(i as u8);
            player.color = PLAYER_COLORS[i];
        }
        Self { players }
    }

    /// The player in a slot.
    pub fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot.index()]
    }

    /// Mutable access to the player in a slot.
    pub fn player_mut(&mut self, slot: PlayerSlot) -> &mut Player {
        &mut self.players[slot.index()]
    }

    /// Iterate over all players in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Number of players with a positive aggregate charge.
    pub fn charged_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_charged()).count()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_slots_and_colors() {
        let roster = Roster::new();
        for (i, player) in roster.iter().enumerate() {
            assert_eq!(player.slot, PlayerSlot(i as u8));
            assert_eq!(player.color, PLAYER_COLORS[i]);
            assert_eq!(player.aggregate_charge, 0);
        }
    }

    #[test]
    fn test_charged_count() {
        let mut roster = Roster::new();
        assert_eq!(roster.charged_count(), 0);

        roster.player_mut(PlayerSlot(0)).aggregate_charge = 3;
        roster.player_mut(PlayerSlot(5)).aggregate_charge = 1;
        // Negative aggregates do not count as charged.
        roster.player_mut(PlayerSlot(2)).aggregate_charge = -1;

        assert_eq!(roster.charged_count(), 2);
    }
}
