//! Match events.
//!
//! The engine queues one event per observable change. A UI drains the queue
//! after each call and re-renders from what it receives, instead of
//! subscribing to a global store.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::position::Position;

/// Something that happened during a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A fresh match was set up.
    MatchStarted {
        match_number: u32,
        first_player: PlayerId,
        artifact: Position,
    },

    /// The current player rolled the die.
    DieRolled { player: PlayerId, value: u8 },

    /// A player stepped onto an open cell.
    PlayerMoved {
        player: PlayerId,
        from: Position,
        to: Position,
        remaining: u8,
    },

    /// A player walked into a hidden wall and was sent home.
    WallHit {
        player: PlayerId,
        wall: Position,
        returned_to: Position,
    },

    /// A player picked up the artifact, which reappeared elsewhere.
    ArtifactCollected {
        player: PlayerId,
        total: u32,
        respawned_at: Position,
    },

    /// A player reached the win threshold.
    PlayerWon { player: PlayerId },

    /// The turn passed to another player.
    TurnPassed { to: PlayerId, turn_number: u32 },
}

impl MatchEvent {
    /// The player the event concerns.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            MatchEvent::MatchStarted { first_player, .. } => *first_player,
            MatchEvent::DieRolled { player, .. }
            | MatchEvent::PlayerMoved { player, .. }
            | MatchEvent::WallHit { player, .. }
            | MatchEvent::ArtifactCollected { player, .. }
            | MatchEvent::PlayerWon { player } => *player,
            MatchEvent::TurnPassed { to, .. } => *to,
        }
    }
}

impl std::fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchEvent::MatchStarted { match_number, first_player, .. } => {
                write!(f, "Match {} started, {} goes first", match_number, first_player)
            }
            MatchEvent::DieRolled { player, value } => write!(f, "{} rolled {}", player, value),
            MatchEvent::PlayerMoved { player, to, remaining, .. } => {
                write!(f, "{} moved to {} ({} left)", player, to, remaining)
            }
            MatchEvent::WallHit { player, wall, .. } => {
                write!(f, "{} hit a wall at {}", player, wall)
            }
            MatchEvent::ArtifactCollected { player, total, .. } => {
                write!(f, "{} collected an artifact ({} total)", player, total)
            }
            MatchEvent::PlayerWon { player } => write!(f, "{} wins!", player),
            MatchEvent::TurnPassed { to, .. } => write!(f, "{}'s turn", to),
        }
    }
}
