use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal classification of a position. Always derived from the
/// board, never stored back into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Checkmate,
    Stalemate,
    DrawInsufficientMaterial,
    DrawClaimable,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            GameStatus::InProgress => "in progress",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::DrawInsufficientMaterial => "draw (insufficient material)",
            GameStatus::DrawClaimable => "draw (claimable)",
        };
        write!(f, "{}", text)
    }
}
