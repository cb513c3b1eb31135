use crate::core::GameStatus;
use crate::logic::Board;
use anyhow::bail;
use shakmaty::{Color, Move, Square};

/// Where the controller stands in the turn cycle. Clicks are only
/// honored in `AwaitingHuman`; in every other phase they are dropped
/// on the floor rather than queued, which is what keeps the human and
/// the engine from ever writing to the board at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingHuman,
    ApplyingHumanMove,
    AwaitingEngine,
    ApplyingEngineMove,
    GameOver,
    /// The engine went away or answered garbage. Distinct from
    /// `GameOver`: the game did not finish, the session did.
    Faulted,
}

/// What a click ended up doing, for the caller's rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Selected(Square),
    SelectionCleared,
    MovePlayed,
}

/// The turn controller. Owns the board, the current selection and the
/// phase; everything mutating the board goes through here.
pub struct Game {
    board: Board,
    phase: TurnPhase,
    status: GameStatus,
    selection: Option<Square>,
    last_move: Option<Move>,
    human: Color,
}

impl Game {
    /// Standard initial arrangement, human playing White.
    pub fn new() -> Self {
        Game::with_board(Board::new())
    }

    pub fn with_board(board: Board) -> Self {
        let human = Color::White;
        let phase = if board.turn() == human {
            TurnPhase::AwaitingHuman
        } else {
            TurnPhase::AwaitingEngine
        };
        let status = board.status();
        Game {
            board,
            phase: if status.is_terminal() {
                TurnPhase::GameOver
            } else {
                phase
            },
            status,
            selection: None,
            last_move: None,
            human,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn selection(&self) -> Option<Square> {
        self.selection
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    pub fn human_color(&self) -> Color {
        self.human
    }

    /// Legal destinations of the selected piece, for highlighting.
    pub fn selected_targets(&self) -> Vec<Square> {
        self.selection
            .map(|sq| self.board.destinations_from(sq))
            .unwrap_or_default()
    }

    pub fn wants_engine_move(&self) -> bool {
        self.phase == TurnPhase::AwaitingEngine
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, TurnPhase::GameOver | TurnPhase::Faulted)
    }

    /// Feeds one click into the selection machinery. The first click
    /// picks up a piece of the side to move; the second click attempts
    /// the move and always drops the selection, legal or not.
    pub fn on_square_clicked(&mut self, square: Square) -> ClickOutcome {
        if self.phase != TurnPhase::AwaitingHuman {
            return ClickOutcome::Ignored;
        }
        match self.selection.take() {
            None => match self.board.piece_at(square) {
                Some(piece) if piece.color == self.board.turn() => {
                    self.selection = Some(square);
                    ClickOutcome::Selected(square)
                }
                _ => ClickOutcome::Ignored,
            },
            Some(origin) => {
                if self.try_human_move(origin, square) {
                    ClickOutcome::MovePlayed
                } else {
                    ClickOutcome::SelectionCleared
                }
            }
        }
    }

    fn try_human_move(&mut self, from: Square, to: Square) -> bool {
        let mv = match self.board.find_move(from, to) {
            Some(mv) => mv,
            None => return false,
        };
        self.phase = TurnPhase::ApplyingHumanMove;
        self.board.play(&mv);
        self.last_move = Some(mv);
        self.finish_half_move(TurnPhase::AwaitingEngine);
        true
    }

    /// Applies the engine's reply. The reply is validated against the
    /// current position before anything is mutated; a failure leaves
    /// the board exactly as it was and parks the controller in
    /// `Faulted`.
    pub fn apply_engine_reply(&mut self, reply: &str) -> anyhow::Result<()> {
        if self.phase != TurnPhase::AwaitingEngine {
            bail!("engine reply arrived outside of the engine's turn");
        }
        let mv = match self.board.parse_uci(reply) {
            Ok(mv) => mv,
            Err(err) => {
                self.phase = TurnPhase::Faulted;
                return Err(err);
            }
        };
        self.phase = TurnPhase::ApplyingEngineMove;
        self.board.play(&mv);
        self.last_move = Some(mv);
        self.finish_half_move(TurnPhase::AwaitingHuman);
        Ok(())
    }

    /// Transport-level adapter failure: no reply at all.
    pub fn fault(&mut self) {
        self.phase = TurnPhase::Faulted;
    }

    /// Status check shared by both halves of the turn cycle. Once a
    /// terminal status is recorded the board is never touched again.
    fn finish_half_move(&mut self, next: TurnPhase) {
        self.status = self.board.status();
        self.phase = if self.status.is_terminal() {
            TurnPhase::GameOver
        } else {
            next
        };
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
