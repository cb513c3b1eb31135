use crate::core::GameStatus;
use anyhow::Context;
use shakmaty::fen::Fen;
use shakmaty::uci::Uci;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{
    CastlingMode, CastlingSide, Chess, Color, EnPassantMode, Move, MoveList, Piece, Position,
    Role, Square,
};

/// Authoritative game position: the rules engine's state plus the
/// hash history needed for repetition claims. Created once per
/// session and mutated in place by validated moves only.
#[derive(Debug, Clone)]
pub struct Board {
    position: Chess,
    history: Vec<Zobrist64>,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    pub fn new() -> Self {
        let position = Chess::default();
        let hash = position.zobrist_hash(EnPassantMode::Legal);
        Board {
            position,
            history: vec![hash],
        }
    }

    pub fn from_fen(fen: &str) -> anyhow::Result<Self> {
        let position: Chess = fen
            .parse::<Fen>()
            .with_context(|| format!("invalid FEN: {}", fen))?
            .into_position(CastlingMode::Standard)
            .map_err(|err| anyhow::anyhow!("illegal position: {}: {}", fen, err))?;
        let hash = position.zobrist_hash(EnPassantMode::Legal);
        Ok(Board {
            position,
            history: vec![hash],
        })
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.board().piece_at(square)
    }

    pub fn legal_moves(&self) -> MoveList {
        self.position.legal_moves()
    }

    pub fn is_legal(&self, mv: &Move) -> bool {
        self.position.is_legal(mv)
    }

    /// The legal move from one square to another, if there is one.
    /// A pair that corresponds to a promotion resolves to the queen
    /// promotion; castling matches the king's destination square as
    /// well as the rook's.
    pub fn find_move(&self, from: Square, to: Square) -> Option<Move> {
        let candidates: Vec<Move> = self
            .legal_moves()
            .into_iter()
            .filter(|m| m.from() == Some(from) && (m.to() == to || click_target(m) == to))
            .collect();
        if candidates.len() > 1 {
            candidates
                .iter()
                .find(|m| m.promotion() == Some(Role::Queen))
                .or_else(|| candidates.first())
                .cloned()
        } else {
            candidates.into_iter().next()
        }
    }

    /// Legal destination squares of the piece standing on `from`.
    pub fn destinations_from(&self, from: Square) -> Vec<Square> {
        self.legal_moves()
            .iter()
            .filter(|m| m.from() == Some(from))
            .map(click_target)
            .collect()
    }

    /// Applies a move that already passed a legality check.
    pub fn play(&mut self, mv: &Move) {
        debug_assert!(self.is_legal(mv));
        self.position.play_unchecked(mv);
        self.history
            .push(self.position.zobrist_hash(EnPassantMode::Legal));
    }

    /// Terminal classification, evaluated in a fixed order: mate and
    /// stalemate are authoritative over a merely claimable draw.
    pub fn status(&self) -> GameStatus {
        if self.position.is_checkmate() {
            GameStatus::Checkmate
        } else if self.position.is_stalemate() {
            GameStatus::Stalemate
        } else if self.position.is_insufficient_material() {
            GameStatus::DrawInsufficientMaterial
        } else if self.can_claim_draw() {
            GameStatus::DrawClaimable
        } else {
            GameStatus::InProgress
        }
    }

    /// Fifty-move rule or threefold repetition.
    fn can_claim_draw(&self) -> bool {
        self.position.halfmoves() >= 100 || self.is_threefold()
    }

    fn is_threefold(&self) -> bool {
        let current: Zobrist64 = self.position.zobrist_hash(EnPassantMode::Legal);
        self.history.iter().filter(|&&h| h == current).count() >= 3
    }

    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    /// Parses an engine reply in UCI notation against the current
    /// position. Fails if the move is not legal here.
    pub fn parse_uci(&self, text: &str) -> anyhow::Result<Move> {
        let uci: Uci = text
            .parse()
            .with_context(|| format!("unparsable engine move: {:?}", text))?;
        let mv = uci
            .to_move(&self.position)
            .with_context(|| format!("illegal engine move: {:?}", text))?;
        Ok(mv)
    }
}

/// Destination square as the user sees it. The rules engine encodes
/// castling as king-takes-rook, but the click lands where the king
/// ends up.
fn click_target(mv: &Move) -> Square {
    match *mv {
        Move::Castle { king, rook } => {
            let side = if rook.file() > king.file() {
                CastlingSide::KingSide
            } else {
                CastlingSide::QueenSide
            };
            Square::from_coords(side.king_to_file(), king.rank())
        }
        _ => mv.to(),
    }
}
