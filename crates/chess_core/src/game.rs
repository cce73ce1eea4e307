use log::{debug, warn};

use crate::{
    attacks::is_attacked,
    moves::MoveKind,
    notation::{decode_move, DecodeError},
    piece::{Color, PieceType},
    Board, Move, Piece, Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }
}

impl CastlingRights {
    pub fn available(&self, color: Color, queen_side: bool) -> bool {
        match (color, queen_side) {
            (Color::White, false) => self.white_kingside,
            (Color::White, true) => self.white_queenside,
            (Color::Black, false) => self.black_kingside,
            (Color::Black, true) => self.black_queenside,
        }
    }

    /// Rights never come back once lost.
    fn revoke(&mut self, color: Color, queen_side: bool) {
        match (color, queen_side) {
            (Color::White, false) => self.white_kingside = false,
            (Color::White, true) => self.white_queenside = false,
            (Color::Black, false) => self.black_kingside = false,
            (Color::Black, true) => self.black_queenside = false,
        }
    }

    fn revoke_both(&mut self, color: Color) {
        self.revoke(color, false);
        self.revoke(color, true);
    }
}

/// A game in progress: the board, the applied moves in order, whose turn
/// it is, and the remaining castling rights. Mutated only through the
/// decode, validate, apply pipeline of [`Game::play`].
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: Vec<Move>,
    turn: Color,
    castling: CastlingRights,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// The standard starting position, White to move.
    pub fn new() -> Self {
        Self::from_position(Board::starting_position(), Color::White)
    }

    /// A game from an arbitrary position with full castling rights and
    /// an empty history.
    pub fn from_position(board: Board, turn: Color) -> Self {
        Self {
            board,
            history: Vec::new(),
            turn,
            castling: CastlingRights::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn castling_rights(&self) -> &CastlingRights {
        &self.castling
    }

    /// Whether the king of `color` is currently attacked.
    ///
    /// # Panics
    ///
    /// Panics when the board does not hold exactly one king of `color`.
    /// That is a corrupted game state, not a user mistake.
    pub fn is_in_check(&self, color: Color) -> bool {
        let kings = self.board.find_pieces(Piece::new(PieceType::King, color));
        match kings.as_slice() {
            [king] => is_attacked(&self.board, *king, color.opposite()),
            _ => panic!(
                "the board must hold exactly one {} king, found {}",
                color,
                kings.len()
            ),
        }
    }

    /// Decode a notation token, test it on a copy of the game, and commit
    /// it only when the mover's own king is safe afterwards. On success
    /// the returned move carries whether it gave check.
    pub fn play(&mut self, token: &str) -> Result<&Move, DecodeError> {
        let mv = decode_move(self, token)?;
        let mut next = self.clone();
        next.apply(mv);
        if next.is_in_check(self.turn) {
            warn!("rejected '{token}': the mover's king would remain attacked");
            return Err(DecodeError::SelfCheck);
        }
        let gives_check = next.is_in_check(next.turn);
        if let Some(last) = next.history.last_mut() {
            last.check = gives_check;
        }
        *self = next;
        Ok(self
            .history
            .last()
            .expect("a move was committed to history"))
    }

    /// Execute an already-decoded move. Legality is the caller's
    /// responsibility; this only mutates state.
    fn apply(&mut self, mv: Move) {
        let piece = self
            .board
            .remove(mv.from)
            .expect("decoded move origin must be occupied");

        // An en-passant capture removes the bypassed pawn, which sits on
        // the origin's rank below/above the destination square.
        if mv.kind == MoveKind::EnPassant {
            self.board.remove(Position {
                file: mv.to.file,
                rank: mv.from.rank,
            });
        }

        let placed = match mv.promotion {
            Some(promotion) => Piece::new(promotion, piece.color),
            None => piece,
        };
        self.board.place(mv.to, placed);

        if piece.piece_type == PieceType::King {
            if mv.from.file.abs_diff(mv.to.file) == 2 {
                let rank = mv.to.rank;
                let (rook_from, rook_to) = if mv.to.file == 2 {
                    (Position { file: 0, rank }, Position { file: 3, rank })
                } else {
                    (Position { file: 7, rank }, Position { file: 5, rank })
                };
                if let Some(rook) = self.board.remove(rook_from) {
                    self.board.place(rook_to, rook);
                }
            }
            self.castling.revoke_both(piece.color);
        } else if piece.piece_type == PieceType::Rook && mv.from.rank == piece.color.home_rank() {
            match mv.from.file {
                0 => self.castling.revoke(piece.color, true),
                7 => self.castling.revoke(piece.color, false),
                _ => {}
            }
        }

        debug!("applied {} {} -> {}", piece, mv.from, mv.to);
        self.history.push(mv);
        self.turn = self.turn.opposite();
    }
}
