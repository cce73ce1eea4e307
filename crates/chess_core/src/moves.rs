use std::fmt;

use crate::{piece::PieceType, Piece, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    EnPassant,
    Castle,
}

/// A fully decoded move: produced by the notation decoder, consumed once
/// by the applier, then stored immutably in the game history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    /// The notation as entered by the player.
    pub notation: String,
    pub piece: Piece,
    pub from: Position,
    pub to: Position,
    /// The captured piece, if any. For en passant this is the bypassed
    /// pawn even though the destination square is empty.
    pub capture: Option<Piece>,
    pub promotion: Option<PieceType>,
    pub kind: MoveKind,
    /// Whether this move put the opponent in check. Filled in after the
    /// move is committed.
    pub check: bool,
}

impl Move {
    /// Whether this castle heads toward the queen side. Only meaningful
    /// for `MoveKind::Castle`.
    pub fn is_queen_side_castle(&self) -> bool {
        self.kind == MoveKind::Castle && self.to.file == 2
    }

    /// An unambiguous algebraic rendering of this move: castles keep
    /// their `O-O` form, pawn moves keep their shape, and piece moves
    /// carry the full origin square as disambiguator. Decoding the
    /// result on the same board yields this move again.
    pub fn canonical(&self) -> String {
        if self.kind == MoveKind::Castle {
            return if self.is_queen_side_castle() {
                "O-O-O".to_owned()
            } else {
                "O-O".to_owned()
            };
        }
        let mut notation = String::new();
        if self.piece.piece_type == PieceType::Pawn {
            if self.capture.is_some() {
                notation.push((b'a' + self.from.file) as char);
                notation.push('x');
            }
            notation.push_str(&self.to.to_string());
            if let Some(promotion) = self.promotion {
                notation.push('=');
                notation.push(promotion.letter());
            }
        } else {
            notation.push(self.piece.piece_type.letter());
            notation.push_str(&self.from.to_string());
            if self.capture.is_some() {
                notation.push('x');
            }
            notation.push_str(&self.to.to_string());
        }
        notation
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation)
    }
}
