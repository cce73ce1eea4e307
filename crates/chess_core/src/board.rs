use std::collections::HashMap;

use crate::{
    piece::{Color, PieceType},
    Piece, Position,
};

/// The 8x8 grid of pieces. Pure data and accessors; turn, castling
/// rights and history live on [`crate::Game`].
#[derive(Debug, Clone, Default)]
pub struct Board {
    pieces: HashMap<Position, Piece>,
}

impl Board {
    /// An empty board. Useful for setting up custom positions.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_position() -> Self {
        let mut board = Self::new();

        for file in 0..8 {
            board.place(Position { file, rank: 1 }, Piece::new(PieceType::Pawn, Color::White));
            board.place(Position { file, rank: 6 }, Piece::new(PieceType::Pawn, Color::Black));
        }

        let piece_order = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (file, &piece_type) in (0..8).zip(piece_order.iter()) {
            board.place(Position { file, rank: 0 }, Piece::new(piece_type, Color::White));
            board.place(Position { file, rank: 7 }, Piece::new(piece_type, Color::Black));
        }

        board
    }

    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.pieces.get(&pos)
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        !self.pieces.contains_key(&pos)
    }

    pub fn place(&mut self, pos: Position, piece: Piece) {
        self.pieces.insert(pos, piece);
    }

    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.pieces.remove(&pos)
    }

    /// All squares holding exactly this colored piece.
    pub fn find_pieces(&self, piece: Piece) -> Vec<Position> {
        let mut squares: Vec<Position> = self
            .pieces
            .iter()
            .filter(|(_, &candidate)| candidate == piece)
            .map(|(&pos, _)| pos)
            .collect();
        squares.sort_by_key(|pos| (pos.file, pos.rank));
        squares
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Position, &Piece)> {
        self.pieces.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_thirty_two_pieces() {
        let board = Board::starting_position();
        assert_eq!(board.iter().count(), 32);
        assert_eq!(
            board.piece_at(Position { file: 4, rank: 0 }),
            Some(&Piece::new(PieceType::King, Color::White))
        );
        assert_eq!(
            board.piece_at(Position { file: 3, rank: 7 }),
            Some(&Piece::new(PieceType::Queen, Color::Black))
        );
        assert!(board.is_empty(Position { file: 4, rank: 3 }));
    }

    #[test]
    fn find_pieces_matches_color_and_type() {
        let board = Board::starting_position();
        let white_rooks = board.find_pieces(Piece::new(PieceType::Rook, Color::White));
        assert_eq!(
            white_rooks,
            vec![Position { file: 0, rank: 0 }, Position { file: 7, rank: 0 }]
        );
        assert_eq!(
            board.find_pieces(Piece::new(PieceType::King, Color::Black)),
            vec![Position { file: 4, rank: 7 }]
        );
    }
}
