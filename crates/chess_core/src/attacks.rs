//! Attack geometry: which squares hold a given piece that could reach a
//! target square. Searches originate at the target and walk toward the
//! possible attackers, which models ray blocking for sliding pieces.

use crate::{
    piece::{Color, PieceType},
    Board, Piece, Position,
};

const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
const STRAIGHT_DIRECTIONS: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const ROYAL_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

fn matches_hints(pos: Position, file: Option<u8>, rank: Option<u8>) -> bool {
    file.map_or(true, |file| pos.file == file) && rank.map_or(true, |rank| pos.rank == rank)
}

/// Walk each direction outward from the target one square at a time. The
/// first occupied square stops the ray; it is a candidate only when it
/// holds the sought piece and satisfies the hints. A blocker of the wrong
/// identity still stops the ray.
fn sliding_origins(
    board: &Board,
    target: Position,
    piece: Piece,
    directions: &[(i8, i8)],
    file: Option<u8>,
    rank: Option<u8>,
) -> Vec<Position> {
    let mut found = Vec::new();
    for &(d_file, d_rank) in directions {
        let mut square = target;
        while let Some(next) = square.offset(d_file, d_rank) {
            square = next;
            if let Some(&occupant) = board.piece_at(square) {
                if occupant == piece && matches_hints(square, file, rank) {
                    found.push(square);
                }
                break;
            }
        }
    }
    found
}

/// Test each fixed offset from the target directly; no blocking applies.
fn stepping_origins(
    board: &Board,
    target: Position,
    piece: Piece,
    offsets: &[(i8, i8)],
    file: Option<u8>,
    rank: Option<u8>,
) -> Vec<Position> {
    offsets
        .iter()
        .filter_map(|&(d_file, d_rank)| target.offset(d_file, d_rank))
        .filter(|&square| matches_hints(square, file, rank))
        .filter(|&square| board.piece_at(square) == Some(&piece))
        .collect()
}

/// All squares occupied by exactly `piece` from which it could reach
/// `target` under its movement rule, ignoring whether the move would
/// expose the mover's own king. `file`/`rank` are optional disambiguation
/// hints from notation; they filter candidates but never affect blocking.
pub fn find_attackers(
    board: &Board,
    target: Position,
    piece: Piece,
    file: Option<u8>,
    rank: Option<u8>,
) -> Vec<Position> {
    match piece.piece_type {
        PieceType::Pawn => {
            // A pawn attacks diagonally forward, so an attacker sits one
            // rank behind the target relative to its own direction.
            let back = -piece.color.forward();
            let offsets = [(-1, back), (1, back)];
            stepping_origins(board, target, piece, &offsets, file, rank)
        }
        PieceType::Knight => stepping_origins(board, target, piece, &KNIGHT_OFFSETS, file, rank),
        PieceType::Bishop => {
            sliding_origins(board, target, piece, &DIAGONAL_DIRECTIONS, file, rank)
        }
        PieceType::Rook => sliding_origins(board, target, piece, &STRAIGHT_DIRECTIONS, file, rank),
        PieceType::Queen => sliding_origins(board, target, piece, &ROYAL_DIRECTIONS, file, rank),
        PieceType::King => stepping_origins(board, target, piece, &ROYAL_DIRECTIONS, file, rank),
    }
}

/// Whether any piece of `by_color` attacks `square`.
pub fn is_attacked(board: &Board, square: Position, by_color: Color) -> bool {
    PieceType::ALL.iter().any(|&piece_type| {
        !find_attackers(board, square, Piece::new(piece_type, by_color), None, None).is_empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(square: &str) -> Position {
        Position::from_algebraic(square).unwrap()
    }

    fn piece(piece_type: PieceType, color: Color) -> Piece {
        Piece::new(piece_type, color)
    }

    #[test]
    fn knights_attack_by_fixed_offsets() {
        let mut board = Board::new();
        board.place(pos("g1"), piece(PieceType::Knight, Color::White));
        board.place(pos("d2"), piece(PieceType::Knight, Color::White));
        board.place(pos("b1"), piece(PieceType::Knight, Color::White));

        let mut attackers =
            find_attackers(&board, pos("f3"), piece(PieceType::Knight, Color::White), None, None);
        attackers.sort_by_key(|p| (p.file, p.rank));
        assert_eq!(attackers, vec![pos("d2"), pos("g1")]);
    }

    #[test]
    fn sliding_rays_stop_at_the_first_occupant() {
        let mut board = Board::new();
        board.place(pos("a1"), piece(PieceType::Rook, Color::White));
        board.place(pos("a4"), piece(PieceType::Pawn, Color::White));

        // The pawn on a4 blocks the rook's line to a8.
        assert!(find_attackers(
            &board,
            pos("a8"),
            piece(PieceType::Rook, Color::White),
            None,
            None
        )
        .is_empty());

        // An open file is seen end to end.
        board.remove(pos("a4"));
        assert_eq!(
            find_attackers(&board, pos("a8"), piece(PieceType::Rook, Color::White), None, None),
            vec![pos("a1")]
        );
    }

    #[test]
    fn hints_filter_candidates_without_unblocking_rays() {
        let mut board = Board::new();
        board.place(pos("a1"), piece(PieceType::Rook, Color::White));
        board.place(pos("a5"), piece(PieceType::Rook, Color::White));

        // The a5 rook blocks the ray toward a1, so a rank hint selecting
        // a1 finds nothing rather than seeing through the blocker.
        assert!(find_attackers(
            &board,
            pos("a8"),
            piece(PieceType::Rook, Color::White),
            None,
            Some(0)
        )
        .is_empty());
        assert_eq!(
            find_attackers(&board, pos("a8"), piece(PieceType::Rook, Color::White), None, Some(4)),
            vec![pos("a5")]
        );
    }

    #[test]
    fn pawns_attack_diagonally_relative_to_color() {
        let mut board = Board::new();
        board.place(pos("d4"), piece(PieceType::Pawn, Color::White));
        board.place(pos("f6"), piece(PieceType::Pawn, Color::Black));

        // A white pawn on d4 attacks e5 from one rank below.
        assert_eq!(
            find_attackers(&board, pos("e5"), piece(PieceType::Pawn, Color::White), None, None),
            vec![pos("d4")]
        );
        // A black pawn on f6 attacks e5 from one rank above.
        assert_eq!(
            find_attackers(&board, pos("e5"), piece(PieceType::Pawn, Color::Black), None, None),
            vec![pos("f6")]
        );
        // Neither attacks straight ahead.
        assert!(find_attackers(
            &board,
            pos("d5"),
            piece(PieceType::Pawn, Color::White),
            None,
            None
        )
        .is_empty());
    }

    #[test]
    fn is_attacked_covers_every_piece_kind() {
        let mut board = Board::new();
        board.place(pos("c1"), piece(PieceType::Bishop, Color::Black));
        assert!(is_attacked(&board, pos("a3"), Color::Black));
        assert!(!is_attacked(&board, pos("a3"), Color::White));
        assert!(!is_attacked(&board, pos("b1"), Color::Black));
    }
}
