//! Algebraic-notation decoding: classify a token by its character shape,
//! then resolve it into a fully-specified [`Move`] against the current
//! board and turn.

use log::debug;
use thiserror::Error;

use crate::{
    attacks::{find_attackers, is_attacked},
    moves::MoveKind,
    piece::{Color, PieceType},
    Game, Move, Piece, Position,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("'{0}' is not a known move format (do not add decorations like + or #)")]
    UnknownFormat(String),
    #[error("'{0}' is not a valid promotion piece")]
    InvalidPromotion(char),
    #[error("there is no eligible pawn to move to {0}")]
    NoEligiblePawn(Position),
    #[error("no eligible pawn on {0}")]
    NoPawnOn(Position),
    #[error("{0} is blocked, pawns can only capture diagonally")]
    PushBlocked(Position),
    #[error("a capturing pawn must move exactly one square diagonally")]
    NonDiagonalPawnCapture,
    #[error("there is nothing to capture on {0}")]
    NothingToCapture(Position),
    #[error("cannot capture your own piece on {0}")]
    OwnPiece(Position),
    #[error("{0} is occupied by your own piece")]
    OccupiedByOwnPiece(Position),
    #[error("{0} is occupied, add 'x' to capture")]
    NeedsCaptureNotation(Position),
    #[error("cannot capture en passant, the opposing pawn moved too long ago")]
    EnPassantExpired,
    #[error("no {piece_type} can reach {to}")]
    NoCandidate { piece_type: PieceType, to: Position },
    #[error("ambiguous move, more than one {piece_type} can reach {to}")]
    AmbiguousMove { piece_type: PieceType, to: Position },
    #[error("the pawn reaches the final rank and must be promoted")]
    PromotionRequired,
    #[error("can only promote on the final rank")]
    PromotionNotAllowed,
    #[error("you can no longer castle on this side, the king or rook has already moved")]
    CastlingRightLost,
    #[error("you cannot castle on this side of the board right now")]
    CastlingBlocked,
    #[error("the king cannot castle out of or through check")]
    CastlingThroughCheck,
    #[error("you are in check")]
    SelfCheck,
}

/// The structural pattern of a notation token, before any board state is
/// consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenShape {
    /// `e4`, `e8=Q`
    PawnPush {
        to: Position,
        promotion: Option<PieceType>,
    },
    /// `dxe4`, `dxe8=Q`
    PawnCapture {
        from_file: u8,
        to: Position,
        promotion: Option<PieceType>,
    },
    /// `Nf3`, `Qxe4`, `Qde4`, `Q3xe4`, `Qd3xe4`
    PieceMove {
        piece_type: PieceType,
        file_hint: Option<u8>,
        rank_hint: Option<u8>,
        captures: bool,
        to: Position,
    },
    /// `O-O`, `O-O-O`, case-insensitive, `0` accepted, hyphens optional
    Castle { queen_side: bool },
}

fn unknown(token: &str) -> DecodeError {
    DecodeError::UnknownFormat(token.to_owned())
}

/// An optional promotion suffix: empty, or `[=]?[NBRQ]`.
fn classify_promotion(suffix: &str, token: &str) -> Result<Option<PieceType>, DecodeError> {
    let suffix = suffix.strip_prefix('=').unwrap_or(suffix);
    let mut chars = suffix.chars();
    let Some(letter) = chars.next() else {
        return Ok(None);
    };
    if chars.next().is_some() {
        return Err(unknown(token));
    }
    match PieceType::from_letter(letter) {
        Some(
            promotion @ (PieceType::Knight
            | PieceType::Bishop
            | PieceType::Rook
            | PieceType::Queen),
        ) => Ok(Some(promotion)),
        Some(_) => Err(DecodeError::InvalidPromotion(letter)),
        None => Err(unknown(token)),
    }
}

fn classify_castle(token: &str) -> Result<TokenShape, DecodeError> {
    let kings: String = token
        .chars()
        .filter(|&c| c != '-')
        .map(|c| c.to_ascii_uppercase())
        .map(|c| if c == '0' { 'O' } else { c })
        .collect();
    match kings.as_str() {
        "OO" => Ok(TokenShape::Castle { queen_side: false }),
        "OOO" => Ok(TokenShape::Castle { queen_side: true }),
        _ => Err(unknown(token)),
    }
}

/// Classify a token by length and character classes alone. Board state is
/// not consulted here; every ambiguity that needs the board is resolved
/// by the per-shape decoders below.
fn classify(token: &str) -> Result<TokenShape, DecodeError> {
    if !token.is_ascii() || token.len() < 2 {
        return Err(unknown(token));
    }
    if token
        .chars()
        .all(|c| matches!(c, 'O' | 'o' | '0' | '-'))
    {
        return classify_castle(token);
    }

    let bytes = token.as_bytes();
    match bytes[0] {
        b'a'..=b'h' if bytes.get(1) == Some(&b'x') => {
            if token.len() < 4 {
                return Err(unknown(token));
            }
            let to = Position::from_algebraic(&token[2..4]).ok_or_else(|| unknown(token))?;
            Ok(TokenShape::PawnCapture {
                from_file: bytes[0] - b'a',
                to,
                promotion: classify_promotion(&token[4..], token)?,
            })
        }
        b'a'..=b'h' => {
            let to = Position::from_algebraic(&token[..2]).ok_or_else(|| unknown(token))?;
            Ok(TokenShape::PawnPush {
                to,
                promotion: classify_promotion(&token[2..], token)?,
            })
        }
        b'K' | b'Q' | b'R' | b'B' | b'N' => {
            if token.len() < 3 {
                return Err(unknown(token));
            }
            let piece_type =
                PieceType::from_letter(bytes[0] as char).ok_or_else(|| unknown(token))?;
            let to = Position::from_algebraic(&token[token.len() - 2..])
                .ok_or_else(|| unknown(token))?;
            let mut middle = token[1..token.len() - 2].chars().peekable();
            let file_hint = middle
                .next_if(|c| ('a'..='h').contains(c))
                .map(|c| c as u8 - b'a');
            let rank_hint = middle
                .next_if(|c| ('1'..='8').contains(c))
                .map(|c| c as u8 - b'1');
            let captures = middle.next_if_eq(&'x').is_some();
            if middle.next().is_some() {
                return Err(unknown(token));
            }
            Ok(TokenShape::PieceMove {
                piece_type,
                file_hint,
                rank_hint,
                captures,
                to,
            })
        }
        _ => Err(unknown(token)),
    }
}

/// A promotion piece must be supplied exactly when the pawn reaches the
/// final rank for its color.
fn check_promotion(
    turn: Color,
    to: Position,
    promotion: Option<PieceType>,
) -> Result<Option<PieceType>, DecodeError> {
    let must_promote = to.rank == turn.promotion_rank();
    match (must_promote, promotion) {
        (true, None) => Err(DecodeError::PromotionRequired),
        (false, Some(_)) => Err(DecodeError::PromotionNotAllowed),
        _ => Ok(promotion),
    }
}

fn decode_pawn_push(
    game: &Game,
    token: &str,
    to: Position,
    promotion: Option<PieceType>,
) -> Result<Move, DecodeError> {
    let turn = game.turn();
    let board = game.board();
    let pawn = Piece::new(PieceType::Pawn, turn);
    let forward = turn.forward();

    let one_back = to
        .offset(0, -forward)
        .ok_or(DecodeError::NoEligiblePawn(to))?;
    let from = if board.piece_at(one_back) == Some(&pawn) {
        one_back
    } else {
        let double_step_rank = match turn {
            Color::White => 3,
            Color::Black => 4,
        };
        match to.offset(0, -2 * forward) {
            Some(two_back)
                if to.rank == double_step_rank
                    && board.is_empty(one_back)
                    && board.piece_at(two_back) == Some(&pawn) =>
            {
                two_back
            }
            _ => return Err(DecodeError::NoEligiblePawn(to)),
        }
    };

    // Pawns never push into an occupied square, not even an enemy one.
    if !board.is_empty(to) {
        return Err(DecodeError::PushBlocked(to));
    }

    Ok(Move {
        notation: token.to_owned(),
        piece: pawn,
        from,
        to,
        capture: None,
        promotion: check_promotion(turn, to, promotion)?,
        kind: MoveKind::Normal,
        check: false,
    })
}

fn decode_pawn_capture(
    game: &Game,
    token: &str,
    from_file: u8,
    to: Position,
    promotion: Option<PieceType>,
) -> Result<Move, DecodeError> {
    let turn = game.turn();
    let board = game.board();
    let pawn = Piece::new(PieceType::Pawn, turn);
    let forward = turn.forward();

    let d_file = from_file as i8 - to.file as i8;
    if d_file.abs() != 1 {
        return Err(DecodeError::NonDiagonalPawnCapture);
    }
    let from = to
        .offset(d_file, -forward)
        .ok_or(DecodeError::NoEligiblePawn(to))?;
    if board.piece_at(from) != Some(&pawn) {
        return Err(DecodeError::NoPawnOn(from));
    }

    let (capture, kind) = match board.piece_at(to) {
        Some(&target) => (target, MoveKind::Normal),
        None => {
            // The destination is empty: this can only be en passant. The
            // bypassed pawn sits directly behind the destination and must
            // be the immediately preceding move's double step.
            let enemy_pawn = Piece::new(PieceType::Pawn, turn.opposite());
            let bypassed = to.offset(0, -forward);
            let double_step_from = to.offset(0, forward);
            match (bypassed, double_step_from) {
                (Some(bypassed), Some(double_step_from))
                    if board.piece_at(bypassed) == Some(&enemy_pawn) =>
                {
                    let previous = game.history().last();
                    let just_double_stepped = previous.is_some_and(|previous| {
                        previous.piece == enemy_pawn
                            && previous.to == bypassed
                            && previous.from == double_step_from
                    });
                    if !just_double_stepped {
                        return Err(DecodeError::EnPassantExpired);
                    }
                    (enemy_pawn, MoveKind::EnPassant)
                }
                _ => return Err(DecodeError::NothingToCapture(to)),
            }
        }
    };
    if capture.color == turn {
        return Err(DecodeError::OwnPiece(to));
    }

    Ok(Move {
        notation: token.to_owned(),
        piece: pawn,
        from,
        to,
        capture: Some(capture),
        promotion: check_promotion(turn, to, promotion)?,
        kind,
        check: false,
    })
}

fn decode_piece_move(
    game: &Game,
    token: &str,
    piece_type: PieceType,
    file_hint: Option<u8>,
    rank_hint: Option<u8>,
    captures: bool,
    to: Position,
) -> Result<Move, DecodeError> {
    let turn = game.turn();
    let board = game.board();
    let piece = Piece::new(piece_type, turn);

    let candidates = find_attackers(board, to, piece, file_hint, rank_hint);
    let from = match candidates.as_slice() {
        [only] => *only,
        [] => return Err(DecodeError::NoCandidate { piece_type, to }),
        _ => return Err(DecodeError::AmbiguousMove { piece_type, to }),
    };

    let capture = board.piece_at(to).copied();
    if captures {
        match capture {
            None => return Err(DecodeError::NothingToCapture(to)),
            Some(target) if target.color == turn => return Err(DecodeError::OwnPiece(to)),
            Some(_) => {}
        }
    } else if let Some(target) = capture {
        return Err(if target.color == turn {
            DecodeError::OccupiedByOwnPiece(to)
        } else {
            DecodeError::NeedsCaptureNotation(to)
        });
    }

    Ok(Move {
        notation: token.to_owned(),
        piece,
        from,
        to,
        capture,
        promotion: None,
        kind: MoveKind::Normal,
        check: false,
    })
}

fn decode_castle(game: &Game, token: &str, queen_side: bool) -> Result<Move, DecodeError> {
    let turn = game.turn();
    let board = game.board();
    let rights = game.castling_rights();

    if !rights.available(turn, queen_side) {
        return Err(DecodeError::CastlingRightLost);
    }

    let rank = turn.home_rank();
    let king_home = Position { file: 4, rank };
    let rook_home = Position {
        file: if queen_side { 0 } else { 7 },
        rank,
    };
    let king = Piece::new(PieceType::King, turn);
    let rook = Piece::new(PieceType::Rook, turn);
    if board.piece_at(king_home) != Some(&king) || board.piece_at(rook_home) != Some(&rook) {
        return Err(DecodeError::CastlingBlocked);
    }
    let between: &[u8] = if queen_side { &[1, 2, 3] } else { &[5, 6] };
    if between
        .iter()
        .any(|&file| !board.is_empty(Position { file, rank }))
    {
        return Err(DecodeError::CastlingBlocked);
    }
    // The king may not castle out of, through, or into check.
    let transit: [u8; 3] = if queen_side { [4, 3, 2] } else { [4, 5, 6] };
    if transit
        .iter()
        .any(|&file| is_attacked(board, Position { file, rank }, turn.opposite()))
    {
        return Err(DecodeError::CastlingThroughCheck);
    }

    Ok(Move {
        notation: token.to_owned(),
        piece: king,
        from: king_home,
        to: Position {
            file: if queen_side { 2 } else { 6 },
            rank,
        },
        capture: None,
        promotion: None,
        kind: MoveKind::Castle,
        check: false,
    })
}

/// Resolve an algebraic-notation token into a [`Move`] against the
/// current game state. Legality with respect to the mover's own king is
/// not checked here; that is the caller's gate.
pub fn decode_move(game: &Game, token: &str) -> Result<Move, DecodeError> {
    let decoded = match classify(token)? {
        TokenShape::PawnPush { to, promotion } => decode_pawn_push(game, token, to, promotion),
        TokenShape::PawnCapture {
            from_file,
            to,
            promotion,
        } => decode_pawn_capture(game, token, from_file, to, promotion),
        TokenShape::PieceMove {
            piece_type,
            file_hint,
            rank_hint,
            captures,
            to,
        } => decode_piece_move(game, token, piece_type, file_hint, rank_hint, captures, to),
        TokenShape::Castle { queen_side } => decode_castle(game, token, queen_side),
    }?;
    debug!(
        "decoded '{}' as {} {} -> {}",
        token, decoded.piece, decoded.from, decoded.to
    );
    Ok(decoded)
}
