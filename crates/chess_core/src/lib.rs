// Core chess rules engine: board model, attack geometry, algebraic
// notation decoding, and the decode -> validate -> apply pipeline.
pub mod attacks;
pub mod board;
pub mod game;
pub mod moves;
pub mod notation;
pub mod piece;
pub mod position;

// Re-export main types for convenience
pub use board::Board;
pub use game::{CastlingRights, Game};
pub use moves::{Move, MoveKind};
pub use notation::{decode_move, DecodeError};
pub use piece::{Color, Piece, PieceType};
pub use position::Position;
