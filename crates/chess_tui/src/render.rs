//! Board rendering: Unicode figurines, dark squares in ANSI inverse
//! video, white and black perspectives printed side by side.

use std::fmt;

use chess_core::{Board, Color, Piece, Position};

const ANSI_INVERT: &str = "\x1b[0;0;7m";
const ANSI_RESET: &str = "\x1b[0m";

const HEADER_HEIGHT: usize = 2;
const CONTENT_HEIGHT: usize = 8;
const FOOTER_HEIGHT: usize = 1;
const BOARD_HEIGHT: usize = HEADER_HEIGHT + CONTENT_HEIGHT + FOOTER_HEIGHT;

fn invert(text: &str) -> String {
    format!("{ANSI_INVERT}{text}{ANSI_RESET}")
}

fn is_dark(square: Position) -> bool {
    (square.file + square.rank) % 2 == 0
}

/// The figurine drawn on a square. Dark squares are rendered in inverse
/// video, so the glyph is swapped to the opposite color's figurine to
/// come out looking right; the logical piece identity is untouched.
fn square_figurine(piece: Piece, dark: bool) -> char {
    if dark {
        Piece::new(piece.piece_type, piece.color.opposite()).figurine()
    } else {
        piece.figurine()
    }
}

fn board_lines(board: &Board, view: Color) -> [String; BOARD_HEIGHT] {
    let mut lines: [String; BOARD_HEIGHT] = Default::default();
    lines[0] = match view {
        Color::White => "       WHITE        ".to_owned(),
        Color::Black => "       BLACK        ".to_owned(),
    };
    let legend = match view {
        Color::White => "  a b c d e f g h   ",
        Color::Black => "  h g f e d c b a   ",
    };
    lines[1] = legend.to_owned();
    lines[BOARD_HEIGHT - 1] = legend.to_owned();

    for row in 0..8u8 {
        let rank = match view {
            Color::White => 7 - row,
            Color::Black => row,
        };
        let line = &mut lines[HEADER_HEIGHT + row as usize];
        line.push((b'1' + rank) as char);
        line.push(' ');
        for column in 0..8u8 {
            let file = match view {
                Color::White => column,
                Color::Black => 7 - column,
            };
            let square = Position { file, rank };
            let dark = is_dark(square);
            let cell = match board.piece_at(square) {
                Some(&piece) => format!("{} ", square_figurine(piece, dark)),
                None => "  ".to_owned(),
            };
            line.push_str(&if dark { invert(&cell) } else { cell });
        }
        line.push(' ');
        line.push((b'1' + rank) as char);
    }

    lines
}

/// Renders the board from both perspectives side by side, the way the
/// game prints it before each prompt.
pub struct BoardDisplay<'a> {
    pub board: &'a Board,
}

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let white = board_lines(self.board, Color::White);
        let black = board_lines(self.board, Color::Black);
        for (left, right) in white.iter().zip(black.iter()) {
            writeln!(f, "{left}   {right}")?;
        }
        Ok(())
    }
}
