//! Terminal front end: the interactive move loop around the rules
//! engine. Reads whitespace-separated tokens, plays them through the
//! decode -> validate -> apply pipeline, and re-prompts on failure.

mod render;

pub use render::BoardDisplay;

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use chess_core::{Color, Game, Move};
use log::info;

/// Run the game over standard input and output until exit.
pub fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_loop(&mut stdin.lock(), &mut stdout.lock())
}

/// Prompt for and return the next input token. Returns `None` on
/// end-of-input or an empty line, both of which mean exit.
fn next_token<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    pending: &mut VecDeque<String>,
    turn: Color,
) -> io::Result<Option<String>> {
    if let Some(token) = pending.pop_front() {
        return Ok(Some(token));
    }
    write!(output, "{turn}> ")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    pending.extend(line.split_whitespace().map(str::to_owned));
    Ok(pending.pop_front())
}

fn write_history<W: Write>(output: &mut W, history: &[Move]) -> io::Result<()> {
    for (number, pair) in history.chunks(2).enumerate() {
        match pair {
            [white, black] => writeln!(output, "{}.\t{}\t{}", number + 1, white, black)?,
            [white] => writeln!(output, "{}.\t{}", number + 1, white)?,
            _ => {}
        }
    }
    Ok(())
}

/// The turn-based request/response loop: render the board, read one
/// token, fully resolve it before reading the next. Illegal moves are
/// reported and the same side is re-prompted; only `exit`/`quit`, an
/// empty line, or end-of-input terminate.
pub fn run_loop<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<()> {
    let mut game = Game::new();
    let mut pending = VecDeque::new();
    let mut exit = false;

    while !exit {
        if game.turn() == Color::White {
            writeln!(
                output,
                "                {{ Move {} }}",
                game.history().len() / 2 + 1
            )?;
        }
        writeln!(output)?;
        write!(output, "{}", BoardDisplay { board: game.board() })?;
        writeln!(output)?;

        loop {
            let Some(token) = next_token(input, output, &mut pending, game.turn())? else {
                exit = true;
                break;
            };
            match token.as_str() {
                "exit" | "quit" => {
                    exit = true;
                    break;
                }
                "restart" | "reset" => {
                    info!("restarting the game");
                    game = Game::new();
                    break;
                }
                token if token.starts_with("sum") || token.starts_with("hist") => {
                    write_history(output, game.history())?;
                }
                token => match game.play(token) {
                    Ok(mv) => {
                        if mv.check {
                            writeln!(output, "Check.")?;
                        }
                        break;
                    }
                    Err(err) => writeln!(output, "Invalid move: {err}")?,
                },
            }
        }
        writeln!(output)?;
    }

    writeln!(output, "\nBye.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        run_loop(&mut input, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn exits_on_end_of_input_with_a_farewell() {
        let output = run_script("");
        assert!(output.contains("White> "));
        assert!(output.ends_with("\nBye.\n"));
    }

    #[test]
    fn plays_moves_and_reports_illegal_ones() {
        let output = run_script("e4\ne5\nKe3\nexit\n");
        assert!(output.contains("Black> "));
        assert!(output.contains("{ Move 2 }"));
        assert!(output.contains("Invalid move:"));
        assert!(output.ends_with("\nBye.\n"));
    }

    #[test]
    fn history_command_prints_numbered_pairs() {
        let output = run_script("e4 e5 Nf3\nhist\nquit\n");
        assert!(output.contains("1.\te4\te5"));
        assert!(output.contains("2.\tNf3"));
    }

    #[test]
    fn restart_returns_to_the_first_move() {
        let output = run_script("e4\ne5\nrestart\nexit\n");
        let banners = output.matches("{ Move 1 }").count();
        assert!(banners >= 2, "{output}");
    }

    #[test]
    fn announces_check() {
        // 1. e4 e5 2. Qh5 Nc6 3. Qxf7+
        let output = run_script("e4 e5 Qh5 Nc6 Qxf7\nexit\n");
        assert!(output.contains("Check."));
    }
}
