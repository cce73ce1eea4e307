use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    match chess_tui::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("terminal error: {err}");
            ExitCode::FAILURE
        }
    }
}
