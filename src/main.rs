use std::io::{self, IsTerminal};
use std::process::ExitCode;

use bikeshare_explorer::{logging, ExplorerConfig, Session, TerminalInput};
use tracing::error;

fn main() -> ExitCode {
    logging::init();

    let config = ExplorerConfig::from_env();

    // Line editing on a terminal; plain line reads for piped input.
    let result = if io::stdin().is_terminal() {
        Session::new(&config, TerminalInput::new(), io::stdout().lock()).run()
    } else {
        Session::new(&config, io::stdin().lock(), io::stdout().lock()).run()
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "session aborted");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
