//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use daytrip_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "fatal errors are reported on the terminal before exiting"
)]
fn main() {
    env_logger::init();
    match daytrip_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("daytrip: {err}");
            std::process::exit(1);
        }
    }
}
