//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use collegiate_cli::CliError;

fn main() {
    match collegiate_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(parse_error)) => parse_error.exit(),
        Err(err) => {
            eprintln!("collegiate: {err}");
            std::process::exit(1);
        }
    }
}
