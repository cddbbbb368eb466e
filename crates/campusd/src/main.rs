use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match campusd::run_daemon() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            drop(writeln!(io::stderr(), "campusd: {error}"));
            ExitCode::FAILURE
        }
    }
}
