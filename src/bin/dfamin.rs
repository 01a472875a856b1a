//! Reads an automaton from stdin, minimizes it, and writes the quotient
//! automaton to stdout. See the crate's `io` module for the exact text
//! format. Honors `RUST_LOG` for diagnostics (e.g.
//! `RUST_LOG=dfamin=trace dfamin < input`); this is log-framework plumbing,
//! not an application setting — the tool itself takes no flags and reads no
//! other environment variables.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use dfamin::{io as dfa_io, minimize, DfaminErrorKind};

fn main() -> ExitCode {
    env_logger::init();

    let mut input = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut input) {
        eprintln!("dfamin: error reading stdin: {err}");
        return ExitCode::from(1);
    }

    let automaton = match dfa_io::read_automaton(&input) {
        Ok(automaton) => automaton,
        Err(err) => {
            eprintln!("dfamin: {err}");
            return ExitCode::from(exit_code_for(&err));
        }
    };

    let minimized = minimize(&automaton);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(err) = dfa_io::write_minimized(&mut handle, &minimized) {
        eprintln!("dfamin: error writing stdout: {err}");
        return ExitCode::from(1);
    }
    if let Err(err) = handle.flush() {
        eprintln!("dfamin: error flushing stdout: {err}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

/// Malformed input (parse errors, I/O errors) exits `1`; a validated but
/// inconsistent automaton (an out-of-range index) exits `2`.
fn exit_code_for(err: &dfamin::DfaminError) -> u8 {
    match *err.source {
        DfaminErrorKind::Parse(_) | DfaminErrorKind::Io(_) => 1,
        DfaminErrorKind::Invalid(_) => 2,
    }
}
