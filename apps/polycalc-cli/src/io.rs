//! Output and error sinks.
//!
//! Grounded on `logicaffeine_system::io`'s `print`/`println`/`eprintln`
//! facade: a thin wrapper over `std::io`, no logging crate. The calculator's
//! error channel additionally carries the 1-indexed line number, per §6.

use std::fmt::Display;

/// Writes a query/print result line to stdout.
pub fn emit_output(line: impl Display) {
    println!("{}", line);
}

/// Writes one of the fixed error messages to stderr, tagged with the
/// 1-indexed line number that produced it.
pub fn emit_error(line_no: usize, message: impl Display) {
    eprintln!("ERROR {} {}", line_no, message);
}
