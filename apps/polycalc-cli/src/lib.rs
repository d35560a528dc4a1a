//! Line-oriented stack calculator for sparse multivariate polynomials.
//!
//! `main.rs` is a thin wrapper around [`run`]: it owns nothing but stdin and
//! stdout/stderr, matching `apps/logicaffeine_cli`'s lib/bin split.

pub mod exec;
pub mod io;
pub mod parser;

use std::io::BufRead;

use polycalc_kernel::PolyStack;

use exec::ExecError;
use parser::{Line, ParseError};

/// Reads every line from `input`, 1-indexed, and drives the stack
/// calculator to completion.
///
/// A per-line error is reported on the error sink and the line is otherwise
/// skipped — it never aborts the loop. The only thing that can stop this
/// early is allocation failure inside the kernel itself, which aborts the
/// process per the host allocator's default policy, not code in this crate.
pub fn run(input: impl BufRead) {
    let mut stack = PolyStack::new();
    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                io::emit_error(line_no, format_args!("{}", e));
                continue;
            }
        };
        process_line(&mut stack, line_no, &line);
    }
}

fn process_line(stack: &mut PolyStack, line_no: usize, line: &str) {
    let parsed = match parser::parse_line(line) {
        Ok(parsed) => parsed,
        Err(e) => return report_parse_error(line_no, e),
    };
    match parsed {
        Line::Blank => {}
        Line::Push(p) => stack.push(p),
        Line::Command(cmd) => match exec::execute(stack, cmd) {
            Ok(Some(out)) => io::emit_output(out),
            Ok(None) => {}
            Err(e) => report_exec_error(line_no, e),
        },
    }
    stack.shrink();
}

fn report_parse_error(line_no: usize, e: ParseError) {
    io::emit_error(line_no, e);
}

fn report_exec_error(line_no: usize, e: ExecError) {
    io::emit_error(line_no, e);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_does_not_touch_stack() {
        let mut stack = PolyStack::new();
        process_line(&mut stack, 1, "");
        assert_eq!(stack.len(), 0);
    }

    #[test]
    fn push_then_print_round_trips() {
        let mut stack = PolyStack::new();
        process_line(&mut stack, 1, "(1,2)+(1,0)");
        assert_eq!(stack.len(), 1);
    }
}
