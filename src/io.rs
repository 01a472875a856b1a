//! Reads an [`Automaton`] from a whitespace-separated integer format, and
//! writes a [`MinimizedAutomaton`] back out in the same style. This framing
//! exists only to give the algorithmic core an input/output contract; it
//! carries no algorithmic weight of its own.

use std::io::Write;

use log::{debug, trace};

use crate::automaton::{Automaton, Label, MinimizedAutomaton};
use crate::errors::{DfaminErrorKind, Result};

/// A cursor over whitespace-separated tokens, tracking a human-readable
/// position description for error messages.
struct Tokens<'a> {
    it: std::str::SplitAsciiWhitespace<'a>,
    consumed: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Tokens {
            it: input.split_ascii_whitespace(),
            consumed: 0,
        }
    }

    fn next_token(&mut self, what: &str) -> Result<&'a str> {
        match self.it.next() {
            Some(tok) => {
                self.consumed += 1;
                Ok(tok)
            }
            None => Err(DfaminErrorKind::Parse(format!(
                "expected {what} at token {}, found end of input",
                self.consumed + 1
            ))
            .into()),
        }
    }

    fn next_int(&mut self, what: &str) -> Result<i64> {
        let tok = self.next_token(what)?;
        tok.parse::<i64>().map_err(|_| {
            DfaminErrorKind::Parse(format!(
                "expected integer for {what} at token {}, found '{tok}'",
                self.consumed
            ))
            .into()
        })
    }

    fn next_usize(&mut self, what: &str) -> Result<usize> {
        let v = self.next_int(what)?;
        usize::try_from(v)
            .map_err(|_| DfaminErrorKind::Parse(format!("{what} must be non-negative, got {v}")).into())
    }
}

/// Parse the `n m q0 f` header, `m` transition triples, and `f` accepting
/// state indices from `input`, then validate the result (see
/// [`Automaton::validate`]).
pub fn read_automaton(input: &str) -> Result<Automaton> {
    let mut tokens = Tokens::new(input);
    let state_count = tokens.next_usize("n (state count)")?;
    let transition_count = tokens.next_usize("m (transition count)")?;
    let initial_state = tokens.next_usize("q0 (initial state)")?;
    let accepting_count = tokens.next_usize("f (accepting state count)")?;
    trace!(
        "read_automaton: header n={state_count} m={transition_count} q0={initial_state} f={accepting_count}"
    );

    let mut tail = Vec::with_capacity(transition_count);
    let mut label = Vec::with_capacity(transition_count);
    let mut head = Vec::with_capacity(transition_count);
    for t in 0..transition_count {
        tail.push(tokens.next_usize(&format!("tail of transition {t}"))?);
        label.push(tokens.next_int(&format!("label of transition {t}"))? as Label);
        head.push(tokens.next_usize(&format!("head of transition {t}"))?);
    }

    let mut accepting_states = Vec::with_capacity(accepting_count);
    for i in 0..accepting_count {
        accepting_states.push(tokens.next_usize(&format!("accepting state {i}"))?);
    }

    let automaton = Automaton {
        state_count,
        initial_state,
        accepting_states,
        tail,
        label,
        head,
    };
    automaton.validate().map_err(|msg| {
        debug!("read_automaton: rejecting invalid automaton: {msg}");
        crate::errors::DfaminError::new(DfaminErrorKind::Invalid(msg))
    })?;
    debug!(
        "read_automaton: accepted {} states, {} transitions",
        automaton.state_count,
        automaton.transition_count()
    );
    Ok(automaton)
}

/// Write `minimized` to `out` in the `B M s0 F` header + transitions +
/// accepting-block format. The iteration order is whatever the driver
/// produced; no canonical order is required.
pub fn write_minimized<W: Write>(out: &mut W, minimized: &MinimizedAutomaton) -> Result<()> {
    trace!(
        "write_minimized: {} blocks, {} transitions, {} accepting",
        minimized.block_count,
        minimized.transition_count(),
        minimized.accepting_blocks.len()
    );
    writeln!(
        out,
        "{} {} {} {}",
        minimized.block_count,
        minimized.transition_count(),
        minimized.initial_block,
        minimized.accepting_blocks.len()
    )?;
    for &(tail_block, label, head_block) in &minimized.transitions {
        writeln!(out, "{tail_block} {label} {head_block}")?;
    }
    for &block in &minimized.accepting_blocks {
        writeln!(out, "{block}")?;
    }
    Ok(())
}
