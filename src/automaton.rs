//! The automaton data model: a labeled directed graph with an initial state
//! and an accepting set, stored as three parallel transition arrays plus the
//! bookkeeping the minimizer needs. Not required to be deterministic on
//! input — the algorithm treats it as a graph and partitions up to
//! bisimulation, which coincides with DFA language equivalence for inputs
//! that are in fact DFAs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};


/// Alphabet symbol type. Any integer is a valid label; `i64`
/// accommodates any alphabet encoding a caller reasonably picks (byte
/// classes, Unicode scalar values, interned symbol ids) while keeping
/// ordering and equality simple.
pub type Label = i64;

/// A labeled directed graph over `{0..n-1}` states, as read from or written
/// to the minimizer's text format. Transitions need not be deterministic;
/// duplicate transitions are permitted and preserved.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Automaton {
    /// Number of states, `n`.
    pub state_count: usize,
    /// The initial state, `q0 ∈ [0, state_count)`.
    pub initial_state: usize,
    /// The accepting states. May contain duplicates; duplicates are
    /// harmless and are deduplicated by reachability's idempotent `reach`.
    pub accepting_states: Vec<usize>,
    /// Source state of transition `t`.
    pub tail: Vec<usize>,
    /// Label of transition `t`.
    pub label: Vec<Label>,
    /// Target state of transition `t`.
    pub head: Vec<usize>,
}

impl Automaton {
    /// Number of transitions, `m`.
    #[inline]
    pub fn transition_count(&self) -> usize {
        self.tail.len()
    }

    /// Validate that every state index referenced by the automaton (the
    /// initial state, every transition endpoint, every accepting state)
    /// falls within `[0, state_count)`. Called once at the I/O boundary;
    /// the algorithmic core assumes a validated `Automaton`.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.initial_state >= self.state_count {
            return Err(format!(
                "initial state {} is out of range for {} states",
                self.initial_state, self.state_count
            ));
        }
        if self.tail.len() != self.label.len() || self.label.len() != self.head.len() {
            return Err("tail/label/head arrays have mismatched lengths".to_string());
        }
        for (t, &s) in self.tail.iter().enumerate() {
            if s >= self.state_count {
                return Err(format!(
                    "transition {t} has tail state {s}, out of range for {} states",
                    self.state_count
                ));
            }
        }
        for (t, &s) in self.head.iter().enumerate() {
            if s >= self.state_count {
                return Err(format!(
                    "transition {t} has head state {s}, out of range for {} states",
                    self.state_count
                ));
            }
        }
        for &s in &self.accepting_states {
            if s >= self.state_count {
                return Err(format!(
                    "accepting state {s} is out of range for {} states",
                    self.state_count
                ));
            }
        }
        Ok(())
    }
}

/// A minimized automaton as emitted by the driver: states are block ids
/// `[0, block_count)`, and each emitted transition appears once per
/// distinct `(source-block, label, target-block)` triple when the input was
/// a genuine DFA.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MinimizedAutomaton {
    /// Number of blocks (states) in the minimized automaton, `B`.
    pub block_count: usize,
    /// The block containing the original initial state.
    pub initial_block: usize,
    /// Accepting blocks, in driver iteration order (no canonical order is
    /// guaranteed beyond "each block appears at most once").
    pub accepting_blocks: Vec<usize>,
    /// Emitted transitions `(tail_block, label, head_block)`, in driver
    /// iteration order.
    pub transitions: Vec<(usize, Label, usize)>,
}

impl MinimizedAutomaton {
    /// Number of emitted transitions, `M`.
    #[inline]
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}
