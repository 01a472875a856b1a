#![forbid(missing_docs)]
//! # `dfamin`
//! The `dfamin` crate minimizes finite automata over an integer alphabet
//! using Valmari's 2011 partition-refinement algorithm. Given any labeled
//! directed graph with an initial state and an accepting set, it produces
//! the bisimulation quotient; for an automaton that is in fact a DFA, this
//! coincides with the unique (up to state renumbering) minimal DFA
//! accepting the same language.
//!
//! The crate does not parse regular expressions, build NFAs, or normalize
//! alphabets — it starts from an already-constructed automaton (an
//! [`Automaton`]) and minimizes it. Reading and writing the text framing
//! described by the `dfamin` binary lives in [`io`].
//!
//! # Example
//! ```rust
//! use dfamin::{minimize, Automaton};
//!
//! // states 1 and 2 both accept and both self-loop on label 0: they collapse.
//! let automaton = Automaton {
//!     state_count: 3,
//!     initial_state: 0,
//!     accepting_states: vec![1, 2],
//!     tail: vec![0, 0, 1, 2],
//!     label: vec![0, 1, 0, 0],
//!     head: vec![1, 2, 1, 2],
//! };
//! let minimized = minimize(&automaton);
//! assert_eq!(minimized.block_count, 2);
//! ```

/// Module with the automaton data model (`Automaton`, `MinimizedAutomaton`).
mod automaton;
pub use automaton::{Automaton, Label, MinimizedAutomaton};

/// Module with error definitions.
mod errors;
pub use errors::{DfaminError, DfaminErrorKind, Result};

/// Module with the newtype id wrappers used across the partition and driver.
mod ids;

/// Module with the CSR adjacency index built over a chosen transition
/// endpoint array.
mod adjacency;

/// Module with the refinable partition: the data structure underlying both
/// the block and cord partitions.
mod partition;

/// Module with the reachability pruner (forward and co-reachability
/// passes).
mod reachability;

/// Module with the minimization driver: initial partitions, the coupled
/// refinement loop, and quotient emission.
mod minimize;
pub use minimize::minimize;

/// Module with the text input/output framing used by the `dfamin` binary:
/// reading an [`Automaton`] from a whitespace-separated integer stream and
/// writing a [`MinimizedAutomaton`] back out.
pub mod io;
