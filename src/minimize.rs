//! The minimization driver: builds the initial block and cord partitions,
//! runs the coupled refinement loop, and emits the quotient automaton.
//!
//! This is Valmari's 2011 partition-refinement minimizer. Blocks (states)
//! and cords (transitions) are refined in lock-step: each unprocessed cord
//! refines blocks, and each resulting new block refines cords, so both
//! partitions grow monotonically and the total work is O((m + n) log n).

use log::{debug, trace};

use crate::adjacency::Adjacency;
use crate::automaton::{Automaton, Label, MinimizedAutomaton};
use crate::ids::{ElementId, SetId, StateId, TransId};
use crate::partition::{Partition, Scratch};
use crate::reachability::{self, compact_transitions};

/// Minimize `automaton`, returning the quotient as a [`MinimizedAutomaton`].
///
/// The caller is responsible for having validated the automaton first (see
/// [`Automaton::validate`]); the algorithmic core itself has no failure
/// modes and cannot fail.
pub fn minimize(automaton: &Automaton) -> MinimizedAutomaton {
    trace!(
        "minimize: {} states, {} transitions, q0={}",
        automaton.state_count,
        automaton.transition_count(),
        automaton.initial_state
    );

    let mut tail = automaton.tail.clone();
    let mut label = automaton.label.clone();
    let mut head = automaton.head.clone();
    let n = automaton.state_count;

    let mut blocks = Partition::new(n);
    let mut rr = 0usize;
    reachability::reach(&mut blocks, &mut rr, automaton.initial_state);
    let keep = reachability::remove_unreachable(&mut blocks, &mut rr, n, &tail, &head);
    compact_transitions(&mut tail, &mut label, &mut head, &keep);
    trace!(
        "forward reachability: {} states, {} transitions survive",
        blocks.past(SetId::from(0usize)),
        tail.len()
    );

    // Re-seed with the accepting states that survived forward reachability.
    let forward_reached = blocks.past(SetId::from(0usize));
    for &q in &automaton.accepting_states {
        if blocks.location_of(StateId::from(q).into()) < forward_reached {
            reachability::reach(&mut blocks, &mut rr, q);
        }
    }
    let accepting_count = rr;
    let keep = reachability::remove_unreachable(&mut blocks, &mut rr, n, &head, &tail);
    compact_transitions(&mut tail, &mut label, &mut head, &keep);
    debug!(
        "after pruning: {} states, {} transitions, {} accepting",
        blocks.past(SetId::from(0usize)),
        tail.len(),
        accepting_count
    );

    let m = tail.len();
    let mut scratch = Scratch::new(n.max(m).max(1) + 1);

    // Initial block partition: the second reachability pass left the
    // accepting states occupying the prefix [0, accepting_count) of set 0,
    // so marking that whole prefix and splitting separates accepting from
    // non-accepting without needing to look the states up again.
    for i in 0..accepting_count {
        blocks.mark(blocks.element_at(i), &mut scratch);
    }
    blocks.split(&mut scratch);
    trace!(
        "initial block partition: {} block(s), {} accepting",
        blocks.set_count(),
        accepting_count
    );

    // Initial cord partition: group transitions by label via a sort, then
    // assign set boundaries at each label change.
    let (order, boundaries) = initial_cord_grouping(&label);
    let mut cords = Partition::from_grouping(&order, &boundaries);
    trace!("initial cord partition: {} cord(s)", cords.set_count());

    // The adjacency index used inside the inner loop is keyed by `head`:
    // "cords mark transitions adjacent by head" means transitions entering
    // states of the block currently being processed (predecessor-based
    // refinement).
    let adjacency = Adjacency::build(n, &head);

    // A cord can hold more than one transition sharing a tail state —
    // duplicate transitions are explicitly permitted (automaton.rs), and
    // non-deterministic input can have several same-labeled edges from one
    // state land in the same cord. `blocks.mark` forbids marking the same
    // element twice in a round, so tails already marked for this cord are
    // tracked here and skipped; `tail_mark_seen` is cleared via
    // `marked_tails` after each cord instead of a full O(n) reset.
    let mut tail_mark_seen = vec![false; n];
    let mut marked_tails = Vec::new();

    let mut c = 0usize;
    let mut b = 1usize;
    while c < cords.set_count() {
        let cord_id = SetId::from(c);
        for &t in cords.elements_of(cord_id) {
            let t = TransId::from(t.as_usize());
            let state = tail[t.as_usize()];
            if !tail_mark_seen[state] {
                tail_mark_seen[state] = true;
                marked_tails.push(state);
                blocks.mark(automaton_state_element(&tail, t), &mut scratch);
            }
        }
        for &state in &marked_tails {
            tail_mark_seen[state] = false;
        }
        marked_tails.clear();
        let blocks_before = blocks.set_count();
        blocks.split(&mut scratch);
        trace!(
            "cord {c}/{}: blocks {blocks_before} -> {}",
            cords.set_count(),
            blocks.set_count()
        );
        c += 1;

        while b < blocks.set_count() {
            let block_id = SetId::from(b);
            for &q in blocks.elements_of(block_id) {
                for &t in adjacency.of(q.as_usize()) {
                    cords.mark(ElementId::from(t.as_usize()), &mut scratch);
                }
            }
            let cords_before = cords.set_count();
            cords.split(&mut scratch);
            trace!(
                "block {b}/{}: cords {cords_before} -> {}",
                blocks.set_count(),
                cords.set_count()
            );
            b += 1;
        }
        debug!(
            "refinement round boundary: c={c} b={b} blocks={} cords={}",
            blocks.set_count(),
            cords.set_count()
        );
    }
    trace!(
        "refinement complete: {} blocks, {} cords, {} marked touches",
        blocks.set_count(),
        cords.set_count(),
        scratch.touched_count()
    );

    emit(&blocks, accepting_count, &tail, &label, &head, automaton.initial_state)
}

/// Look up `tail[t]` as an [`ElementId`] into the blocks partition.
fn automaton_state_element(tail: &[usize], t: TransId) -> ElementId {
    ElementId::from(tail[t.as_usize()])
}

/// Transition ids sorted by label, plus the boundary index of each
/// label-change, giving the `(order, boundaries)` pair
/// [`Partition::from_grouping`] needs to build the initial cord partition:
/// two transitions land in the same cord iff they share a label.
fn initial_cord_grouping(label: &[Label]) -> (Vec<usize>, Vec<usize>) {
    let m = label.len();
    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by_key(|&t| label[t]);
    if order.is_empty() {
        return (order, vec![0]);
    }
    let mut boundaries = vec![0usize];
    let mut prev_label = label[order[0]];
    for (i, &t) in order.iter().enumerate().skip(1) {
        if label[t] != prev_label {
            boundaries.push(i);
            prev_label = label[t];
        }
    }
    boundaries.push(order.len());
    (order, boundaries)
}

/// Emit the quotient automaton: one transition per `(tail-block, label,
/// head-block)` triple, chosen by "the tail sits at the front of its
/// block"; accepting blocks are exactly those starting before
/// `accepting_count` (the prefix the initial split produced).
fn emit(
    blocks: &Partition,
    accepting_count: usize,
    tail: &[usize],
    label: &[Label],
    head: &[usize],
    initial_state: usize,
) -> MinimizedAutomaton {
    let mut transitions = Vec::new();
    for t in 0..tail.len() {
        let s = blocks.set_of(ElementId::from(tail[t]));
        if blocks.location_of(ElementId::from(tail[t])) == blocks.first(s) {
            let head_block = blocks.set_of(ElementId::from(head[t])).as_usize();
            transitions.push((s.as_usize(), label[t], head_block));
        }
    }
    let block_count = blocks.set_count();
    let mut accepting_blocks = Vec::new();
    for b in 0..block_count {
        let s = SetId::from(b);
        if blocks.first(s) < accepting_count {
            accepting_blocks.push(b);
        }
    }
    let initial_block = blocks.set_of(ElementId::from(initial_state)).as_usize();

    MinimizedAutomaton {
        block_count,
        initial_block,
        accepting_blocks,
        transitions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn automaton(
        state_count: usize,
        initial_state: usize,
        accepting_states: Vec<usize>,
        transitions: Vec<(usize, Label, usize)>,
    ) -> Automaton {
        let mut tail = Vec::new();
        let mut label = Vec::new();
        let mut head = Vec::new();
        for (t, l, h) in transitions {
            tail.push(t);
            label.push(l);
            head.push(h);
        }
        Automaton {
            state_count,
            initial_state,
            accepting_states,
            tail,
            label,
            head,
        }
    }

    #[test]
    fn empty_language_one_state_no_transitions() {
        let a = automaton(1, 0, vec![], vec![]);
        let out = minimize(&a);
        assert_eq!(out.block_count, 1);
        assert_eq!(out.transition_count(), 0);
        assert_eq!(out.initial_block, 0);
        assert!(out.accepting_blocks.is_empty());
    }

    #[test]
    fn single_accepting_state_self_loop() {
        let a = automaton(1, 0, vec![0], vec![(0, 0, 0)]);
        let out = minimize(&a);
        assert_eq!(out.block_count, 1);
        assert_eq!(out.transitions, vec![(0, 0, 0)]);
        assert_eq!(out.initial_block, 0);
        assert_eq!(out.accepting_blocks, vec![0]);
    }

    #[test]
    fn two_equivalent_accepting_states_collapse() {
        let a = automaton(
            3,
            0,
            vec![1, 2],
            vec![(0, 0, 1), (0, 1, 2), (1, 0, 1), (2, 0, 2)],
        );
        let out = minimize(&a);
        assert_eq!(out.block_count, 2);
        // Three distinct (source-block, label, target-block) triples survive:
        // non-accepting --0--> accepting, non-accepting --1--> accepting, and
        // accepting --0--> accepting (the collapsed self-loop).
        assert_eq!(out.transition_count(), 3);
        assert_eq!(out.accepting_blocks.len(), 1);
        let accepting = out.accepting_blocks[0];
        let non_accepting = out.initial_block;
        assert_ne!(accepting, non_accepting);
        assert!(out
            .transitions
            .iter()
            .any(|&(s, l, h)| s == non_accepting && l == 0 && h == accepting));
        assert!(out
            .transitions
            .iter()
            .any(|&(s, l, h)| s == non_accepting && l == 1 && h == accepting));
        assert!(out
            .transitions
            .iter()
            .any(|&(s, l, h)| s == accepting && l == 0 && h == accepting));
    }

    #[test]
    fn unreachable_state_removed() {
        let a = automaton(3, 0, vec![0], vec![(0, 0, 0)]);
        let out = minimize(&a);
        assert_eq!(out.block_count, 1);
        assert_eq!(out.transitions, vec![(0, 0, 0)]);
        assert_eq!(out.accepting_blocks, vec![0]);
    }

    #[test]
    fn dead_state_removed() {
        let a = automaton(3, 0, vec![1], vec![(0, 0, 1), (1, 1, 2)]);
        let out = minimize(&a);
        assert_eq!(out.block_count, 2);
        assert_eq!(out.transition_count(), 1);
        assert_eq!(out.accepting_blocks.len(), 1);
    }

    #[test]
    fn already_minimal_two_alternating_states() {
        let a = automaton(2, 0, vec![1], vec![(0, 0, 1), (1, 0, 0)]);
        let out = minimize(&a);
        assert_eq!(out.block_count, 2);
        assert_eq!(out.transition_count(), 2);
        assert_eq!(out.accepting_blocks.len(), 1);
    }

    #[test]
    fn idempotence_up_to_renumbering() {
        let a = automaton(
            3,
            0,
            vec![1, 2],
            vec![(0, 0, 1), (0, 1, 2), (1, 0, 1), (2, 0, 2)],
        );
        let once = minimize(&a);
        let again_input = Automaton {
            state_count: once.block_count,
            initial_state: once.initial_block,
            accepting_states: once.accepting_blocks.clone(),
            tail: once.transitions.iter().map(|&(s, _, _)| s).collect(),
            label: once.transitions.iter().map(|&(_, l, _)| l).collect(),
            head: once.transitions.iter().map(|&(_, _, h)| h).collect(),
        };
        let twice = minimize(&again_input);
        assert_eq!(twice.block_count, once.block_count);
        assert_eq!(twice.transition_count(), once.transition_count());
        assert_eq!(twice.accepting_blocks.len(), once.accepting_blocks.len());
    }

    #[test]
    fn transition_count_never_increases() {
        let a = automaton(
            3,
            0,
            vec![1, 2],
            vec![(0, 0, 1), (0, 1, 2), (1, 0, 1), (2, 0, 2)],
        );
        let out = minimize(&a);
        assert!(out.transition_count() <= a.transition_count());
    }

    #[test]
    fn duplicate_transitions_sharing_a_tail_do_not_corrupt_the_partition() {
        // State 0 has two literally identical transitions to 1 on label 0
        // (explicitly permitted, see automaton.rs), so the same tail state
        // appears twice within the same cord during refinement.
        let a = automaton(2, 0, vec![1], vec![(0, 0, 1), (0, 0, 1)]);
        let out = minimize(&a);
        assert_eq!(out.block_count, 2);
        assert_eq!(out.transition_count(), 2);
        assert_eq!(out.accepting_blocks.len(), 1);
    }

    #[test]
    fn nondeterministic_duplicate_tail_transitions_in_one_cord_do_not_corrupt_the_partition() {
        // State 0 has two same-labeled transitions to different states (1
        // and 2) that end up bisimilar (both accepting, both dead ends), so
        // they land in the same cord and mark tail state 0 twice. Since the
        // input is non-deterministic, the representative-selection rule
        // legitimately emits both (spec.md's documented "may duplicate
        // entries for the same block triple" case), rather than collapsing
        // them to one.
        let a = automaton(3, 0, vec![1, 2], vec![(0, 0, 1), (0, 0, 2)]);
        let out = minimize(&a);
        assert_eq!(out.block_count, 2);
        assert_eq!(out.transition_count(), 2);
        assert_eq!(out.accepting_blocks.len(), 1);
    }
}
