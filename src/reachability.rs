//! The reachability pruner: two passes that discard states unreachable from
//! the initial state, or from which no accepting state is reachable.
//!
//! Both passes share the same primitive — a "reached prefix" growing inside
//! `blocks.elements` — just with the transition endpoints swapped (forward
//! edges for the first pass, reversed edges for the second).

use crate::adjacency::Adjacency;
use crate::ids::StateId;
use crate::partition::Partition;

/// Mark `q` as reached: idempotent, O(1). `rr` is the exclusive bound of the
/// reached prefix `[0, rr)` inside `blocks.elements`.
pub(crate) fn reach(blocks: &mut Partition, rr: &mut usize, q: usize) {
    if blocks.swap_to_front(StateId::from(q).into(), *rr) {
        *rr += 1;
    }
}

/// Traverse from the current reached prefix, following edges keyed by
/// `key[t]` to `other[t]`, until the prefix stops growing; then compute a
/// keep-mask for transitions whose `key` endpoint survived, and truncate
/// `blocks`' set 0 to the final reached prefix.
///
/// Called twice by the driver: once with `(tail, head)` to prune states
/// unreachable from the initial state, once with `(head, tail)` (i.e.
/// reversed edges) to prune states from which no accepting state is
/// reachable, after re-seeding `rr` with the surviving accepting states.
pub(crate) fn remove_unreachable(
    blocks: &mut Partition,
    rr: &mut usize,
    n: usize,
    key: &[usize],
    other: &[usize],
) -> Vec<bool> {
    let adjacency = Adjacency::build(n, key);
    let mut i = 0;
    while i < *rr {
        let q = blocks.element_at(i).as_usize();
        for &t in adjacency.of(q) {
            reach(blocks, rr, other[t.as_usize()]);
        }
        i += 1;
    }
    let keep: Vec<bool> = key
        .iter()
        .map(|&q| blocks.location_of(StateId::from(q).into()) < *rr)
        .collect();
    blocks.truncate_set0(*rr);
    *rr = 0;
    keep
}

/// Compact `tail`/`label`/`head` in place, keeping only the transitions the
/// `keep` mask selects, preserving relative order.
pub(crate) fn compact_transitions<L: Copy>(
    tail: &mut Vec<usize>,
    label: &mut Vec<L>,
    head: &mut Vec<usize>,
    keep: &[bool],
) {
    let mut j = 0;
    for t in 0..keep.len() {
        if keep[t] {
            tail[j] = tail[t];
            label[j] = label[t];
            head[j] = head[t];
            j += 1;
        }
    }
    tail.truncate(j);
    label.truncate(j);
    head.truncate(j);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prunes_unreachable_tail() {
        // 0 -> 0 (self loop), state 1 unreachable.
        let mut blocks = Partition::new(2);
        let mut rr = 0usize;
        reach(&mut blocks, &mut rr, 0);
        let tail = vec![0usize];
        let head = vec![0usize];
        let keep = remove_unreachable(&mut blocks, &mut rr, 2, &tail, &head);
        assert_eq!(keep, vec![true]);
        assert_eq!(blocks.past(crate::ids::SetId::from(0usize)), 1);
    }

    #[test]
    fn prunes_dead_state_via_reversed_edges() {
        // 0 -> 1 -> 2, only 1 accepts; 2 is unreachable-from-accepting (dead).
        let mut blocks = Partition::new(3);
        let mut rr = 0usize;
        reach(&mut blocks, &mut rr, 0);
        let tail = vec![0usize, 1];
        let head = vec![1usize, 2];
        let keep_fwd = remove_unreachable(&mut blocks, &mut rr, 3, &tail, &head);
        assert_eq!(keep_fwd, vec![true, true]);

        // Re-seed with accepting state 1, then prune on reversed edges.
        reach(&mut blocks, &mut rr, 1);
        let keep_bwd = remove_unreachable(&mut blocks, &mut rr, 3, &head, &tail);
        // transition 1->2 should be dropped: 2 never reaches the accepting state.
        assert_eq!(keep_bwd, vec![true, false]);
    }
}
