//! The refinable partition: the data structure that does essentially all of
//! the algorithmic work in Valmari's minimizer.
//!
//! A `Partition` splits a universe `{0..n-1}` into disjoint, non-empty sets
//! whose ids are allocated once (sets only ever split, never merge or
//! disappear). Two independent `Partition`s drive the minimizer: one over
//! states (`blocks`), one over transitions (`cords`). Both share a single
//! [`Scratch`], since the driver guarantees one partition is never mid-round
//! while the other is being marked (see [`Scratch`] docs).

use crate::ids::{ElementId, SetId};

/// The `markedCount`/`touched` scratch shared between the blocks and cords
/// partitions.
///
/// Sizing it once to `max(n, m) + 1` and lending it to whichever partition
/// is refining saves the allocation each partition would otherwise need for
/// its own scratch. This is safe only because the driver never has both
/// partitions mid-refinement at once: a `split()` call always drains
/// `touched` to empty before the other partition's `mark` is ever called
/// again. Violating that discipline would corrupt both partitions' marks.
pub(crate) struct Scratch {
    marked_count: Vec<u32>,
    touched: Vec<SetId>,
}

impl Scratch {
    /// Allocate scratch large enough for a universe with up to `capacity`
    /// sets (in practice `max(n, m) + 1`, since a partition over `k`
    /// elements can never hold more than `k` sets).
    pub(crate) fn new(capacity: usize) -> Self {
        Scratch {
            marked_count: vec![0; capacity],
            touched: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn touched_count(&self) -> usize {
        self.touched.len()
    }

    #[cfg(test)]
    pub(crate) fn is_drained(&self) -> bool {
        self.touched.is_empty() && self.marked_count.iter().all(|&c| c == 0)
    }
}

/// A refinable partition over `{0..n-1}`, as specified in the six parallel
/// arrays of the reference design: `elements`/`location` (mutual inverses),
/// `set_of`, and `first`/`past` (the `[first[s], past[s])` range of `s` in
/// `elements`).
pub(crate) struct Partition {
    elements: Vec<ElementId>,
    location: Vec<u32>,
    set_of: Vec<SetId>,
    first: Vec<u32>,
    past: Vec<u32>,
    z: u32,
}

impl Partition {
    /// Place every element of `{0..n-1}` into a single set (id 0), or leave
    /// `z == 0` if `n == 0`.
    pub(crate) fn new(n: usize) -> Self {
        let mut elements = Vec::with_capacity(n);
        let mut location = Vec::with_capacity(n);
        for i in 0..n {
            elements.push(ElementId::from(i));
            location.push(i as u32);
        }
        let z = if n == 0 { 0 } else { 1 };
        let mut first = vec![0u32; n.max(1)];
        let mut past = vec![0u32; n.max(1)];
        if z == 1 {
            first[0] = 0;
            past[0] = n as u32;
        }
        Partition {
            elements,
            location,
            set_of: vec![SetId::from(0usize); n],
            first,
            past,
            z,
        }
    }

    /// Build a partition directly from a precomputed grouping: `order` is a
    /// permutation of `{0..n-1}` (as plain indices) laid out so that each
    /// group occupies a contiguous run, and `boundaries` (length
    /// `groups + 1`, strictly increasing, starting at 0 and ending at
    /// `order.len()`) marks each group's `[boundaries[i], boundaries[i+1])`
    /// range within `order`.
    ///
    /// Used once, at startup, to build the initial cord partition (grouped
    /// by transition label) without going through the `mark`/`split`
    /// machinery, which only knows how to split an existing set in two.
    pub(crate) fn from_grouping(order: &[usize], boundaries: &[usize]) -> Self {
        let n = order.len();
        let mut elements = Vec::with_capacity(n);
        let mut location = vec![0u32; n];
        for (i, &e) in order.iter().enumerate() {
            elements.push(ElementId::from(e));
            location[e] = i as u32;
        }
        let z = boundaries.len().saturating_sub(1);
        let mut first = vec![0u32; n.max(1)];
        let mut past = vec![0u32; n.max(1)];
        let mut set_of = vec![SetId::from(0usize); n];
        for s in 0..z {
            let lo = boundaries[s];
            let hi = boundaries[s + 1];
            first[s] = lo as u32;
            past[s] = hi as u32;
            for i in lo..hi {
                set_of[elements[i].as_usize()] = SetId::from(s);
            }
        }
        Partition {
            elements,
            location,
            set_of,
            first,
            past,
            z: z as u32,
        }
    }

    /// Number of sets currently in the partition.
    #[inline]
    pub(crate) fn set_count(&self) -> usize {
        self.z as usize
    }

    /// The set currently containing `e`.
    #[inline]
    pub(crate) fn set_of(&self, e: ElementId) -> SetId {
        self.set_of[e.as_usize()]
    }

    /// Inclusive start index of set `s` within [`Self::elements`].
    #[inline]
    pub(crate) fn first(&self, s: SetId) -> usize {
        self.first[s.as_usize()] as usize
    }

    /// Exclusive end index of set `s` within [`Self::elements`].
    #[inline]
    pub(crate) fn past(&self, s: SetId) -> usize {
        self.past[s.as_usize()] as usize
    }

    /// The elements of set `s`, in no particular order beyond "contiguous".
    #[inline]
    pub(crate) fn elements_of(&self, s: SetId) -> &[ElementId] {
        &self.elements[self.first(s)..self.past(s)]
    }

    /// The element sitting at `first[s]`: the canonical representative used
    /// on output.
    #[inline]
    pub(crate) fn representative(&self, s: SetId) -> ElementId {
        self.elements[self.first(s)]
    }

    /// Current position of `e` within [`Self::elements`].
    #[inline]
    pub(crate) fn location_of(&self, e: ElementId) -> usize {
        self.location[e.as_usize()] as usize
    }

    /// The element currently sitting at position `i`.
    #[inline]
    pub(crate) fn element_at(&self, i: usize) -> ElementId {
        self.elements[i]
    }

    /// If `e` sits at or beyond position `boundary`, swap it to `boundary`
    /// and report that it moved; otherwise report no-op. This is the
    /// "reached prefix" primitive reachability uses: a growing prefix
    /// `[0, boundary)` doubling as frontier and visited set, distinct from
    /// the `mark`/`split` refinement machinery above (it is never used
    /// concurrently with a mark/split round on the same `Partition`).
    #[inline]
    pub(crate) fn swap_to_front(&mut self, e: ElementId, boundary: usize) -> bool {
        let i = self.location_of(e);
        if i < boundary {
            false
        } else {
            self.swap_positions(i, boundary);
            true
        }
    }

    /// Shrink set 0's upper bound to `past`, discarding everything beyond it.
    /// Used by the reachability pruner once a reached prefix has been
    /// established: set 0 is made to represent exactly the reached states.
    pub(crate) fn truncate_set0(&mut self, past: usize) {
        debug_assert_eq!(self.z, 1, "truncate_set0 is only valid before any split");
        self.past[0] = past as u32;
    }

    /// Swap the elements at two `elements` positions, keeping `location`
    /// consistent for both.
    #[inline]
    fn swap_positions(&mut self, i: usize, j: usize) {
        let (ei, ej) = (self.elements[i], self.elements[j]);
        self.elements[i] = ej;
        self.elements[j] = ei;
        self.location[ej.as_usize()] = i as u32;
        self.location[ei.as_usize()] = j as u32;
    }

    /// Move `e` to the end of its set's marked prefix, extending that
    /// prefix by one. O(1). Marking the same element twice in one round
    /// (before the next `split()`) is a caller error the partition does not
    /// detect, per the reference design.
    pub(crate) fn mark(&mut self, e: ElementId, scratch: &mut Scratch) {
        let s = self.set_of[e.as_usize()];
        let i = self.location[e.as_usize()] as usize;
        let j = self.first(s) + scratch.marked_count[s.as_usize()] as usize;
        self.swap_positions(i, j);
        if scratch.marked_count[s.as_usize()] == 0 {
            scratch.touched.push(s);
        }
        scratch.marked_count[s.as_usize()] += 1;
    }

    /// Split every touched set into its marked prefix and unmarked suffix,
    /// unless the whole set was marked (in which case it is left alone).
    /// The smaller side becomes the new set id `z`; the other retains its
    /// id. Drains `touched` and `marked_count` back to empty/zero.
    pub(crate) fn split(&mut self, scratch: &mut Scratch) {
        // Reference design pops from the end of the worklist; order among
        // touched sets is immaterial to correctness.
        while let Some(s) = scratch.touched.pop() {
            let marked = scratch.marked_count[s.as_usize()] as usize;
            let j = self.first(s) + marked;
            if j == self.past(s) {
                scratch.marked_count[s.as_usize()] = 0;
                continue;
            }
            let new_id = SetId::from(self.z as usize);
            let (first_new, past_new, first_s, past_s);
            if marked <= self.past(s) - j {
                // Marked prefix is the smaller (or equal) side.
                first_new = self.first(s);
                past_new = j;
                first_s = j;
                past_s = self.past(s);
            } else {
                // Unmarked suffix is the smaller side.
                first_new = j;
                past_new = self.past(s);
                first_s = self.first(s);
                past_s = j;
            }
            self.first[new_id.as_usize()] = first_new as u32;
            self.past[new_id.as_usize()] = past_new as u32;
            self.first[s.as_usize()] = first_s as u32;
            self.past[s.as_usize()] = past_s as u32;
            for i in first_new..past_new {
                self.set_of[self.elements[i].as_usize()] = new_id;
            }
            scratch.marked_count[s.as_usize()] = 0;
            scratch.marked_count[new_id.as_usize()] = 0;
            self.z += 1;
        }
    }

    #[cfg(test)]
    pub(crate) fn well_formed(&self, n: usize) -> bool {
        for s in 0..self.z {
            let s = SetId::from(s as usize);
            if self.first(s) >= self.past(s) {
                return false;
            }
        }
        for i in 0..n {
            if self.location[self.elements[i].as_usize()] != i as u32 {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elem(i: usize) -> ElementId {
        ElementId::from(i)
    }

    #[test]
    fn init_places_everything_in_one_set() {
        let p = Partition::new(5);
        assert_eq!(p.set_count(), 1);
        let s0 = SetId::from(0usize);
        assert_eq!(p.first(s0), 0);
        assert_eq!(p.past(s0), 5);
        assert!(p.well_formed(5));
    }

    #[test]
    fn init_empty_universe_has_no_sets() {
        let p = Partition::new(0);
        assert_eq!(p.set_count(), 0);
    }

    #[test]
    fn mark_and_split_creates_smaller_as_new_set() {
        let mut p = Partition::new(5);
        let mut scratch = Scratch::new(6);
        p.mark(elem(1), &mut scratch);
        p.mark(elem(3), &mut scratch);
        p.split(&mut scratch);
        assert_eq!(p.set_count(), 2);
        assert!(scratch.is_drained());
        assert!(p.well_formed(5));

        // The new set (id 1, the marked pair) must be the smaller side.
        let new_set = SetId::from(1usize);
        assert_eq!(p.past(new_set) - p.first(new_set), 2);
        let elements_of_new: std::collections::BTreeSet<_> = p
            .elements_of(new_set)
            .iter()
            .map(|e| e.as_usize())
            .collect();
        assert_eq!(
            elements_of_new,
            [1usize, 3usize].into_iter().collect()
        );
    }

    #[test]
    fn marking_every_element_of_a_set_does_not_split() {
        let mut p = Partition::new(3);
        let mut scratch = Scratch::new(4);
        p.mark(elem(0), &mut scratch);
        p.mark(elem(1), &mut scratch);
        p.mark(elem(2), &mut scratch);
        p.split(&mut scratch);
        assert_eq!(p.set_count(), 1);
        assert!(scratch.is_drained());
    }

    #[test]
    fn set_count_is_monotonic_across_several_rounds() {
        let mut p = Partition::new(6);
        let mut scratch = Scratch::new(7);
        let mut prev = p.set_count();
        for round in [&[0usize, 1][..], &[2][..], &[4, 5][..]] {
            for &e in round {
                p.mark(elem(e), &mut scratch);
            }
            p.split(&mut scratch);
            assert!(p.set_count() >= prev);
            prev = p.set_count();
        }
    }
}
