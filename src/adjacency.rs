//! CSR-style adjacency index over a chosen transition endpoint array.
//!
//! Given `K[0..m)` (either `tail` or `head`), [`Adjacency::build`] produces
//! `offset[0..n]`/`adjacent[0..m)` such that `adjacent[offset[q]..offset[q+1])`
//! enumerates every transition `t` with `K[t] == q`. Rebuilt from scratch
//! each time it is needed, as the reference design does (it is cheap, O(n +
//! m), relative to the refinement work it supports).

use crate::ids::TransId;

pub(crate) struct Adjacency {
    offset: Vec<u32>,
    adjacent: Vec<TransId>,
}

impl Adjacency {
    /// Build the index keyed by `endpoint`, over a state space of size `n`.
    pub(crate) fn build(n: usize, endpoint: &[usize]) -> Self {
        let mut offset = vec![0u32; n + 1];
        for &q in endpoint {
            offset[q + 1] += 1;
        }
        for q in 0..n {
            offset[q + 1] += offset[q];
        }
        let m = endpoint.len();
        let mut adjacent = vec![TransId::from(0usize); m];
        // Walk endpoint in reverse, decrementing a cursor per bucket, so
        // that the bucket for each q fills from offset[q] upward without a
        // second pass or extra scratch array. The cursor starts at each
        // bucket's end boundary (offset[q + 1]), not its start, since it is
        // decremented before each write.
        let mut cursor: Vec<u32> = offset[1..].to_vec();
        for (t, &q) in endpoint.iter().enumerate().rev() {
            cursor[q] -= 1;
            adjacent[cursor[q] as usize] = TransId::from(t);
        }
        Adjacency { offset, adjacent }
    }

    /// Transitions whose chosen endpoint is `q`.
    #[inline]
    pub(crate) fn of(&self, q: usize) -> &[TransId] {
        let start = self.offset[q] as usize;
        let end = self.offset[q + 1] as usize;
        &self.adjacent[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_transitions_by_endpoint() {
        // states 0,1,2; endpoint (tails) = [0, 2, 0, 1]
        let endpoint = vec![0usize, 2, 0, 1];
        let adj = Adjacency::build(3, &endpoint);
        let of0: Vec<usize> = adj.of(0).iter().map(|t| t.as_usize()).collect();
        let of1: Vec<usize> = adj.of(1).iter().map(|t| t.as_usize()).collect();
        let of2: Vec<usize> = adj.of(2).iter().map(|t| t.as_usize()).collect();
        assert_eq!(of0.len(), 2);
        assert!(of0.contains(&0) && of0.contains(&2));
        assert_eq!(of1, vec![3]);
        assert_eq!(of2, vec![1]);
    }

    #[test]
    fn empty_state_has_empty_slice() {
        let endpoint: Vec<usize> = vec![0, 0];
        let adj = Adjacency::build(2, &endpoint);
        assert!(adj.of(1).is_empty());
    }
}
