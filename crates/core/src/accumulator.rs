//! Bounded accumulator tracking the N largest elements of a sequence.

use std::cmp::Reverse;
use std::collections::binary_heap::PeekMut;
use std::collections::BinaryHeap;

use crate::{Snapshot, Width};

/// Fill state of an accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fewer than `width` elements retained; every arrival is admitted.
    Warming,
    /// Retained set at capacity; an arrival must beat the floor to enter.
    Full,
}

/// Outcome of offering one element to the accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission<T> {
    /// Admitted into a free slot during warm-up.
    Retained,
    /// Admitted by evicting the previous floor element.
    Displaced(T),
    /// Rejected; the retained set is unchanged.
    Rejected,
}

/// Running selection of the `width` largest elements seen so far.
///
/// The retained set is a min-heap, so the eviction candidate is always at
/// the top. Replacement requires strictly exceeding the floor: an element
/// equal to the floor is rejected, and the first element to claim a slot
/// keeps it.
#[derive(Debug, Clone)]
pub struct TopN<T> {
    retained: BinaryHeap<Reverse<T>>,
    width: Width,
}

impl<T: Ord> TopN<T> {
    /// Create an accumulator retaining the `width` largest elements.
    /// A width of zero is valid and retains nothing.
    pub fn new(width: Width) -> Self {
        Self {
            retained: BinaryHeap::with_capacity(width),
            width,
        }
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn len(&self) -> usize {
        self.retained.len()
    }

    pub fn is_empty(&self) -> bool {
        self.retained.is_empty()
    }

    pub fn phase(&self) -> Phase {
        if self.retained.len() < self.width {
            Phase::Warming
        } else {
            Phase::Full
        }
    }

    /// Smallest retained element, the one a newcomer must beat.
    pub fn floor(&self) -> Option<&T> {
        self.retained.peek().map(|Reverse(v)| v)
    }

    /// Offer one element without materializing a snapshot.
    pub fn observe(&mut self, element: T) -> Admission<T> {
        if self.retained.len() < self.width {
            self.retained.push(Reverse(element));
            return Admission::Retained;
        }
        let displaced = match self.retained.peek_mut() {
            Some(slot) if element > slot.0 => {
                let Reverse(evicted) = PeekMut::pop(slot);
                Some(evicted)
            }
            _ => None,
        };
        match displaced {
            Some(evicted) => {
                self.retained.push(Reverse(element));
                Admission::Displaced(evicted)
            }
            None => Admission::Rejected,
        }
    }

    /// Consume one element and return the snapshot immediately after it.
    pub fn update(&mut self, element: T) -> Snapshot<T>
    where
        T: Clone,
    {
        self.observe(element);
        self.snapshot()
    }

    /// Materialize the current retained set, largest first.
    pub fn snapshot(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        Snapshot::from_unordered(self.retained.iter().map(|Reverse(v)| v.clone()).collect())
    }

    /// Consume the accumulator, yielding the retained elements largest
    /// first.
    pub fn into_descending(self) -> Vec<T> {
        self.retained
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(v)| v)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshots(width: Width, input: &[i64]) -> Vec<Vec<i64>> {
        let mut state = TopN::new(width);
        input.iter().map(|v| state.update(*v).into_values()).collect()
    }

    #[test]
    fn warm_up_then_replace_or_reject() {
        assert_eq!(
            snapshots(3, &[5, 1, 9, 3, 7, 2]),
            vec![
                vec![5],
                vec![5, 1],
                vec![9, 5, 1],
                vec![9, 5, 3],
                vec![9, 7, 5],
                vec![9, 7, 5],
            ],
        );
    }

    #[test]
    fn equal_values_never_displace() {
        assert_eq!(snapshots(1, &[4, 4, 4]), vec![vec![4]; 3]);
    }

    #[test]
    fn zero_width_stays_empty() {
        let mut state = TopN::new(0);
        assert_eq!(state.phase(), Phase::Full);
        for v in 0..4 {
            assert_eq!(state.observe(v), Admission::Rejected);
            assert!(state.snapshot().is_empty());
        }
    }

    #[test]
    fn new_maximum_tops_the_next_snapshot() {
        let input = [2, 5, 1, 9, 4, 3, 8, 6];
        let mut state = TopN::new(5);
        for v in &input[..4] {
            state.observe(*v);
        }
        assert_eq!(state.snapshot().max(), Some(&9));
    }

    #[test]
    fn admission_outcomes() {
        let mut state = TopN::new(2);
        assert_eq!(state.observe(3), Admission::Retained);
        assert_eq!(state.phase(), Phase::Warming);
        assert_eq!(state.observe(1), Admission::Retained);
        assert_eq!(state.phase(), Phase::Full);
        assert_eq!(state.observe(1), Admission::Rejected);
        assert_eq!(state.observe(5), Admission::Displaced(1));
        assert_eq!(state.floor(), Some(&3));
        assert_eq!(state.into_descending(), vec![5, 3]);
    }

    #[test]
    fn floor_never_decreases_once_full() {
        let input = [5, 1, 9, 3, 7, 2, 8, 0, 6];
        let mut state = TopN::new(3);
        let mut prev = None;
        for v in input {
            state.observe(v);
            if state.phase() == Phase::Full {
                let floor = state.floor().copied();
                if let (Some(p), Some(f)) = (prev, floor) {
                    assert!(f >= p);
                }
                prev = floor;
            }
        }
    }

    #[test]
    fn snapshot_is_detached_from_later_updates() {
        let mut state = TopN::new(2);
        let early = state.update(1);
        state.update(7);
        state.update(9);
        assert_eq!(early.into_values(), vec![1]);
        assert_eq!(state.snapshot().into_values(), vec![9, 7]);
    }
}
