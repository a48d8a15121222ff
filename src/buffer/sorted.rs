//! Searching, ordered insertion, sorting and run compaction for a [`GrowableBuffer`].
//!
//! Every operation comes in two forms: one using `T: Ord`, and a `_with` form taking any
//! [`Compare`]. The binary searches and [`sorted_insert`] assume the buffer is already sorted by
//! the same order; on an unsorted buffer they return an unspecified position but stay memory safe.
//!
//! ```
//! use contig::GrowableBuffer;
//!
//! let mut xs = GrowableBuffer::from_slice(&[5, 1, 3, 3]).unwrap();
//! xs.sort();
//! assert_eq!(xs, [1, 3, 3, 5]);
//!
//! assert_eq!(xs.lower_bound(&3), 1);
//! assert_eq!(xs.upper_bound(&3), 3);
//!
//! assert_eq!(xs.sorted_insert(4).unwrap(), 3);
//! assert_eq!(xs, [1, 3, 3, 4, 5]);
//! ```
//!
//! [`sorted_insert`]: GrowableBuffer::sorted_insert

use core::cmp::Ordering;

use super::GrowableBuffer;
use crate::{
    compare::{Compare, Natural},
    InsertError,
};

/// A merge function that is never called, for the forms without one.
type NoMerge<T> = fn(&mut T, &mut T) -> bool;

impl<T> GrowableBuffer<T> {
    /// Returns the index of the first element not less than `value` under `cmp`.
    ///
    /// Returns the length when every element is less.
    pub fn lower_bound_with<C>(&self, value: &T, cmp: &C) -> usize
    where
        C: Compare<T>,
    {
        self.partition_point_by(|elem| cmp.compare(value, elem) == Ordering::Greater)
    }

    /// Returns the index of the first element greater than `value` under `cmp`.
    ///
    /// Returns the length when no element is greater.
    pub fn upper_bound_with<C>(&self, value: &T, cmp: &C) -> usize
    where
        C: Compare<T>,
    {
        self.partition_point_by(|elem| cmp.compare(value, elem) != Ordering::Less)
    }

    /// [`lower_bound_with`](Self::lower_bound_with) under the natural order.
    pub fn lower_bound(&self, value: &T) -> usize
    where
        T: Ord,
    {
        self.lower_bound_with(value, &Natural)
    }

    /// [`upper_bound_with`](Self::upper_bound_with) under the natural order.
    pub fn upper_bound(&self, value: &T) -> usize
    where
        T: Ord,
    {
        self.upper_bound_with(value, &Natural)
    }

    /// Inserts `value` before the first element not less than it and returns that position.
    ///
    /// Among equivalent elements, the new one goes first.
    ///
    /// # Errors
    ///
    /// Fails like [`reserve`](Self::reserve). The buffer is unchanged and `value` comes back in
    /// the error.
    pub fn sorted_insert_with<C>(&mut self, value: T, cmp: &C) -> Result<usize, InsertError<T>>
    where
        C: Compare<T>,
    {
        let index = self.lower_bound_with(&value, cmp);
        self.insert(index, value)?;
        Ok(index)
    }

    /// [`sorted_insert_with`](Self::sorted_insert_with) under the natural order.
    pub fn sorted_insert(&mut self, value: T) -> Result<usize, InsertError<T>>
    where
        T: Ord,
    {
        self.sorted_insert_with(value, &Natural)
    }

    /// Sorts ascending under `cmp`. The sort is stable.
    pub fn sort_with<C>(&mut self, cmp: &C)
    where
        C: Compare<T>,
    {
        self.as_mut_slice().sort_by(|a, b| cmp.compare(a, b));
    }

    /// Sorts descending under `cmp`. The sort is stable.
    pub fn sort_descending_with<C>(&mut self, cmp: &C)
    where
        C: Compare<T>,
    {
        self.as_mut_slice().sort_by(|a, b| cmp.compare(b, a));
    }

    /// Sorts ascending.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_with(&Natural);
    }

    /// Sorts descending.
    pub fn sort_descending(&mut self)
    where
        T: Ord,
    {
        self.sort_descending_with(&Natural);
    }

    /// Collapses every run of adjacent equivalent elements (under `cmp`) into one representative.
    ///
    /// The first element of a run starts out as its representative. Each further element of the
    /// run is offered to `merge(representative, candidate)`, which may fold the candidate into the
    /// representative; returning `true` promotes the candidate to representative instead. All
    /// elements of a run but the representative are dropped. Representatives keep their relative
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use contig::GrowableBuffer;
    ///
    /// // Word counts, sorted by word.
    /// let mut counts = GrowableBuffer::from_slice(&[("a", 1), ("b", 2), ("b", 5), ("c", 1)]).unwrap();
    /// counts.compactify_with(&|x: &(&str, u32), y: &(&str, u32)| x.0.cmp(y.0), |rep, cand| {
    ///     rep.1 += cand.1;
    ///     false
    /// });
    /// assert_eq!(counts, [("a", 1), ("b", 7), ("c", 1)]);
    /// ```
    pub fn compactify_with<C, M>(&mut self, cmp: &C, merge: M)
    where
        C: Compare<T>,
        M: FnMut(&mut T, &mut T) -> bool,
    {
        self.compact_runs(|a, b| cmp.equivalent(a, b), Some(merge));
    }

    /// [`compactify_with`](Self::compactify_with) under the natural order.
    pub fn compactify<M>(&mut self, merge: M)
    where
        T: Ord,
        M: FnMut(&mut T, &mut T) -> bool,
    {
        self.compactify_with(&Natural, merge);
    }

    /// Like [`compactify_with`](Self::compactify_with), with runs delimited by an equivalence
    /// predicate instead of a comparator.
    pub fn compactify_by<E, M>(&mut self, eq: E, merge: M)
    where
        E: FnMut(&T, &T) -> bool,
        M: FnMut(&mut T, &mut T) -> bool,
    {
        self.compact_runs(eq, Some(merge));
    }

    /// Compaction without a merge function: drops *every* element of a run of two or more
    /// equivalent elements, keeping only the elements that were unique.
    ///
    /// ```
    /// use contig::GrowableBuffer;
    ///
    /// let mut xs = GrowableBuffer::from_slice(&[1, 1, 2, 3, 3, 3, 4]).unwrap();
    /// xs.erase_runs();
    /// assert_eq!(xs, [2, 4]);
    /// ```
    pub fn erase_runs(&mut self)
    where
        T: Ord,
    {
        self.erase_runs_with(&Natural);
    }

    /// [`erase_runs`](Self::erase_runs) with equivalence under `cmp`.
    pub fn erase_runs_with<C>(&mut self, cmp: &C)
    where
        C: Compare<T>,
    {
        self.compact_runs(|a, b| cmp.equivalent(a, b), None::<NoMerge<T>>);
    }

    /// [`erase_runs`](Self::erase_runs) with runs delimited by an equivalence predicate.
    pub fn erase_runs_by<E>(&mut self, eq: E)
    where
        E: FnMut(&T, &T) -> bool,
    {
        self.compact_runs(eq, None::<NoMerge<T>>);
    }

    /// Number of leading elements for which `pred` holds, assuming it holds on a prefix.
    fn partition_point_by<P>(&self, mut pred: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let slots = self.as_slice();
        let (mut low, mut high) = (0, slots.len());
        while low < high {
            let mid = low + (high - low) / 2;
            if pred(&slots[mid]) {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        low
    }

    // Survivors are swapped down to `write`, so every slot stays initialized and a panicking
    // callback leaves a valid (if partly permuted) buffer.
    fn compact_runs<E, M>(&mut self, mut eq: E, mut merge: Option<M>)
    where
        E: FnMut(&T, &T) -> bool,
        M: FnMut(&mut T, &mut T) -> bool,
    {
        let len = self.len();
        let slots = self.as_mut_slice();
        let mut write = 0;
        let mut cursor = 0;

        while cursor < len {
            let mut representative = cursor;
            let mut next = cursor + 1;
            while next < len {
                let (head, tail) = slots.split_at_mut(next);
                let (rep, candidate) = (&mut head[representative], &mut tail[0]);
                if !eq(&*rep, &*candidate) {
                    break;
                }
                if let Some(merge) = merge.as_mut() {
                    if merge(rep, candidate) {
                        representative = next;
                    }
                }
                next += 1;
            }

            if next - cursor == 1 || merge.is_some() {
                slots.swap(write, representative);
                write += 1;
            }
            cursor = next;
        }

        self.truncate(write);
    }
}
