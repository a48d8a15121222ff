//! The two comparison capabilities used by the containers.
//!
//! Sorting and searching a [`GrowableBuffer`](crate::GrowableBuffer) needs a total order, so it
//! takes a three-way [`Compare`]. A [`BinaryHeap`](crate::BinaryHeap) only ever asks whether one
//! priority must be ordered after another, so it takes the weaker two-way [`Precedence`]; ties may
//! resolve either way.
//!
//! Both traits are implemented for closures, so ad-hoc orders need no new types:
//!
//! ```
//! use contig::{BinaryHeap, GrowableBuffer};
//!
//! let mut xs = GrowableBuffer::from_slice(&[3, 1, 2]).unwrap();
//! xs.sort_with(&|a: &i32, b: &i32| b.cmp(a));
//! assert_eq!(xs, [3, 2, 1]);
//!
//! // Order by distance from 10.
//! let mut heap = BinaryHeap::with_comparator(|a: &i32, b: &i32| (a - 10).abs() > (b - 10).abs());
//! heap.push(1, ()).unwrap();
//! heap.push(12, ()).unwrap();
//! heap.push(30, ()).unwrap();
//! assert_eq!(heap.pop().map(|node| node.priority), Some(12));
//! ```

use core::cmp::Ordering;

/// A three-way comparison inducing a total order on `T`.
pub trait Compare<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Returns `true` if `a` and `b` fall in the same equivalence class.
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The order given by `T: Ord`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// The reverse of another [`Compare`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<T: ?Sized, C: Compare<T>> Compare<T> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// A two-way "comes after" relation between heap priorities.
///
/// `comes_after(a, b)` returns `true` iff `a` must be ordered after `b`, i.e. `b` belongs closer
/// to the top of the heap. This only has to split pairs into two categories; it need not be
/// consistent with any equality.
pub trait Precedence<P: ?Sized> {
    /// Returns `true` if `a` must be ordered after `b`.
    fn comes_after(&self, a: &P, b: &P) -> bool;
}

impl<P: ?Sized, F> Precedence<P> for F
where
    F: Fn(&P, &P) -> bool,
{
    #[inline]
    fn comes_after(&self, a: &P, b: &P) -> bool {
        self(a, b)
    }
}

/// Minimum-priority heap: `a` comes after `b` when `a > b`. This is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Min;

/// Maximum-priority heap: `a` comes after `b` when `a < b`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Max;

impl<P: PartialOrd + ?Sized> Precedence<P> for Min {
    #[inline]
    fn comes_after(&self, a: &P, b: &P) -> bool {
        a > b
    }
}

impl<P: PartialOrd + ?Sized> Precedence<P> for Max {
    #[inline]
    fn comes_after(&self, a: &P, b: &P) -> bool {
        a < b
    }
}
