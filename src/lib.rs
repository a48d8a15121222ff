//! A growable contiguous buffer and a binary-heap priority queue built on top of it.
//!
//! Both containers start *idle*: constructing one performs no allocation. The
//! first growth operation allocates a block of [`GrowableBuffer::MIN_NON_ZERO_CAP`]
//! slots, and every later growth multiplies the capacity by ~1.625 until the
//! request fits, so a sequence of appends costs amortized *O*(1) each.
//!
//! Every fallible operation returns a [`CapacityError`] instead of aborting; a
//! failed call leaves the container exactly as it was. Operations that take ownership of an
//! element return an [`InsertError`] instead, which hands the element back.
//!
//! # Examples
//!
//! ## `GrowableBuffer`
//!
//! ```
//! use contig::GrowableBuffer;
//!
//! let mut xs: GrowableBuffer<u8> = GrowableBuffer::new();
//! assert!(xs.is_idle());
//!
//! xs.push(0).unwrap();
//! xs.push(1).unwrap();
//! xs.push(2).unwrap();
//!
//! assert_eq!(xs.capacity(), 8);
//! assert_eq!(xs.pop_last(), Some(2));
//!
//! xs.splice(0..1, &[7, 7, 7]).unwrap();
//! assert_eq!(xs, [7, 7, 7, 1]);
//! ```
//!
//! ## `BinaryHeap`
//!
//! ```
//! use contig::{BinaryHeap, HeapNode};
//!
//! // A minimum-priority heap carrying a `&str` payload.
//! let mut heap: BinaryHeap<u32, &str> = BinaryHeap::new();
//!
//! heap.push(5, "five").unwrap();
//! heap.push(1, "one").unwrap();
//! heap.push(3, "three").unwrap();
//!
//! assert_eq!(heap.peek_value(), Some(&"one"));
//! assert_eq!(heap.pop(), Some(HeapNode::new(1, "one")));
//! assert_eq!(heap.pop_value(), Some("three"));
//! ```
//!
//! # Concurrency
//!
//! Nothing in this crate is synchronised. The containers are `Send`/`Sync` exactly when their
//! elements are, and mutation requires `&mut`, so sharing one across threads needs an external
//! lock.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub use binary_heap::{BinaryHeap, HeapNode};
pub use buffer::GrowableBuffer;
pub use compare::{Compare, Max, Min, Natural, Precedence, Reverse};

#[macro_use]
#[cfg(test)]
mod test_helpers;

pub mod binary_heap;
pub mod buffer;
pub mod compare;
mod slice;

#[cfg(feature = "serde")]
mod de;
#[cfg(feature = "serde")]
mod ser;

#[cfg(feature = "defmt")]
#[path = "defmt.rs"]
mod defmt_impl;

#[cfg(feature = "ufmt")]
mod ufmt;

/// The error type for every fallible growth operation.
///
/// A call that returns this error did not modify the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub enum CapacityError {
    /// The requested element count cannot be represented in the address space.
    ///
    /// Detected with checked arithmetic before any allocation is attempted.
    RangeOverflow,
    /// The allocator could not satisfy the request.
    AllocationFailure,
}

impl core::fmt::Display for CapacityError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RangeOverflow => f.write_str("requested capacity exceeds the address space"),
            Self::AllocationFailure => f.write_str("memory allocation failed"),
        }
    }
}

impl core::error::Error for CapacityError {}

/// A rejected insertion: the item the container could not take, handed back with the reason.
#[derive(Clone, PartialEq, Eq)]
pub struct InsertError<T> {
    /// The item that was not inserted.
    pub item: T,
    /// Why the container could not grow.
    pub kind: CapacityError,
}

impl<T> InsertError<T> {
    pub(crate) const fn new(item: T, kind: CapacityError) -> Self {
        Self { item, kind }
    }

    /// Returns the rejected item.
    pub fn into_item(self) -> T {
        self.item
    }
}

impl<T> From<InsertError<T>> for CapacityError {
    fn from(err: InsertError<T>) -> Self {
        err.kind
    }
}

impl<T> core::fmt::Debug for InsertError<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InsertError")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl<T> core::fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "insertion rejected: {}", self.kind)
    }
}

impl<T> core::error::Error for InsertError<T> {}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::{CapacityError, InsertError};

    #[test]
    fn error_display() {
        assert_eq!(
            CapacityError::RangeOverflow.to_string(),
            "requested capacity exceeds the address space"
        );
        assert_eq!(
            CapacityError::AllocationFailure.to_string(),
            "memory allocation failed"
        );
    }

    #[test]
    fn insert_error_hands_item_back() {
        use std::{format, string::String};

        let err = InsertError::new(String::from("kept"), CapacityError::RangeOverflow);
        assert_eq!(
            err.to_string(),
            "insertion rejected: requested capacity exceeds the address space"
        );
        assert_eq!(format!("{err:?}"), "InsertError { kind: RangeOverflow, .. }");
        assert_eq!(CapacityError::from(err.clone()), CapacityError::RangeOverflow);
        assert_eq!(err.into_item(), "kept");
    }
}
