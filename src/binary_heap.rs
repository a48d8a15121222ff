//! A priority queue implemented with a binary heap on top of a [`GrowableBuffer`].
//!
//! Insertion and popping the top node have `O(log n)` time complexity. Checking the top node is
//! `O(1)`. Building a heap from `n` nodes in one go ([`BinaryHeap::from_buffer`],
//! [`BinaryHeap::bulk_extend`], [`BinaryHeap::bulk_add`]) is `O(n)`.
//!
//! The order is given by a [`Precedence`] over the priorities: the node that no other node
//! "comes before" sits at the top. [`Min`] (the default) puts the smallest priority on top,
//! [`Max`](crate::Max) the largest.

use core::{
    fmt,
    mem::{self, ManuallyDrop, MaybeUninit},
    ptr, slice,
};

use crate::{
    buffer::{expect_capacity, GrowableBuffer},
    compare::{Min, Precedence},
    CapacityError, InsertError,
};

/// A heap entry: a priority and the payload it orders.
///
/// Use the unit payload `()` for a heap of bare priorities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HeapNode<P, V = ()> {
    /// Position in the heap order.
    pub priority: P,
    /// Payload carried along with the priority.
    pub value: V,
}

impl<P, V> HeapNode<P, V> {
    /// Creates a node.
    pub const fn new(priority: P, value: V) -> Self {
        Self { priority, value }
    }
}

impl<P, V> From<(P, V)> for HeapNode<P, V> {
    fn from((priority, value): (P, V)) -> Self {
        Self::new(priority, value)
    }
}

/// A priority queue implemented with a binary heap.
///
/// The nodes live in one [`GrowableBuffer`] read as an implicit complete binary tree: the
/// children of index `i` are `2i + 1` and `2i + 2`. No node comes after its children under the
/// comparator `C`.
///
/// It is a logic error for a priority to be modified in such a way that its ordering relative to
/// any other priority changes while it is in the heap. This is normally only possible through
/// `Cell`, `RefCell`, global state, I/O, or unsafe code.
///
/// ```
/// use contig::{BinaryHeap, Max};
///
/// let mut heap: BinaryHeap<i32, (), Max> = BinaryHeap::with_comparator(Max);
///
/// // We can use peek to look at the next node in the heap. In this case,
/// // there's no nodes in there yet so we get None.
/// assert_eq!(heap.peek(), None);
///
/// // Let's add some scores...
/// heap.push(1, ()).unwrap();
/// heap.push(5, ()).unwrap();
/// heap.push(2, ()).unwrap();
///
/// // Now peek shows the most important node in the heap.
/// assert_eq!(heap.peek().map(|node| node.priority), Some(5));
///
/// // We can check the length of a heap.
/// assert_eq!(heap.len(), 3);
///
/// // We can iterate over the nodes in the heap, although they are returned in
/// // storage order.
/// for node in &heap {
///     println!("{}", node.priority);
/// }
///
/// // If we instead pop these scores, they should come back in order.
/// assert_eq!(heap.pop().map(|node| node.priority), Some(5));
/// assert_eq!(heap.pop().map(|node| node.priority), Some(2));
/// assert_eq!(heap.pop().map(|node| node.priority), Some(1));
/// assert_eq!(heap.pop(), None);
///
/// // We can clear the heap of any remaining nodes.
/// heap.clear();
///
/// // The heap should now be empty.
/// assert!(heap.is_empty())
/// ```
pub struct BinaryHeap<P, V = (), C = Min> {
    storage: GrowableBuffer<HeapNode<P, V>>,
    cmp: C,
}

impl<P, V> BinaryHeap<P, V, Min> {
    /// Creates an empty min-heap. Does not allocate.
    ///
    /// ```
    /// use contig::BinaryHeap;
    ///
    /// let mut heap: BinaryHeap<u8> = BinaryHeap::new();
    /// heap.push(4, ()).unwrap();
    ///
    /// // in a static variable
    /// static HEAP: BinaryHeap<u8> = BinaryHeap::new();
    /// ```
    pub const fn new() -> Self {
        Self::with_comparator(Min)
    }
}

impl<P, V, C> BinaryHeap<P, V, C> {
    /// Creates an empty heap ordered by `cmp`. Does not allocate.
    ///
    /// ```
    /// use contig::{BinaryHeap, Max};
    ///
    /// static MAX_HEAP: BinaryHeap<u8, (), Max> = BinaryHeap::with_comparator(Max);
    /// assert!(MAX_HEAP.is_empty());
    /// ```
    pub const fn with_comparator(cmp: C) -> Self {
        Self {
            storage: GrowableBuffer::new(),
            cmp,
        }
    }

    /// Drops every node, releases the storage and returns the heap to the idle state.
    pub fn destroy(&mut self) {
        self.storage.destroy();
    }

    /// Returns the number of nodes in the heap.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Checks if the binary heap is empty.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Returns the capacity of the underlying storage.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Returns `true` if the heap holds no storage at all.
    pub fn is_idle(&self) -> bool {
        self.storage.is_idle()
    }

    /// Shrinks the storage to the current length. An empty heap goes back to idle.
    ///
    /// # Errors
    ///
    /// Fails like [`GrowableBuffer::shrink_to_fit`], leaving the heap unchanged.
    pub fn shrink_to_fit(&mut self) -> Result<(), CapacityError> {
        self.storage.shrink_to_fit()
    }

    /// Drops all nodes. The storage is kept.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Returns the top node, or `None` if the heap is empty.
    pub fn peek(&self) -> Option<&HeapNode<P, V>> {
        self.storage.first()
    }

    /// Returns the payload of the top node, or `None` if the heap is empty.
    pub fn peek_value(&self) -> Option<&V> {
        self.peek().map(|node| &node.value)
    }

    /// Returns the comparator.
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns an iterator visiting all nodes in storage order.
    pub fn iter(&self) -> slice::Iter<'_, HeapNode<P, V>> {
        self.storage.iter()
    }

    /// Returns the nodes in storage order.
    pub fn as_slice(&self) -> &[HeapNode<P, V>] {
        self.storage.as_slice()
    }

    /// Consumes the heap and returns its storage, in heap order.
    pub fn into_buffer(self) -> GrowableBuffer<HeapNode<P, V>> {
        self.storage
    }

    /// Makes room for `additional` more nodes and returns those slots for the caller to fill.
    ///
    /// The length does not change; commit the written slots with [`bulk_add`](Self::bulk_add).
    ///
    /// # Errors
    ///
    /// Fails like [`GrowableBuffer::reserve`], leaving the heap unchanged.
    pub fn reserve(
        &mut self,
        additional: usize,
    ) -> Result<&mut [MaybeUninit<HeapNode<P, V>>], CapacityError> {
        self.storage.reserve_additional(additional)?;
        Ok(&mut self.storage.spare_capacity_mut()[..additional])
    }
}

impl<P, V, C> BinaryHeap<P, V, C>
where
    C: Precedence<P>,
{
    /// Turns `storage` into a heap ordered by `cmp`, in place. `O(n)`.
    ///
    /// ```
    /// use contig::{BinaryHeap, GrowableBuffer, HeapNode, Min};
    ///
    /// let nodes: GrowableBuffer<HeapNode<u32>> =
    ///     [3, 1, 2].into_iter().map(|p| HeapNode::new(p, ())).collect();
    /// let heap = BinaryHeap::from_buffer(nodes, Min);
    /// assert_eq!(heap.peek(), Some(&HeapNode::new(1, ())));
    /// ```
    pub fn from_buffer(storage: GrowableBuffer<HeapNode<P, V>>, cmp: C) -> Self {
        let mut heap = Self { storage, cmp };
        heap.heapify();
        heap
    }

    /// Pushes a node onto the heap.
    ///
    /// # Errors
    ///
    /// Fails like [`GrowableBuffer::reserve`]. The heap is unchanged and the node comes back in
    /// the error.
    pub fn add(&mut self, node: HeapNode<P, V>) -> Result<(), InsertError<HeapNode<P, V>>> {
        self.storage.push(node)?;
        self.sift_up(self.len() - 1);
        Ok(())
    }

    /// Pushes `value` with the given `priority` onto the heap.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub fn push(&mut self, priority: P, value: V) -> Result<(), InsertError<HeapNode<P, V>>> {
        self.add(HeapNode::new(priority, value))
    }

    /// Removes the top node and returns it, or `None` if the heap is empty.
    pub fn pop(&mut self) -> Option<HeapNode<P, V>> {
        self.storage.pop_last().map(|mut node| {
            if !self.is_empty() {
                mem::swap(&mut node, &mut self.storage[0]);
                self.sift_down(0);
            }
            node
        })
    }

    /// Removes the top node and returns its payload, or `None` if the heap is empty.
    pub fn pop_value(&mut self) -> Option<V> {
        self.pop().map(|node| node.value)
    }

    /// Commits `n` nodes written into the window returned by [`reserve`](Self::reserve), then
    /// restores the heap order over the whole storage.
    ///
    /// This is cheapest on an empty heap; on a non-empty one it still re-heapifies everything.
    ///
    /// # Safety
    ///
    /// The first `n` slots past the current length must have been reserved and initialized.
    ///
    /// ```
    /// use contig::{BinaryHeap, HeapNode};
    ///
    /// let priorities = [5, 3, 8];
    /// let mut heap: BinaryHeap<i32> = BinaryHeap::new();
    ///
    /// let window = heap.reserve(priorities.len()).unwrap();
    /// for (slot, p) in window.iter_mut().zip(priorities) {
    ///     slot.write(HeapNode::new(p, ()));
    /// }
    /// unsafe { heap.bulk_add(priorities.len()) };
    ///
    /// assert_eq!(heap.pop().map(|node| node.priority), Some(3));
    /// ```
    pub unsafe fn bulk_add(&mut self, n: usize) {
        let len = self.len();
        assert!(
            n <= self.capacity() - len,
            "bulk_add of {n} nodes exceeds the reserved capacity"
        );
        self.storage.set_len(len + n);
        self.heapify();
    }

    /// Appends every node of `iter`, then restores the heap order over the whole storage.
    ///
    /// # Errors
    ///
    /// Fails like [`GrowableBuffer::reserve`]. Nodes appended before the failure are dropped
    /// again, so the heap is left as it was.
    pub fn bulk_extend<I>(&mut self, iter: I) -> Result<(), CapacityError>
    where
        I: IntoIterator<Item = HeapNode<P, V>>,
    {
        let old_len = self.len();
        let iter = iter.into_iter();
        let mut result = self.storage.reserve_additional(iter.size_hint().0);
        if result.is_ok() {
            for node in iter {
                if let Err(err) = self.storage.push(node) {
                    result = Err(err.into());
                    break;
                }
            }
        }

        match result {
            Ok(()) => self.heapify(),
            Err(_) => self.storage.truncate(old_len),
        }
        result
    }

    /* Private API */

    /// Floyd's construction: sift every internal node down, last one first.
    fn heapify(&mut self) {
        let len = self.len();
        for pos in (0..len / 2).rev() {
            self.sift_down(pos);
        }
    }

    fn sift_up(&mut self, pos: usize) {
        let cmp = &self.cmp;
        unsafe {
            // Take out the node at `pos` and create a hole.
            let mut hole = Hole::new(self.storage.as_mut_slice(), pos);

            while hole.pos() > 0 {
                let parent = (hole.pos() - 1) / 2;
                if !cmp.comes_after(&hole.get(parent).priority, &hole.element().priority) {
                    break;
                }
                hole.move_to(parent);
            }
        }
    }

    fn sift_down(&mut self, pos: usize) {
        let end = self.len();
        let cmp = &self.cmp;
        unsafe {
            let mut hole = Hole::new(self.storage.as_mut_slice(), pos);
            let mut child = 2 * pos + 1;
            while child < end {
                let right = child + 1;
                // compare with the better of the two children
                if right < end && cmp.comes_after(&hole.get(child).priority, &hole.get(right).priority) {
                    child = right;
                }
                if !cmp.comes_after(&hole.element().priority, &hole.get(child).priority) {
                    break;
                }
                hole.move_to(child);
                child = 2 * hole.pos() + 1;
            }
        }
    }
}

/// A node lifted out of the storage while it travels up or down the tree.
///
/// The slot at `pos` is logically vacant. Dropping the hole writes the node back there, so the
/// storage stays fully initialized even if a comparison panics mid-sift.
struct Hole<'a, T> {
    data: &'a mut [T],
    elt: ManuallyDrop<T>,
    pos: usize,
}

impl<'a, T> Hole<'a, T> {
    /// `pos` must index into `data`.
    #[inline]
    unsafe fn new(data: &'a mut [T], pos: usize) -> Self {
        debug_assert!(pos < data.len());
        let elt = ptr::read(data.get_unchecked(pos));
        Hole {
            data,
            elt: ManuallyDrop::new(elt),
            pos,
        }
    }

    #[inline]
    fn pos(&self) -> usize {
        self.pos
    }

    /// The travelling node.
    #[inline]
    fn element(&self) -> &T {
        &self.elt
    }

    /// `index` must be in bounds and not the vacant slot.
    #[inline]
    unsafe fn get(&self, index: usize) -> &T {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        self.data.get_unchecked(index)
    }

    /// Shifts the node at `index` into the vacant slot; `index` becomes vacant.
    #[inline]
    unsafe fn move_to(&mut self, index: usize) {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        let index_ptr: *const _ = self.data.get_unchecked(index);
        let hole_ptr = self.data.get_unchecked_mut(self.pos);
        ptr::copy_nonoverlapping(index_ptr, hole_ptr, 1);
        self.pos = index;
    }
}

impl<T> Drop for Hole<'_, T> {
    #[inline]
    fn drop(&mut self) {
        unsafe {
            let pos = self.pos;
            ptr::write(self.data.get_unchecked_mut(pos), ptr::read(&*self.elt));
        }
    }
}

impl<P, V, C> Default for BinaryHeap<P, V, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<P, V, C> Clone for BinaryHeap<P, V, C>
where
    P: Clone,
    V: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            cmp: self.cmp.clone(),
        }
    }
}

impl<P, V, C> fmt::Debug for BinaryHeap<P, V, C>
where
    P: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, P, V, C> IntoIterator for &'a BinaryHeap<P, V, C> {
    type Item = &'a HeapNode<P, V>;
    type IntoIter = slice::Iter<'a, HeapNode<P, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P, V, C> Extend<HeapNode<P, V>> for BinaryHeap<P, V, C>
where
    C: Precedence<P>,
{
    /// # Panics
    ///
    /// Panics if the storage cannot grow to hold every node.
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = HeapNode<P, V>>,
    {
        expect_capacity(self.bulk_extend(iter));
    }
}

impl<P, V, C> FromIterator<HeapNode<P, V>> for BinaryHeap<P, V, C>
where
    C: Precedence<P> + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = HeapNode<P, V>>,
    {
        Self::from_buffer(iter.into_iter().collect(), C::default())
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use static_assertions::assert_not_impl_any;

    use super::{BinaryHeap, HeapNode};
    use crate::{
        compare::{Max, Min, Precedence},
        CapacityError, GrowableBuffer,
    };

    // Ensure a `BinaryHeap` containing `!Send` values stays `!Send` itself.
    assert_not_impl_any!(BinaryHeap<*const (), ()>: Send);
    assert_not_impl_any!(BinaryHeap<u8, *const ()>: Send);

    fn assert_heap<P, V, C: Precedence<P>>(heap: &BinaryHeap<P, V, C>) {
        let nodes = heap.as_slice();
        for i in 1..nodes.len() {
            let parent = (i - 1) / 2;
            assert!(
                !heap.comparator().comes_after(&nodes[parent].priority, &nodes[i].priority),
                "node {i} comes before its parent"
            );
        }
    }

    fn priorities<V, C: Precedence<i32>>(heap: &BinaryHeap<i32, V, C>) -> Vec<i32> {
        heap.iter().map(|node| node.priority).collect()
    }

    fn drain<V, C: Precedence<i32>>(heap: &mut BinaryHeap<i32, V, C>) -> Vec<i32> {
        let mut out = Vec::new();
        while let Some(node) = heap.pop() {
            assert_heap(heap);
            out.push(node.priority);
        }
        out
    }

    #[test]
    fn static_new() {
        static _B: BinaryHeap<i32> = BinaryHeap::new();
        static _M: BinaryHeap<i32, (), Max> = BinaryHeap::with_comparator(Max);
    }

    #[test]
    fn new_is_idle() {
        let heap: BinaryHeap<i32> = BinaryHeap::new();
        assert!(heap.is_idle());
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.peek_value(), None);
    }

    #[test]
    fn min() {
        let mut heap: BinaryHeap<i32> = BinaryHeap::new();
        for p in [1, 2, 3, 17, 19, 36, 7, 25, 100] {
            heap.push(p, ()).unwrap();
        }

        assert_eq!(priorities(&heap), [1, 2, 3, 17, 19, 36, 7, 25, 100]);

        assert_eq!(heap.pop(), Some(HeapNode::new(1, ())));

        assert_eq!(priorities(&heap), [2, 17, 3, 25, 19, 36, 7, 100]);

        assert_eq!(drain(&mut heap), [2, 3, 7, 17, 19, 25, 36, 100]);
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn max() {
        let mut heap: BinaryHeap<i32, (), Max> = BinaryHeap::with_comparator(Max);
        for p in [1, 2, 3, 17, 19, 36, 7, 25, 100] {
            heap.push(p, ()).unwrap();
        }

        assert_eq!(priorities(&heap), [100, 36, 19, 25, 3, 2, 7, 1, 17]);

        assert_eq!(heap.pop().map(|node| node.priority), Some(100));

        assert_eq!(priorities(&heap), [36, 25, 19, 17, 3, 2, 7, 1]);

        assert_eq!(drain(&mut heap), [36, 25, 19, 17, 7, 3, 2, 1]);
    }

    #[test]
    fn push_then_drain() {
        let mut heap: BinaryHeap<i32> = BinaryHeap::new();
        for p in [5, 3, 8, 1, 4, 9, 2] {
            heap.push(p, ()).unwrap();
            assert_heap(&heap);
        }
        assert_eq!(heap.peek().map(|node| node.priority), Some(1));
        assert_eq!(drain(&mut heap), [1, 2, 3, 4, 5, 8, 9]);
        assert!(heap.is_empty());
    }

    #[test]
    fn bulk_add_then_drain() {
        let input = [5, 3, 8, 1, 4, 9, 2];
        let mut heap: BinaryHeap<i32> = BinaryHeap::new();

        let window = heap.reserve(input.len()).unwrap();
        assert_eq!(window.len(), input.len());
        for (slot, p) in window.iter_mut().zip(input) {
            slot.write(HeapNode::new(p, ()));
        }
        assert!(heap.is_empty());

        unsafe { heap.bulk_add(input.len()) };
        assert_heap(&heap);
        assert_eq!(heap.peek().map(|node| node.priority), Some(1));
        assert_eq!(drain(&mut heap), [1, 2, 3, 4, 5, 8, 9]);
    }

    #[test]
    fn bulk_add_onto_non_empty() {
        let mut heap: BinaryHeap<i32> = BinaryHeap::new();
        heap.push(4, ()).unwrap();
        heap.push(6, ()).unwrap();

        let window = heap.reserve(3).unwrap();
        for (slot, p) in window.iter_mut().zip([5, 0, 7]) {
            slot.write(HeapNode::new(p, ()));
        }
        unsafe { heap.bulk_add(3) };

        assert_heap(&heap);
        assert_eq!(drain(&mut heap), [0, 4, 5, 6, 7]);
    }

    #[test]
    #[should_panic]
    fn bulk_add_past_reserved() {
        let mut heap: BinaryHeap<i32> = BinaryHeap::new();
        heap.reserve(2).unwrap();
        let n = heap.capacity() + 1;
        unsafe { heap.bulk_add(n) };
    }

    #[test]
    fn bulk_extend_and_collect() {
        let mut heap: BinaryHeap<i32, char> = BinaryHeap::new();
        heap.bulk_extend([(3, 'c'), (1, 'a'), (2, 'b')].map(HeapNode::from)).unwrap();
        assert_heap(&heap);
        assert_eq!(heap.pop_value(), Some('a'));

        heap.extend([HeapNode::new(0, 'z')]);
        assert_eq!(heap.pop_value(), Some('z'));

        let collected: BinaryHeap<i32, (), Max> =
            (0..50).map(|p| HeapNode::new((p * 37) % 50, ())).collect();
        assert_heap(&collected);
        assert_eq!(collected.peek().map(|node| node.priority), Some(49));
    }

    #[test]
    fn bulk_extend_overflow_leaves_heap() {
        struct Endless;
        impl Iterator for Endless {
            type Item = HeapNode<i32>;
            fn next(&mut self) -> Option<Self::Item> {
                Some(HeapNode::new(0, ()))
            }
            fn size_hint(&self) -> (usize, Option<usize>) {
                (usize::MAX, None)
            }
        }

        let mut heap: BinaryHeap<i32> = BinaryHeap::new();
        heap.push(1, ()).unwrap();
        assert_eq!(heap.bulk_extend(Endless), Err(CapacityError::RangeOverflow));
        assert_eq!(priorities(&heap), [1]);
    }

    #[test]
    fn from_buffer_heapifies() {
        let nodes: GrowableBuffer<HeapNode<i32>> = [9, 8, 7, 6, 5, 4, 3, 2, 1, 0]
            .into_iter()
            .map(|p| HeapNode::new(p, ()))
            .collect();
        let mut heap = BinaryHeap::from_buffer(nodes, Min);
        assert_heap(&heap);
        assert_eq!(drain(&mut heap), [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

        let buffer = heap.into_buffer();
        assert!(buffer.is_empty());
    }

    #[test]
    fn custom_comparator() {
        // Order by distance from 10; ties in distance go either way.
        let mut heap = BinaryHeap::with_comparator(|a: &i32, b: &i32| (a - 10).abs() > (b - 10).abs());
        for p in [0, 30, 12, 7, 10] {
            heap.push(p, ()).unwrap();
            assert_heap(&heap);
        }
        assert_eq!(drain(&mut heap), [10, 12, 7, 0, 30]);
    }

    #[test]
    fn payloads() {
        let mut heap: BinaryHeap<u8, &str> = BinaryHeap::new();
        heap.push(2, "two").unwrap();
        heap.push(1, "one").unwrap();
        heap.add(HeapNode::new(3, "three")).unwrap();

        assert_eq!(heap.peek_value(), Some(&"one"));
        assert_eq!(heap.pop_value(), Some("one"));
        assert_eq!(heap.pop(), Some(HeapNode::new(2, "two")));
        assert_eq!(heap.pop_value(), Some("three"));
        assert_eq!(heap.pop_value(), None);
    }

    #[test]
    fn clear_and_destroy() {
        let mut heap: BinaryHeap<i32> = (0..10).map(|p| HeapNode::new(p, ())).collect();
        heap.clear();
        assert!(heap.is_empty());
        assert!(heap.capacity() >= 10);

        heap.push(1, ()).unwrap();
        heap.destroy();
        assert!(heap.is_empty());
        assert!(heap.is_idle());
    }

    #[test]
    fn clear_then_shrink_is_idle() {
        let mut heap: BinaryHeap<i32> = (0..10).map(|p| HeapNode::new(p, ())).collect();
        assert!(!heap.is_idle());

        heap.pop().unwrap();
        heap.shrink_to_fit().unwrap();
        assert_eq!(heap.capacity(), 9);
        assert_heap(&heap);

        heap.clear();
        heap.shrink_to_fit().unwrap();
        assert!(heap.is_idle());

        heap.push(3, ()).unwrap();
        assert_eq!(heap.capacity(), 8);
    }

    #[test]
    fn add_overflow_returns_node() {
        use core::sync::atomic::{AtomicUsize, Ordering};

        static DROPS: AtomicUsize = AtomicUsize::new(0);

        #[derive(Debug, PartialEq)]
        struct Token;
        impl Drop for Token {
            fn drop(&mut self) {
                DROPS.fetch_add(1, Ordering::Relaxed);
            }
        }

        let mut heap: BinaryHeap<(), Token> = BinaryHeap::new();
        heap.storage.reserve(usize::MAX).unwrap();
        unsafe { heap.storage.set_len(usize::MAX) };

        let err = heap.push((), Token).unwrap_err();
        assert_eq!(err.kind, CapacityError::RangeOverflow);
        assert_eq!(heap.len(), usize::MAX);
        assert_eq!(DROPS.load(Ordering::Relaxed), 0);

        let err = heap.add(err.into_item()).unwrap_err();
        assert_eq!(err.kind, CapacityError::RangeOverflow);
        assert_eq!(heap.len(), usize::MAX);
        assert_eq!(err.into_item(), HeapNode::new((), Token));
        assert_eq!(DROPS.load(Ordering::Relaxed), 2);

        unsafe { heap.storage.set_len(0) };
    }

    #[test]
    fn drop() {
        droppable!();

        {
            let mut heap: BinaryHeap<i32, Droppable> = BinaryHeap::new();
            heap.push(0, Droppable::new(0)).unwrap();
            heap.push(1, Droppable::new(1)).unwrap();
            heap.pop().unwrap();
        }

        assert_eq!(Droppable::count(), 0);

        {
            let mut heap: BinaryHeap<i32, Droppable> = BinaryHeap::new();
            heap.push(1, Droppable::new(1)).unwrap();
            heap.push(0, Droppable::new(0)).unwrap();
            let copy = heap.clone();
            assert_eq!(Droppable::count(), 4);
            core::mem::drop(copy);
        }

        assert_eq!(Droppable::count(), 0);
    }

    #[test]
    fn panicking_comparator_keeps_nodes() {
        use std::panic::{catch_unwind, AssertUnwindSafe};

        droppable!();

        let cmp = |a: &i32, b: &i32| {
            if *a == 13 || *b == 13 {
                panic!("unlucky");
            }
            a > b
        };

        {
            let mut heap = BinaryHeap::with_comparator(cmp);
            for p in [5, 3, 8] {
                heap.push(p, Droppable::new(p)).unwrap();
            }
            let result = catch_unwind(AssertUnwindSafe(|| heap.push(13, Droppable::new(13))));
            assert!(result.is_err());
            assert_eq!(heap.len(), 4);
            assert_eq!(Droppable::count(), 4);
        }

        assert_eq!(Droppable::count(), 0);
    }

    #[test]
    fn debug() {
        use std::format;

        let mut heap: BinaryHeap<u8> = BinaryHeap::new();
        heap.push(2, ()).unwrap();
        heap.push(1, ()).unwrap();
        assert_eq!(
            format!("{heap:?}"),
            "[HeapNode { priority: 1, value: () }, HeapNode { priority: 2, value: () }]"
        );
    }
}
