//! A contiguous growable buffer with an explicit, fallible growth discipline.

use core::{
    borrow, cmp::Ordering, fmt, hash,
    marker::PhantomData,
    mem::{self, MaybeUninit},
    ops::{self, Range, RangeBounds},
    ptr::{self, NonNull},
    slice,
};

use alloc::alloc::{alloc, dealloc, realloc, Layout};

use crate::{CapacityError, InsertError};

mod into_iter;
pub mod sorted;

pub use into_iter::IntoIter;

/// A contiguous, growable array of `T`.
///
/// The buffer tracks its logical length separately from the number of allocated slots. It is
/// created *idle*, without a block; the first growth allocates [`MIN_NON_ZERO_CAP`] slots and
/// further growth multiplies the capacity by ~1.625 (`c + c/2 + c/8`) until the request fits.
///
/// Every growth path validates and allocates before it commits, so a failed [`reserve`],
/// [`push`], [`append_default`] or [`splice`] leaves the buffer exactly as it was.
///
/// Growth may move the whole block, so references into the buffer cannot be held across a call
/// that might reallocate; the borrow checker enforces this. Hold an index instead and re-derive
/// the reference afterwards, or let [`new_element_rebased`] do it.
///
/// # Examples
///
/// ```
/// use contig::GrowableBuffer;
///
/// let mut buf = GrowableBuffer::new();
/// for i in 1..=20 {
///     buf.push(i).unwrap();
/// }
///
/// assert_eq!(buf.len(), 20);
/// assert_eq!(buf.capacity(), 20);
/// assert_eq!(buf.first(), Some(&1));
///
/// assert_eq!(buf.remove_at(0), 1);
/// assert_eq!(buf.lazy_remove_at(0), 2);
/// assert_eq!(buf[0], 20);
/// ```
///
/// [`MIN_NON_ZERO_CAP`]: GrowableBuffer::MIN_NON_ZERO_CAP
/// [`reserve`]: GrowableBuffer::reserve
/// [`push`]: GrowableBuffer::push
/// [`append_default`]: GrowableBuffer::append_default
/// [`splice`]: GrowableBuffer::splice
/// [`new_element_rebased`]: GrowableBuffer::new_element_rebased
pub struct GrowableBuffer<T> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
    phantom: PhantomData<T>,
}

// NOTE(unsafe) the buffer owns its block exclusively, like `Box<[T]>`
unsafe impl<T: Send> Send for GrowableBuffer<T> {}
unsafe impl<T: Sync> Sync for GrowableBuffer<T> {}

impl<T> GrowableBuffer<T> {
    /// Capacity of the first block allocated by an idle buffer.
    pub const MIN_NON_ZERO_CAP: usize = 8;

    /// Largest element count whose block size is representable.
    pub const MAX_CAPACITY: usize = if mem::size_of::<T>() == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / mem::size_of::<T>()
    };

    /// Constructs a new, idle buffer. Does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use contig::GrowableBuffer;
    ///
    /// let buf: GrowableBuffer<u64> = GrowableBuffer::new();
    /// assert!(buf.is_idle());
    ///
    /// static EMPTY: GrowableBuffer<u8> = GrowableBuffer::new();
    /// assert_eq!(EMPTY.capacity(), 0);
    /// ```
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            len: 0,
            phantom: PhantomData,
        }
    }

    /// Constructs an empty buffer with room for at least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        let mut buf = Self::new();
        buf.reserve(capacity)?;
        Ok(buf)
    }

    /// Constructs a buffer holding clones of `other`.
    ///
    /// ```
    /// use contig::GrowableBuffer;
    ///
    /// let buf = GrowableBuffer::from_slice(&[1, 2, 3]).unwrap();
    /// assert_eq!(buf, [1, 2, 3]);
    /// ```
    pub fn from_slice(other: &[T]) -> Result<Self, CapacityError>
    where
        T: Clone,
    {
        let mut buf = Self::new();
        buf.extend_from_slice(other)?;
        Ok(buf)
    }

    /// Drops every element, releases the block and returns the buffer to the idle state.
    ///
    /// Unlike [`clear`](Self::clear), the capacity goes back to zero.
    pub fn destroy(&mut self) {
        self.clear();
        self.release();
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns `true` if the buffer holds no block at all.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.cap == 0
    }

    /// Returns a raw pointer to the buffer's block.
    ///
    /// The pointer is dangling while the buffer is idle and is invalidated by any growth.
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns a raw pointer to the buffer's block, which may be mutated through.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Extracts a slice containing the live elements.
    pub fn as_slice(&self) -> &[T] {
        // NOTE(unsafe) `[0, len)` is initialized; a dangling pointer is fine for `len == 0`
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice containing the live elements.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // NOTE(unsafe) see `as_slice`
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Ensures the capacity is at least `min_capacity`.
    ///
    /// Does nothing if it already is. Otherwise the capacity grows from its current value (or
    /// [`MIN_NON_ZERO_CAP`](Self::MIN_NON_ZERO_CAP) when idle) by ~1.625 per step until it covers
    /// `min_capacity`, saturating at [`MAX_CAPACITY`](Self::MAX_CAPACITY).
    ///
    /// # Errors
    ///
    /// [`CapacityError::RangeOverflow`] if `min_capacity` exceeds `MAX_CAPACITY`,
    /// [`CapacityError::AllocationFailure`] if the allocator refuses. Either way the buffer is
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use contig::{CapacityError, GrowableBuffer};
    ///
    /// let mut buf: GrowableBuffer<u32> = GrowableBuffer::new();
    /// buf.reserve(9).unwrap();
    /// assert_eq!(buf.capacity(), 13);
    ///
    /// let too_many = GrowableBuffer::<u32>::MAX_CAPACITY + 1;
    /// assert_eq!(buf.reserve(too_many), Err(CapacityError::RangeOverflow));
    /// assert_eq!(buf.capacity(), 13);
    /// ```
    pub fn reserve(&mut self, min_capacity: usize) -> Result<(), CapacityError> {
        if min_capacity <= self.cap {
            return Ok(());
        }
        if min_capacity > Self::MAX_CAPACITY {
            return Err(CapacityError::RangeOverflow);
        }

        let new_cap = grown_capacity(self.cap, min_capacity, Self::MAX_CAPACITY, Self::MIN_NON_ZERO_CAP);
        self.set_capacity(new_cap)
    }

    /// Ensures there is room for `additional` more elements beyond the current length.
    pub fn reserve_additional(&mut self, additional: usize) -> Result<(), CapacityError> {
        let min_capacity = self
            .len
            .checked_add(additional)
            .ok_or(CapacityError::RangeOverflow)?;
        self.reserve(min_capacity)
    }

    /// Reduces the capacity to exactly the length, returning to the idle state if empty.
    ///
    /// # Errors
    ///
    /// [`CapacityError::AllocationFailure`] if the allocator could not move the block; the buffer
    /// is unchanged.
    pub fn shrink_to_fit(&mut self) -> Result<(), CapacityError> {
        if self.cap == self.len {
            return Ok(());
        }
        self.set_capacity(self.len)
    }

    /// Appends `n` default-initialized elements and returns them as a window to fill in.
    ///
    /// Returns an empty window for `n == 0`, without allocating.
    ///
    /// # Errors
    ///
    /// Fails like [`reserve`](Self::reserve), without changing the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use contig::GrowableBuffer;
    ///
    /// let mut buf = GrowableBuffer::from_slice(&[1]).unwrap();
    /// let window = buf.append_default(3).unwrap();
    /// window.copy_from_slice(&[2, 3, 4]);
    /// assert_eq!(buf, [1, 2, 3, 4]);
    /// ```
    pub fn append_default(&mut self, n: usize) -> Result<&mut [T], CapacityError>
    where
        T: Default,
    {
        let start = self.len;
        self.reserve_additional(n)?;
        for _ in 0..n {
            // NOTE(unsafe) capacity was reserved above; `len` grows one slot at a time so a
            // panicking `T::default` leaves only initialized slots counted
            unsafe { self.push_unchecked(T::default()) }
        }
        Ok(&mut self.as_mut_slice()[start..])
    }

    /// Appends one default-initialized element and returns it.
    pub fn new_element(&mut self) -> Result<&mut T, CapacityError>
    where
        T: Default,
    {
        let index = self.len;
        self.append_default(1)?;
        Ok(&mut self.as_mut_slice()[index])
    }

    /// Appends one default-initialized element and also returns the element at `anchor`,
    /// re-derived after the append.
    ///
    /// Appending may move the block, so a reference taken before the call would dangle; this
    /// hands back a fresh one alongside the new slot.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` is not a live index.
    ///
    /// # Examples
    ///
    /// ```
    /// use contig::GrowableBuffer;
    ///
    /// let mut buf = GrowableBuffer::from_slice(&[0u32; 8]).unwrap();
    /// assert_eq!(buf.capacity(), 8);
    ///
    /// let (new, parent) = buf.new_element_rebased(3).unwrap();
    /// *parent = 30;
    /// *new = 8;
    /// assert_eq!(buf[3], 30);
    /// assert_eq!(buf[8], 8);
    /// ```
    pub fn new_element_rebased(&mut self, anchor: usize) -> Result<(&mut T, &mut T), CapacityError>
    where
        T: Default,
    {
        let len = self.len;
        if anchor >= len {
            panic!("anchor index (is {anchor}) should be < len (is {len})");
        }

        self.append_default(1)?;
        let (head, tail) = self.as_mut_slice().split_at_mut(len);
        Ok((&mut tail[0], &mut head[anchor]))
    }

    /// Appends an `item` to the back.
    ///
    /// # Errors
    ///
    /// Fails like [`reserve`](Self::reserve). The buffer is unchanged and `item` comes back in
    /// the error.
    ///
    /// ```
    /// use contig::{CapacityError, GrowableBuffer};
    ///
    /// let mut buf: GrowableBuffer<()> = GrowableBuffer::new();
    /// buf.reserve(usize::MAX).unwrap();
    /// unsafe { buf.set_len(usize::MAX) };
    ///
    /// let err = buf.push(()).unwrap_err();
    /// assert_eq!(err.kind, CapacityError::RangeOverflow);
    /// assert_eq!(buf.len(), usize::MAX);
    /// ```
    pub fn push(&mut self, item: T) -> Result<(), InsertError<T>> {
        if let Err(kind) = self.reserve_additional(1) {
            return Err(InsertError::new(item, kind));
        }
        // NOTE(unsafe) room for one more was reserved above
        unsafe { self.push_unchecked(item) }
        Ok(())
    }

    /// Inserts `element` at `index`, shifting everything after it to the right.
    ///
    /// # Errors
    ///
    /// Fails like [`reserve`](Self::reserve). The buffer is unchanged and `element` comes back in
    /// the error.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, element: T) -> Result<(), InsertError<T>> {
        let len = self.len;
        if index > len {
            panic!("insertion index (is {index}) should be <= len (is {len})");
        }

        if let Err(kind) = self.reserve_additional(1) {
            return Err(InsertError::new(element, kind));
        }
        unsafe {
            let p = self.ptr.as_ptr().add(index);
            // Duplicate the tail one slot to the right, then overwrite the first copy.
            ptr::copy(p, p.add(1), len - index);
            ptr::write(p, element);
        }
        self.len = len + 1;
        Ok(())
    }

    /// Clones and appends all elements of `other`.
    pub fn extend_from_slice(&mut self, other: &[T]) -> Result<(), CapacityError>
    where
        T: Clone,
    {
        self.reserve_additional(other.len())?;
        for elem in other {
            // NOTE(unsafe) room for `other.len()` elements was reserved above
            unsafe { self.push_unchecked(elem.clone()) }
        }
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the tail left. *O*(n).
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            panic!("removal index (is {index}) should be < len (is {len})");
        }
        unsafe {
            let p = self.ptr.as_ptr().add(index);
            let ret = ptr::read(p);
            ptr::copy(p.add(1), p, len - index - 1);
            self.len = len - 1;
            ret
        }
    }

    /// Removes and returns the element at `index`, moving the last element into its slot. *O*(1).
    ///
    /// Does not preserve order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn lazy_remove_at(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            panic!("removal index (is {index}) should be < len (is {len})");
        }
        unsafe {
            let base = self.ptr.as_ptr();
            let ret = ptr::read(base.add(index));
            self.len = len - 1;
            if index != len - 1 {
                ptr::copy_nonoverlapping(base.add(len - 1), base.add(index), 1);
            }
            ret
        }
    }

    /// Drops every live element. The block is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Keeps the first `len` elements and drops the rest.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let remaining = self.len - len;
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.ptr.as_ptr().add(len), remaining);
            // Shrink first so a panicking destructor cannot cause a double drop.
            self.len = len;
            ptr::drop_in_place(tail);
        }
    }

    /// Returns the last element, or `None` if empty.
    pub fn peek_last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns the last element mutably, or `None` if empty.
    pub fn peek_last_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Removes the last element and returns it, or `None` if empty.
    pub fn pop_last(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            Some(unsafe { self.pop_unchecked() })
        }
    }

    /// Replaces the elements in `range` with clones of `replacement`.
    ///
    /// The result is `self[..start] ++ replacement ++ self[end..]`. Only a splice that grows the
    /// buffer can fail; one that keeps or reduces the length never allocates.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or reaches past the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use contig::GrowableBuffer;
    ///
    /// let mut buf = GrowableBuffer::from_slice(&[1, 2, 3, 4, 5]).unwrap();
    /// buf.splice(1..3, &[9, 9]).unwrap();
    /// assert_eq!(buf, [1, 9, 9, 4, 5]);
    ///
    /// buf.splice(..2, &[]).unwrap();
    /// assert_eq!(buf, [9, 4, 5]);
    /// ```
    pub fn splice<R>(&mut self, range: R, replacement: &[T]) -> Result<(), CapacityError>
    where
        R: RangeBounds<usize>,
        T: Clone,
    {
        let old_len = self.len;
        let Range { start, end } = crate::slice::range(range, old_len);
        let removed = end - start;
        let added = replacement.len();

        if added > removed {
            self.reserve_additional(added - removed)?;
        }

        unsafe {
            // Leak rather than double drop if a destructor or `clone` panics.
            self.len = start;
            let base = self.ptr.as_ptr();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(start), removed));
            ptr::copy(base.add(end), base.add(start + added), old_len - end);
            for (i, item) in replacement.iter().enumerate() {
                ptr::write(base.add(start + i), item.clone());
            }
        }
        self.len = old_len - removed + added;
        Ok(())
    }

    /// Drops the elements in `range`, shifting the tail left. Never allocates.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or reaches past the length.
    pub fn erase<R>(&mut self, range: R)
    where
        R: RangeBounds<usize>,
    {
        let old_len = self.len;
        let Range { start, end } = crate::slice::range(range, old_len);
        unsafe {
            self.len = start;
            let base = self.ptr.as_ptr();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(start), end - start));
            ptr::copy(base.add(end), base.add(start), old_len - end);
        }
        self.len = old_len - (end - start);
    }

    /// Converts a signed index into an offset in `[0, len]`.
    ///
    /// Negative values count back from the end; anything past either end is clamped.
    ///
    /// ```
    /// use contig::GrowableBuffer;
    ///
    /// let buf = GrowableBuffer::from_slice(&[0; 5]).unwrap();
    /// assert_eq!(buf.clip(-100), 0);
    /// assert_eq!(buf.clip(100), 5);
    /// assert_eq!(buf.clip(-2), 3);
    /// assert_eq!(buf.clip(2), 2);
    /// ```
    pub fn clip(&self, i: isize) -> usize {
        if i < 0 {
            let back = i.unsigned_abs();
            if back >= self.len {
                0
            } else {
                self.len - back
            }
        } else {
            (i as usize).min(self.len)
        }
    }

    /// Keeps the elements for which `keep` returns `true`, in their original order, and hands
    /// every other element to `on_drop` by value.
    ///
    /// One left-to-right pass; surviving runs are moved down as whole blocks, so the cost is
    /// *O*(n) whatever the pattern of drops. `keep` sees each element exactly once.
    ///
    /// # Examples
    ///
    /// ```
    /// use contig::GrowableBuffer;
    ///
    /// let mut buf = GrowableBuffer::from_slice(&[1, 2, 3, 4, 5, 6]).unwrap();
    /// let mut dropped = Vec::new();
    /// buf.keep_if(|x| x % 2 == 0, |x| dropped.push(x));
    ///
    /// assert_eq!(buf, [2, 4, 6]);
    /// assert_eq!(dropped, [1, 3, 5]);
    /// ```
    pub fn keep_if<K, D>(&mut self, mut keep: K, mut on_drop: D)
    where
        K: FnMut(&T) -> bool,
        D: FnMut(T),
    {
        let original_len = self.len;
        // Hide everything while there are holes; the guard puts the buffer back together, even
        // if `keep` or `on_drop` panics.
        self.len = 0;

        // [0, write)      compacted survivors
        // [write, run)    holes
        // [run, read)     survivors not moved yet
        // [read, original_len) untested
        struct Compactor<'a, T> {
            buffer: &'a mut GrowableBuffer<T>,
            write: usize,
            run: usize,
            read: usize,
            original_len: usize,
        }

        impl<T> Compactor<'_, T> {
            /// Moves the pending survivors `[run, upto)` down to `write` as one block.
            fn flush(&mut self, upto: usize) {
                let n = upto - self.run;
                if self.write != self.run && n != 0 {
                    unsafe {
                        let base = self.buffer.ptr.as_ptr();
                        ptr::copy(base.add(self.run), base.add(self.write), n);
                    }
                }
                self.write += n;
                self.run = upto;
            }
        }

        impl<T> Drop for Compactor<'_, T> {
            fn drop(&mut self) {
                // Everything from `run` on is still live.
                self.flush(self.original_len);
                self.buffer.len = self.write;
            }
        }

        let mut g = Compactor {
            buffer: self,
            write: 0,
            run: 0,
            read: 0,
            original_len,
        };

        while g.read != original_len {
            let p = unsafe { g.buffer.ptr.as_ptr().add(g.read) };
            // NOTE(unsafe) `read` is below the original length and has not been moved or taken
            if keep(unsafe { &*p }) {
                g.read += 1;
                continue;
            }

            g.flush(g.read);
            let dropped = unsafe { ptr::read(p) };
            // Advance before handing the value out, in case `on_drop` panics.
            g.read += 1;
            g.run = g.read;
            on_drop(dropped);
        }

        drop(g);
    }

    /// Keeps the elements for which `keep` returns `true` and drops the others.
    pub fn retain<K>(&mut self, keep: K)
    where
        K: FnMut(&T) -> bool,
    {
        self.keep_if(keep, drop);
    }

    /// Drops the longest run of elements matching `predicate` at the back, then the longest at
    /// the front. Matches in the interior are left alone.
    ///
    /// ```
    /// use contig::GrowableBuffer;
    ///
    /// let mut buf = GrowableBuffer::from_slice(b"  a b  ").unwrap();
    /// buf.trim(|c| *c == b' ');
    /// assert_eq!(buf, *b"a b");
    /// ```
    pub fn trim<P>(&mut self, mut predicate: P)
    where
        P: FnMut(&T) -> bool,
    {
        let back = self
            .as_slice()
            .iter()
            .rev()
            .take_while(|x| predicate(x))
            .count();
        self.truncate(self.len - back);

        let front = self
            .as_slice()
            .iter()
            .take_while(|x| predicate(x))
            .count();
        if front != 0 {
            self.erase(..front);
        }
    }

    /// Calls `action` on every element, front to back.
    pub fn for_each<A>(&mut self, action: A)
    where
        A: FnMut(&mut T),
    {
        self.as_mut_slice().iter_mut().for_each(action);
    }

    /// Calls `action` on every element for which `predicate` returns `true`.
    pub fn for_each_if<P, A>(&mut self, mut predicate: P, mut action: A)
    where
        P: FnMut(&T) -> bool,
        A: FnMut(&mut T),
    {
        for elem in self.as_mut_slice() {
            if predicate(elem) {
                action(elem);
            }
        }
    }

    /// Returns the first element for which `predicate` returns `true`.
    pub fn find_first<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.as_slice().iter().find(|x| predicate(x))
    }

    /// Returns the first element for which `predicate` returns `true`, mutably.
    pub fn find_first_mut<P>(&mut self, mut predicate: P) -> Option<&mut T>
    where
        P: FnMut(&T) -> bool,
    {
        self.as_mut_slice().iter_mut().find(|x| predicate(x))
    }

    /// Returns the spare capacity as a slice of `MaybeUninit<T>`.
    ///
    /// Fill it in, then mark it live with [`set_len`](Self::set_len).
    ///
    /// ```
    /// use contig::GrowableBuffer;
    ///
    /// let mut buf: GrowableBuffer<u16> = GrowableBuffer::with_capacity(3).unwrap();
    /// let spare = buf.spare_capacity_mut();
    /// spare[0].write(7);
    /// spare[1].write(8);
    /// unsafe { buf.set_len(2) };
    /// assert_eq!(buf, [7, 8]);
    /// ```
    #[inline]
    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] {
        unsafe {
            slice::from_raw_parts_mut(
                self.ptr.as_ptr().add(self.len).cast::<MaybeUninit<T>>(),
                self.cap - self.len,
            )
        }
    }

    /// Forces the length to `new_len`.
    ///
    /// # Safety
    ///
    /// - `new_len` must be less than or equal to [`capacity()`](Self::capacity).
    /// - The elements at `old_len..new_len` must be initialized.
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.cap);
        self.len = new_len;
    }

    /// Appends without checking the capacity.
    ///
    /// # Safety
    ///
    /// The buffer must not be full.
    pub(crate) unsafe fn push_unchecked(&mut self, item: T) {
        debug_assert!(self.len < self.cap);
        ptr::write(self.ptr.as_ptr().add(self.len), item);
        self.len += 1;
    }

    /// Removes the last element without checking for emptiness.
    ///
    /// # Safety
    ///
    /// The buffer must not be empty.
    pub(crate) unsafe fn pop_unchecked(&mut self) -> T {
        debug_assert!(self.len != 0);
        self.len -= 1;
        ptr::read(self.ptr.as_ptr().add(self.len))
    }

    /// Moves the live elements into a block of exactly `new_cap` slots.
    ///
    /// Commits `ptr` and `cap` only once the allocator succeeded.
    fn set_capacity(&mut self, new_cap: usize) -> Result<(), CapacityError> {
        debug_assert!(self.len <= new_cap && new_cap <= Self::MAX_CAPACITY);

        if mem::size_of::<T>() == 0 {
            self.cap = new_cap;
            return Ok(());
        }
        if new_cap == 0 {
            self.release();
            return Ok(());
        }

        let new_layout = Self::layout(new_cap);
        let raw = unsafe {
            if self.cap == 0 {
                alloc(new_layout)
            } else {
                realloc(
                    self.ptr.as_ptr().cast::<u8>(),
                    Self::layout(self.cap),
                    new_layout.size(),
                )
            }
        };

        let ptr = NonNull::new(raw.cast::<T>()).ok_or(CapacityError::AllocationFailure)?;
        self.ptr = ptr;
        self.cap = new_cap;
        Ok(())
    }

    /// Frees the block without touching the elements.
    fn release(&mut self) {
        if mem::size_of::<T>() != 0 && self.cap != 0 {
            unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), Self::layout(self.cap)) }
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }

    fn layout(cap: usize) -> Layout {
        debug_assert!(cap <= Self::MAX_CAPACITY);
        // NOTE(unsafe) `cap <= MAX_CAPACITY` keeps the size within `isize::MAX` and alignments
        // are always powers of two
        unsafe { Layout::from_size_align_unchecked(mem::size_of::<T>() * cap, mem::align_of::<T>()) }
    }
}

/// Capacity after growing `current` until it covers `min_capacity`.
///
/// Each step is `c + c/2 + c/8`, close to the golden ratio; an overflowing step saturates at
/// `max`. `min_capacity <= max` must hold.
fn grown_capacity(current: usize, min_capacity: usize, max: usize, min_non_zero: usize) -> usize {
    let mut cap = current.max(min_non_zero);
    while cap < min_capacity {
        match cap
            .checked_add(cap >> 1)
            .and_then(|c| c.checked_add(cap >> 3))
        {
            Some(next) if next <= max => cap = next,
            _ => {
                cap = max;
                break;
            }
        }
    }
    cap.min(max)
}

/// Unwraps the result of a growth that has no way to report failure.
#[track_caller]
pub(crate) fn expect_capacity<T>(result: Result<T, CapacityError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("GrowableBuffer growth failed: {err}"),
    }
}

// Trait implementations

impl<T> Drop for GrowableBuffer<T> {
    fn drop(&mut self) {
        // NOTE(unsafe) `[0, len)` is initialized and dropped exactly once here
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
        self.release();
    }
}

impl<T> Default for GrowableBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for GrowableBuffer<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <[T] as fmt::Debug>::fmt(self, f)
    }
}

impl fmt::Write for GrowableBuffer<u8> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.extend_from_slice(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

impl<T: Clone> Clone for GrowableBuffer<T> {
    fn clone(&self) -> Self {
        expect_capacity(Self::from_slice(self))
    }
}

impl<'a, T: Clone> TryFrom<&'a [T]> for GrowableBuffer<T> {
    type Error = CapacityError;

    fn try_from(slice: &'a [T]) -> Result<Self, Self::Error> {
        Self::from_slice(slice)
    }
}

impl<T> Extend<T> for GrowableBuffer<T> {
    /// # Panics
    ///
    /// Panics if the buffer cannot grow to hold every item.
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        expect_capacity(self.reserve_additional(iter.size_hint().0));
        for elem in iter {
            expect_capacity(self.push(elem).map_err(CapacityError::from));
        }
    }
}

impl<'a, T> Extend<&'a T> for GrowableBuffer<T>
where
    T: 'a + Copy,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for GrowableBuffer<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut buf = Self::new();
        buf.extend(iter);
        buf
    }
}

impl<'a, T> IntoIterator for &'a GrowableBuffer<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowableBuffer<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for GrowableBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<A, B> PartialEq<GrowableBuffer<B>> for GrowableBuffer<A>
where
    A: PartialEq<B>,
{
    fn eq(&self, other: &GrowableBuffer<B>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<A, B, const N: usize> PartialEq<[B; N]> for GrowableBuffer<A>
where
    A: PartialEq<B>,
{
    fn eq(&self, other: &[B; N]) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<A, B, const N: usize> PartialEq<&[B; N]> for GrowableBuffer<A>
where
    A: PartialEq<B>,
{
    fn eq(&self, other: &&[B; N]) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<A, B> PartialEq<[B]> for GrowableBuffer<A>
where
    A: PartialEq<B>,
{
    fn eq(&self, other: &[B]) -> bool {
        self.as_slice().eq(other)
    }
}

impl<A, B> PartialEq<&[B]> for GrowableBuffer<A>
where
    A: PartialEq<B>,
{
    fn eq(&self, other: &&[B]) -> bool {
        self.as_slice().eq(*other)
    }
}

impl<A, B, const N: usize> PartialEq<GrowableBuffer<B>> for [A; N]
where
    A: PartialEq<B>,
{
    fn eq(&self, other: &GrowableBuffer<B>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<A, B> PartialEq<GrowableBuffer<B>> for &[A]
where
    A: PartialEq<B>,
{
    fn eq(&self, other: &GrowableBuffer<B>) -> bool {
        (*self).eq(other.as_slice())
    }
}

impl<T: Eq> Eq for GrowableBuffer<T> {}

impl<T: PartialOrd> PartialOrd for GrowableBuffer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for GrowableBuffer<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: hash::Hash> hash::Hash for GrowableBuffer<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        <[T] as hash::Hash>::hash(self, state);
    }
}

impl<T> ops::Deref for GrowableBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> ops::DerefMut for GrowableBuffer<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> borrow::Borrow<[T]> for GrowableBuffer<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> borrow::BorrowMut<[T]> for GrowableBuffer<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for GrowableBuffer<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for GrowableBuffer<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}
