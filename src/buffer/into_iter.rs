use core::{fmt, iter::FusedIterator, ptr, slice};

use super::GrowableBuffer;

/// An iterator that moves out of a [`GrowableBuffer`].
///
/// This struct is created by calling the `into_iter` method on [`GrowableBuffer`].
pub struct IntoIter<T> {
    buffer: GrowableBuffer<T>,
    next: usize,
}

impl<T> IntoIter<T> {
    pub(super) fn new(buffer: GrowableBuffer<T>) -> Self {
        Self { buffer, next: 0 }
    }

    /// Returns the elements not yielded yet as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.buffer.as_slice()[self.next..]
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next < self.buffer.len {
            // SAFETY: `next` is below the length and every slot is read at most once.
            let item = unsafe { ptr::read(self.buffer.ptr.as_ptr().add(self.next)) };
            self.next += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.next < self.buffer.len {
            // SAFETY: len must be non-zero as next is less than len.
            Some(unsafe { self.buffer.pop_unchecked() })
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.buffer.len - self.next
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Clone for IntoIter<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.as_slice().iter().cloned().collect())
    }
}

impl<T> fmt::Debug for IntoIter<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.len();
        unsafe {
            let tail = slice::from_raw_parts_mut(self.buffer.ptr.as_ptr().add(self.next), remaining);
            // Only the block is left for the buffer's own destructor.
            self.buffer.len = 0;
            ptr::drop_in_place(tail);
        }
    }
}
