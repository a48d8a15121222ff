use ufmt::{uDebug, Formatter};
use ufmt_write::uWrite;

use crate::{BinaryHeap, CapacityError, GrowableBuffer, HeapNode};

impl uWrite for GrowableBuffer<u8> {
    type Error = CapacityError;
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.extend_from_slice(s.as_bytes())
    }
}

impl<T> uDebug for GrowableBuffer<T>
where
    T: uDebug,
{
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        <[T] as uDebug>::fmt(self.as_slice(), f)
    }
}

impl<P, V> uDebug for HeapNode<P, V>
where
    P: uDebug,
    V: uDebug,
{
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.debug_struct("HeapNode")?
            .field("priority", &self.priority)?
            .field("value", &self.value)?
            .finish()
    }
}

impl<P, V, C> uDebug for BinaryHeap<P, V, C>
where
    P: uDebug,
    V: uDebug,
{
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        <[HeapNode<P, V>] as uDebug>::fmt(self.as_slice(), f)
    }
}
