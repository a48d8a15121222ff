//! Defmt implementations for the containers

use crate::{BinaryHeap, GrowableBuffer, HeapNode};
use defmt::Formatter;

impl<T> defmt::Format for GrowableBuffer<T>
where
    T: defmt::Format,
{
    fn format(&self, fmt: Formatter<'_>) {
        defmt::write!(fmt, "{=[?]}", self.as_slice())
    }
}

impl<P, V> defmt::Format for HeapNode<P, V>
where
    P: defmt::Format,
    V: defmt::Format,
{
    fn format(&self, fmt: Formatter<'_>) {
        defmt::write!(
            fmt,
            "HeapNode {{ priority: {}, value: {} }}",
            self.priority,
            self.value
        )
    }
}

impl<P, V, C> defmt::Format for BinaryHeap<P, V, C>
where
    P: defmt::Format,
    V: defmt::Format,
{
    fn format(&self, fmt: Formatter<'_>) {
        defmt::write!(fmt, "{=[?]}", self.as_slice())
    }
}
