use serde::ser::{Serialize, SerializeSeq, SerializeStruct, Serializer};

use crate::{BinaryHeap, GrowableBuffer, HeapNode};

// Sequential containers

impl<T> Serialize for GrowableBuffer<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

/// Nodes in storage order, which is itself a valid heap.
impl<P, V, C> Serialize for BinaryHeap<P, V, C>
where
    P: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for node in self {
            seq.serialize_element(node)?;
        }
        seq.end()
    }
}

// Records

impl<P, V> Serialize for HeapNode<P, V>
where
    P: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut node = serializer.serialize_struct("HeapNode", 2)?;
        node.serialize_field("priority", &self.priority)?;
        node.serialize_field("value", &self.value)?;
        node.end()
    }
}
