use core::{fmt, marker::PhantomData, mem};

use serde::de::{self, Deserialize, Deserializer, Error, MapAccess, SeqAccess};

use crate::{compare::Precedence, BinaryHeap, GrowableBuffer, HeapNode};

/// Upper bound, in bytes, on what an untrusted length hint may preallocate.
const MAX_PREALLOCATION: usize = 1024 * 1024;

// Sequential containers

impl<'de, T> Deserialize<'de> for GrowableBuffer<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor<'de, T>(PhantomData<(&'de (), T)>);

        impl<'de, T> de::Visitor<'de> for ValueVisitor<'de, T>
        where
            T: Deserialize<'de>,
        {
            type Value = GrowableBuffer<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a sequence")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut values = GrowableBuffer::new();

                if let Some(hint) = seq.size_hint() {
                    let cap = hint.min(MAX_PREALLOCATION / mem::size_of::<T>().max(1));
                    values.reserve(cap).map_err(A::Error::custom)?;
                }

                while let Some(value) = seq.next_element()? {
                    values.push(value).map_err(A::Error::custom)?;
                }

                Ok(values)
            }
        }
        deserializer.deserialize_seq(ValueVisitor(PhantomData))
    }
}

/// Rebuilds the heap order with the default comparator, so any node sequence is accepted.
impl<'de, P, V, C> Deserialize<'de> for BinaryHeap<P, V, C>
where
    P: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Precedence<P> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let storage = GrowableBuffer::<HeapNode<P, V>>::deserialize(deserializer)?;
        Ok(BinaryHeap::from_buffer(storage, C::default()))
    }
}

// Records

const NODE_FIELDS: &[&str] = &["priority", "value"];

enum NodeField {
    Priority,
    Value,
}

impl<'de> Deserialize<'de> for NodeField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldVisitor;

        impl de::Visitor<'_> for FieldVisitor {
            type Value = NodeField;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("`priority` or `value`")
            }

            fn visit_str<E>(self, field: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                match field {
                    "priority" => Ok(NodeField::Priority),
                    "value" => Ok(NodeField::Value),
                    _ => Err(E::unknown_field(field, NODE_FIELDS)),
                }
            }
        }
        deserializer.deserialize_identifier(FieldVisitor)
    }
}

impl<'de, P, V> Deserialize<'de> for HeapNode<P, V>
where
    P: Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor<'de, P, V>(PhantomData<(&'de (), P, V)>);

        impl<'de, P, V> de::Visitor<'de> for ValueVisitor<'de, P, V>
        where
            P: Deserialize<'de>,
            V: Deserialize<'de>,
        {
            type Value = HeapNode<P, V>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a heap node")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let priority = seq
                    .next_element()?
                    .ok_or_else(|| A::Error::invalid_length(0, &self))?;
                let value = seq
                    .next_element()?
                    .ok_or_else(|| A::Error::invalid_length(1, &self))?;
                Ok(HeapNode::new(priority, value))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut priority = None;
                let mut value = None;

                while let Some(field) = map.next_key()? {
                    match field {
                        NodeField::Priority => {
                            if priority.is_some() {
                                return Err(A::Error::duplicate_field("priority"));
                            }
                            priority = Some(map.next_value()?);
                        }
                        NodeField::Value => {
                            if value.is_some() {
                                return Err(A::Error::duplicate_field("value"));
                            }
                            value = Some(map.next_value()?);
                        }
                    }
                }

                let priority = priority.ok_or_else(|| A::Error::missing_field("priority"))?;
                let value = value.ok_or_else(|| A::Error::missing_field("value"))?;
                Ok(HeapNode::new(priority, value))
            }
        }
        deserializer.deserialize_struct("HeapNode", NODE_FIELDS, ValueVisitor(PhantomData))
    }
}
