#![cfg(feature = "serde")]

use contig::{BinaryHeap, GrowableBuffer, HeapNode, Max};

#[test]
fn buffer_as_sequence() {
    let buf = GrowableBuffer::from_slice(&[1, 2, 3]).unwrap();
    let json = serde_json::to_string(&buf).unwrap();
    assert_eq!(json, "[1,2,3]");

    let back: GrowableBuffer<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, buf);

    let empty: GrowableBuffer<i32> = serde_json::from_str("[]").unwrap();
    assert!(empty.is_idle());
}

#[test]
fn buffer_rejects_non_sequence() {
    assert!(serde_json::from_str::<GrowableBuffer<i32>>("{\"a\":1}").is_err());
}

#[test]
fn node_as_struct() {
    let node = HeapNode::new(3u8, "three");
    let json = serde_json::to_string(&node).unwrap();
    assert_eq!(json, r#"{"priority":3,"value":"three"}"#);

    let back: HeapNode<u8, String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, HeapNode::new(3, String::from("three")));

    let from_seq: HeapNode<u8, u8> = serde_json::from_str("[1,2]").unwrap();
    assert_eq!(from_seq, HeapNode::new(1, 2));

    assert!(serde_json::from_str::<HeapNode<u8, u8>>(r#"{"priority":1}"#).is_err());
    assert!(serde_json::from_str::<HeapNode<u8, u8>>(r#"{"priority":1,"value":2,"other":3}"#).is_err());
}

#[test]
fn heap_round_trip() {
    let mut heap: BinaryHeap<u32, char> = BinaryHeap::new();
    for (p, v) in [(5, 'e'), (1, 'a'), (3, 'c')] {
        heap.push(p, v).unwrap();
    }

    let json = serde_json::to_string(&heap).unwrap();
    let mut back: BinaryHeap<u32, char> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.as_slice(), heap.as_slice());
    assert_eq!(back.pop_value(), Some('a'));
    assert_eq!(back.pop_value(), Some('c'));
    assert_eq!(back.pop_value(), Some('e'));
}

#[test]
fn heap_from_unordered_nodes() {
    let json = r#"[
        {"priority":1,"value":null},
        {"priority":9,"value":null},
        {"priority":4,"value":null},
        {"priority":7,"value":null}
    ]"#;

    let mut heap: BinaryHeap<u32, (), Max> = serde_json::from_str(json).unwrap();
    let mut drained = Vec::new();
    while let Some(node) = heap.pop() {
        drained.push(node.priority);
    }
    assert_eq!(drained, [9, 7, 4, 1]);
}
