#![no_main]

use std::cmp::Reverse;

use libfuzzer_sys::fuzz_target;

use contig::{BinaryHeap, HeapNode};

fuzz_target!(|data: &[u8]| {
    let mut heap: BinaryHeap<u8, u16> = BinaryHeap::new();
    let mut model = std::collections::BinaryHeap::new();

    for (i, byte) in data.iter().enumerate() {
        match byte % 4 {
            0 => {
                assert_eq!(
                    heap.pop().map(|node| node.priority),
                    model.pop().map(|Reverse(p)| p)
                );
            }
            1 => {
                // Bulk path: a handful of nodes, then one heapify.
                let nodes = data[i..].iter().take(4).map(|p| HeapNode::new(*p, i as u16));
                heap.bulk_extend(nodes).unwrap();
                model.extend(data[i..].iter().take(4).map(|p| Reverse(*p)));
            }
            _ => {
                heap.push(*byte, i as u16).unwrap();
                model.push(Reverse(*byte));
            }
        }

        assert_eq!(heap.len(), model.len());
        assert_eq!(
            heap.peek().map(|node| node.priority),
            model.peek().map(|Reverse(p)| *p)
        );
    }
});
