//! Containers of `Send`-able things are `Send`

use contig::{BinaryHeap, GrowableBuffer, HeapNode, Max};

#[test]
fn send() {
    struct IsSend;

    unsafe impl Send for IsSend {}

    fn is_send<T>()
    where
        T: Send,
    {
    }

    is_send::<GrowableBuffer<IsSend>>();
    is_send::<contig::buffer::IntoIter<IsSend>>();
    is_send::<HeapNode<u32, IsSend>>();
    is_send::<BinaryHeap<u32, IsSend>>();
    is_send::<BinaryHeap<u32, IsSend, Max>>();
}

#[test]
fn moves_across_threads() {
    let mut heap: BinaryHeap<u32, GrowableBuffer<u8>> = BinaryHeap::new();
    for p in [3, 1, 2] {
        let mut payload = GrowableBuffer::new();
        payload.extend_from_slice(&[p as u8; 4]).unwrap();
        heap.push(p, payload).unwrap();
    }

    let drained = std::thread::spawn(move || {
        let mut out = Vec::new();
        while let Some(node) = heap.pop() {
            out.push((node.priority, node.value.len()));
        }
        out
    })
    .join()
    .unwrap();

    assert_eq!(drained, [(1, 4), (2, 4), (3, 4)]);
}
