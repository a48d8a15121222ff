#![no_main]

use libfuzzer_sys::fuzz_target;

use contig::GrowableBuffer;

// Each input byte pair is one operation; a `Vec` runs alongside as the oracle.
fuzz_target!(|data: &[u8]| {
    let mut buf: GrowableBuffer<u8> = GrowableBuffer::new();
    let mut model: Vec<u8> = Vec::new();

    for op in data.chunks_exact(2) {
        let (code, arg) = (op[0], op[1]);
        let len = model.len();
        match code % 9 {
            0 => {
                buf.push(arg).unwrap();
                model.push(arg);
            }
            1 => assert_eq!(buf.pop_last(), model.pop()),
            2 if len > 0 => {
                let i = arg as usize % len;
                assert_eq!(buf.remove_at(i), model.remove(i));
            }
            3 if len > 0 => {
                let i = arg as usize % len;
                assert_eq!(buf.lazy_remove_at(i), model.swap_remove(i));
            }
            4 => {
                let i0 = arg as usize % (len + 1);
                let i1 = i0 + (arg as usize >> 4) % (len - i0 + 1);
                let replacement = [arg; 3];
                let n = (arg & 3) as usize;
                buf.splice(i0..i1, &replacement[..n]).unwrap();
                model.splice(i0..i1, replacement[..n].iter().copied());
            }
            5 => {
                let mut dropped = Vec::new();
                buf.keep_if(|x| x % 3 != arg % 3, |x| dropped.push(x));
                let expected: Vec<u8> = model.iter().copied().filter(|x| x % 3 == arg % 3).collect();
                model.retain(|x| x % 3 != arg % 3);
                assert_eq!(dropped, expected);
            }
            6 => {
                buf.reserve(arg as usize).unwrap();
                assert!(buf.capacity() >= arg as usize);
            }
            7 => {
                buf.shrink_to_fit().unwrap();
                assert_eq!(buf.capacity(), model.len());
            }
            8 => {
                buf.sort();
                model.sort();
            }
            _ => {}
        }
        assert_eq!(buf.as_slice(), model.as_slice());
    }
});
