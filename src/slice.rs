use core::ops::{Bound, Range, RangeBounds};

/// Resolves `range` against a container of `len` live elements.
///
/// Panics when the range is inverted or reaches past `len`.
#[track_caller]
#[must_use]
pub(crate) fn range<R>(range: R, len: usize) -> Range<usize>
where
    R: RangeBounds<usize>,
{
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start
            .checked_add(1)
            .unwrap_or_else(|| panic!("range start is past the maximum usize")),
        Bound::Unbounded => 0,
    };

    let end = match range.end_bound() {
        Bound::Included(&end) => end
            .checked_add(1)
            .unwrap_or_else(|| panic!("range end is past the maximum usize")),
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };

    if start > end {
        panic!("range starts at {start} but ends at {end}");
    }
    if end > len {
        panic!("range end {end} out of bounds for length {len}");
    }

    start..end
}

#[cfg(test)]
mod tests {
    use super::range;

    #[test]
    fn bounds() {
        assert_eq!(range(.., 5), 0..5);
        assert_eq!(range(1..3, 5), 1..3);
        assert_eq!(range(1..=3, 5), 1..4);
        assert_eq!(range(2.., 5), 2..5);
        assert_eq!(range(..0, 0), 0..0);
    }

    #[test]
    #[should_panic]
    fn inverted() {
        let _ = range(3..1, 5);
    }

    #[test]
    #[should_panic]
    fn past_end() {
        let _ = range(0..6, 5);
    }
}
