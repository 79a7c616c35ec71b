//! Helpers for slot arrays: fixed-size slices of `Option<T>` where an empty slot is a
//! hole that can be filled later.
//!
//! Indices are signed so that callers computing offsets (`idx - 1`) never have to guard
//! against underflow themselves; any negative or out-of-range index simply yields the
//! default.

/// The value at `index`, if the index is in range and the slot is filled.
pub fn get<T>(index: isize, slots: &[Option<T>]) -> Option<&T> {
    let index = usize::try_from(index).ok()?;
    slots.get(index)?.as_ref()
}

pub fn get_or<T: Clone>(index: isize, slots: &[Option<T>], default: T) -> T {
    get(index, slots).cloned().unwrap_or(default)
}

pub fn get_or_else<T: Clone>(index: isize, slots: &[Option<T>], default: impl FnOnce() -> T) -> T {
    get(index, slots).cloned().unwrap_or_else(default)
}

/// Store `item` in the first empty slot.
///
/// Returns the index that was filled, or `None` when every slot is taken (the item is
/// dropped in that case).
pub fn propagate<T>(item: T, slots: &mut [Option<T>]) -> Option<usize> {
    let (idx, slot) = slots.iter_mut().enumerate().find(|(_, slot)| slot.is_none())?;
    *slot = Some(item);
    Some(idx)
}

/// Call `f` for each filled slot from the start, stopping at the first hole.
pub fn consume<T>(slots: &[Option<T>], f: impl FnMut(&T)) {
    slots.iter().map_while(Option::as_ref).for_each(f);
}

/// Iterator over every slot, holes included.
pub fn slots<T>(slots: &[Option<T>]) -> Slots<'_, T> {
    Slots { inner: slots.iter() }
}

/// Iterator returned by [`slots`].
pub struct Slots<'a, T> {
    inner: std::slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for Slots<'a, T> {
    type Item = Option<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Option::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Slots<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::first(0, Some(&"a"))]
    #[case::hole(1, None)]
    #[case::last(2, Some(&"c"))]
    #[case::past_end(3, None)]
    #[case::negative(-1, None)]
    fn test_get(#[case] index: isize, #[case] expected: Option<&&str>) {
        let slots = [Some("a"), None, Some("c")];
        assert_eq!(get(index, &slots), expected);
    }

    #[test]
    fn test_get_or_defaults() {
        let slots = [Some(1), None];
        assert_eq!(get_or(0, &slots, 9), 1);
        assert_eq!(get_or(1, &slots, 9), 9);
        assert_eq!(get_or_else(5, &slots, || 7), 7);
        assert_eq!(get_or(0, &[] as &[Option<i32>], 3), 3);
    }

    #[test]
    fn test_propagate_fills_first_hole() {
        let mut slots = [Some(1), None, None];
        assert_eq!(propagate(2, &mut slots), Some(1));
        assert_eq!(propagate(3, &mut slots), Some(2));
        assert_eq!(propagate(4, &mut slots), None);
        assert_eq!(slots, [Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_consume_stops_at_hole() {
        let slots = [Some(1), Some(2), None, Some(4)];
        let mut seen = Vec::new();
        consume(&slots, |v| seen.push(*v));
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_slots_yields_holes() {
        let values = [Some('x'), None];
        let collected: Vec<_> = slots(&values).collect();
        assert_eq!(collected, vec![Some(&'x'), None]);
        assert_eq!(slots(&values).len(), 2);
    }
}
