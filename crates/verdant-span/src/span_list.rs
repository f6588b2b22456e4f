//! Immutable sequence of spans with precomputed start offsets.

use std::fmt;

use text_size::{TextRange, TextSize};
use triomphe::ThinArc;

use crate::HasTextLen;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Header {
    text_len: TextSize,
    separator_len: TextSize,
}

#[derive(Debug, Eq, PartialEq)]
struct Entry<T> {
    start: TextSize,
    item: T,
}

/// Ordered, shareable list of spans.
///
/// Every item's start offset relative to the list is computed once at
/// construction, so offset lookups are O(1) by index and O(log n) by
/// position. Items may be separated by a fixed-width separator which is
/// accounted for in the offsets but not stored.
pub struct SpanList<T> {
    ptr: Option<ThinArc<Header, Entry<T>>>,
}

impl<T> SpanList<T> {
    /// The empty list. Does not allocate.
    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    #[inline]
    fn entries(&self) -> &[Entry<T>] {
        match &self.ptr {
            None => &[],
            Some(ptr) => &ptr.slice,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    /// Total length, including separators between items.
    #[inline]
    pub fn text_len(&self) -> TextSize {
        match &self.ptr {
            None => TextSize::new(0),
            Some(ptr) => ptr.header.header.text_len,
        }
    }

    #[inline]
    pub fn separator_len(&self) -> TextSize {
        match &self.ptr {
            None => TextSize::new(0),
            Some(ptr) => ptr.header.header.separator_len,
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries().get(index).map(|entry| &entry.item)
    }

    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.entries().last().map(|entry| &entry.item)
    }

    /// Start of the item at `index`, relative to the start of the list.
    #[inline]
    pub fn start_of(&self, index: usize) -> Option<TextSize> {
        self.entries().get(index).map(|entry| entry.start)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + Clone + '_ {
        self.entries().iter().map(|entry| &entry.item)
    }

    /// Iterates items together with their relative start offsets.
    pub fn iter_with_starts(
        &self,
    ) -> impl DoubleEndedIterator<Item = (TextSize, &T)> + ExactSizeIterator + '_ {
        self.entries().iter().map(|entry| (entry.start, &entry.item))
    }
}

impl<T: HasTextLen> SpanList<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self::separated(items, TextSize::new(0))
    }

    /// Builds a list whose consecutive items are separated by
    /// `separator_len` bytes of text owned by the list.
    pub fn separated(items: impl IntoIterator<Item = T>, separator_len: TextSize) -> Self {
        let mut text_len = TextSize::new(0);
        let entries = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                if index > 0 {
                    text_len += separator_len;
                }
                let start = text_len;
                text_len += item.text_len();
                Entry { start, item }
            })
            .collect::<Vec<_>>();

        if entries.is_empty() {
            return Self::empty();
        }

        let header = Header { text_len, separator_len };
        Self { ptr: Some(ThinArc::from_header_and_iter(header, entries.into_iter())) }
    }

    /// Range of the item at `index`, relative to the start of the list.
    #[inline]
    pub fn range_of(&self, index: usize) -> Option<TextRange> {
        let entry = self.entries().get(index)?;
        Some(TextRange::at(entry.start, entry.item.text_len()))
    }

    /// Range of the separator following the item at `index`, if there is one.
    pub fn separator_range(&self, index: usize) -> Option<TextRange> {
        if index + 1 >= self.len() {
            return None;
        }
        let item = self.range_of(index)?;
        Some(TextRange::at(item.end(), self.separator_len()))
    }

    /// Index of the item covering `offset`, or `None` if `offset` falls on a
    /// separator or outside the list.
    pub fn index_at_offset(&self, offset: TextSize) -> Option<usize> {
        let index = self.entries().partition_point(|entry| entry.start <= offset).checked_sub(1)?;
        self.range_of(index)?.contains(offset).then_some(index)
    }
}

impl<T: HasTextLen> HasTextLen for SpanList<T> {
    #[inline]
    fn text_len(&self) -> TextSize {
        SpanList::text_len(self)
    }
}

impl<T> Clone for SpanList<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self { ptr: self.ptr.clone() }
    }
}

impl<T> Default for SpanList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: PartialEq> PartialEq for SpanList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.separator_len() == other.separator_len() && self.entries() == other.entries()
    }
}

impl<T: Eq> Eq for SpanList<T> {}

impl<T: fmt::Debug> fmt::Debug for SpanList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct Len(u32);

    impl HasTextLen for Len {
        fn text_len(&self) -> TextSize {
            self.0.into()
        }
    }

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn empty_list_does_not_allocate() {
        let list = SpanList::<Len>::new([]);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.text_len(), TextSize::new(0));
        assert_eq!(list.get(0), None);
        assert_eq!(list.index_at_offset(0.into()), None);
        assert_eq!(list, SpanList::empty());
    }

    #[test]
    fn starts_accumulate_lengths() {
        let list = SpanList::new([Len(3), Len(0), Len(2)]);
        assert_eq!(list.text_len(), TextSize::new(5));
        assert_eq!(list.start_of(0), Some(0.into()));
        assert_eq!(list.start_of(1), Some(3.into()));
        assert_eq!(list.start_of(2), Some(3.into()));
        assert_eq!(list.range_of(2), Some(range(3, 5)));
        assert_eq!(list.index_at_offset(3.into()), Some(2));
        assert_eq!(list.index_at_offset(5.into()), None);
    }

    #[test]
    fn separators_are_counted_between_items() {
        let list = SpanList::separated([Len(3), Len(0), Len(2)], 1.into());
        assert_eq!(list.text_len(), TextSize::new(7));
        assert_eq!(list.range_of(0), Some(range(0, 3)));
        assert_eq!(list.range_of(1), Some(range(4, 4)));
        assert_eq!(list.range_of(2), Some(range(5, 7)));
        assert_eq!(list.separator_range(0), Some(range(3, 4)));
        assert_eq!(list.separator_range(1), Some(range(4, 5)));
        assert_eq!(list.separator_range(2), None);
    }

    #[test]
    fn offsets_on_separators_have_no_item() {
        let list = SpanList::separated([Len(3), Len(0), Len(2)], 1.into());
        assert_eq!(list.index_at_offset(0.into()), Some(0));
        assert_eq!(list.index_at_offset(2.into()), Some(0));
        assert_eq!(list.index_at_offset(3.into()), None);
        assert_eq!(list.index_at_offset(4.into()), None);
        assert_eq!(list.index_at_offset(5.into()), Some(2));
        assert_eq!(list.index_at_offset(7.into()), None);
    }

    #[test]
    fn items_pair_with_their_starts() {
        let list = SpanList::separated([Len(3), Len(0), Len(2)], 1.into());
        let starts = list.iter_with_starts().map(|(start, len)| (u32::from(start), len.0));
        assert_eq!(starts.collect::<Vec<_>>(), vec![(0, 3), (4, 0), (5, 2)]);
        assert_eq!(list.iter_with_starts().next_back(), Some((5.into(), &Len(2))));
        assert_eq!(list.iter_with_starts().len(), 3);
    }

    #[test]
    fn clones_share_content() {
        let list = SpanList::new([Len(1), Len(2)]);
        let clone = list.clone();
        assert_eq!(list, clone);
        assert_eq!(clone.iter().map(|len| len.0).collect::<Vec<_>>(), vec![1, 2]);
    }
}
