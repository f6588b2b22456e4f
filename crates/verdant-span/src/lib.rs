//! Position-free span primitives shared by every layer of the syntax tree.
//!
//! Nothing in here knows where it lives in the source text: a node only
//! reports how long it is, and containers derive child offsets from the
//! lengths of the children before it.

mod span_list;

pub use span_list::SpanList;
pub use text_size::{TextRange, TextSize};

/// A syntax element that occupies a contiguous run of source text.
pub trait HasTextLen {
    fn text_len(&self) -> TextSize;
}

impl<T: HasTextLen + ?Sized> HasTextLen for &T {
    #[inline]
    fn text_len(&self) -> TextSize {
        (**self).text_len()
    }
}

impl<T: HasTextLen> HasTextLen for triomphe::Arc<T> {
    #[inline]
    fn text_len(&self) -> TextSize {
        (**self).text_len()
    }
}

/// Width of a one-character structural token: `{`, `}`, `[`, `]`, `:` or `,`.
pub const SINGLE_CHAR_LEN: TextSize = TextSize::new(1);
