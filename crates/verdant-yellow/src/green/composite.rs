use text_size::TextSize;
use triomphe::Arc;
use verdant_span::{HasTextLen, SINGLE_CHAR_LEN, SpanList};

use super::{GreenBackgroundList, GreenStringLiteral, GreenValue};

/// A value with the background that precedes it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreenValueWithBackground {
    background: GreenBackgroundList,
    value: GreenValue,
}

impl GreenValueWithBackground {
    pub fn new(background: GreenBackgroundList, value: GreenValue) -> Self {
        Self { background, value }
    }

    #[inline]
    pub fn background(&self) -> &GreenBackgroundList {
        &self.background
    }

    #[inline]
    pub fn value(&self) -> &GreenValue {
        &self.value
    }
}

impl HasTextLen for GreenValueWithBackground {
    fn text_len(&self) -> TextSize {
        self.background.text_len() + self.value.text_len()
    }
}

/// One or more values occupying a single value slot, followed by background.
///
/// Only the first value is meaningful; any further values are errors that
/// the tree keeps so that no text is lost.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreenMultiValue {
    values: SpanList<GreenValueWithBackground>,
    trailing: GreenBackgroundList,
}

impl GreenMultiValue {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(
        values: impl IntoIterator<Item = GreenValueWithBackground>,
        trailing: GreenBackgroundList,
    ) -> Self {
        let values = SpanList::new(values);
        assert!(!values.is_empty(), "a multi-value holds at least one value");
        Self { values, trailing }
    }

    /// A multi-value holding only background and a missing value.
    pub fn missing(background: GreenBackgroundList) -> Self {
        Self::new(
            [GreenValueWithBackground::new(background, GreenValue::Missing)],
            GreenBackgroundList::empty(),
        )
    }

    #[inline]
    pub fn values(&self) -> &SpanList<GreenValueWithBackground> {
        &self.values
    }

    /// The first, meaningful value.
    #[inline]
    pub fn first(&self) -> &GreenValueWithBackground {
        self.values.first().expect("a multi-value holds at least one value")
    }

    #[inline]
    pub fn trailing(&self) -> &GreenBackgroundList {
        &self.trailing
    }
}

impl HasTextLen for GreenMultiValue {
    fn text_len(&self) -> TextSize {
        self.values.text_len() + self.trailing.text_len()
    }
}

/// Sections of an object member separated by colons.
///
/// The first section is the key. When it holds a string literal that
/// literal is also kept as the valid key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreenKeyValue {
    sections: SpanList<GreenMultiValue>,
    valid_key: Option<Arc<GreenStringLiteral>>,
}

impl GreenKeyValue {
    /// # Panics
    ///
    /// Panics if `sections` is empty.
    pub fn new(sections: impl IntoIterator<Item = GreenMultiValue>) -> Self {
        let sections = SpanList::separated(sections, SINGLE_CHAR_LEN);
        let key = sections.first().expect("a key-value holds at least one section");
        let valid_key = key.first().value().as_string_literal().cloned();
        Self { sections, valid_key }
    }

    #[inline]
    pub fn sections(&self) -> &SpanList<GreenMultiValue> {
        &self.sections
    }

    /// The key section, which may hold a missing value.
    #[inline]
    pub fn key(&self) -> &GreenMultiValue {
        self.sections.first().expect("a key-value holds at least one section")
    }

    /// Sections after the first colon. Normally exactly one.
    pub fn value_sections(&self) -> impl ExactSizeIterator<Item = &GreenMultiValue> + '_ {
        self.sections.iter().skip(1)
    }

    #[inline]
    pub fn valid_key(&self) -> Option<&Arc<GreenStringLiteral>> {
        self.valid_key.as_ref()
    }
}

impl HasTextLen for GreenKeyValue {
    fn text_len(&self) -> TextSize {
        self.sections.text_len()
    }
}

/// `[` items separated by `,` and an optional `]`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreenList {
    items: SpanList<GreenMultiValue>,
    missing_bracket_close: bool,
}

impl GreenList {
    /// # Panics
    ///
    /// Panics if `items` is empty.
    pub fn new(
        items: impl IntoIterator<Item = GreenMultiValue>,
        missing_bracket_close: bool,
    ) -> Self {
        let items = SpanList::separated(items, SINGLE_CHAR_LEN);
        assert!(!items.is_empty(), "a list holds at least one item");
        Self { items, missing_bracket_close }
    }

    #[inline]
    pub fn items(&self) -> &SpanList<GreenMultiValue> {
        &self.items
    }

    #[inline]
    pub fn missing_bracket_close(&self) -> bool {
        self.missing_bracket_close
    }
}

impl HasTextLen for GreenList {
    fn text_len(&self) -> TextSize {
        bracketed_len(self.items.text_len(), !self.missing_bracket_close)
    }
}

/// `{` key-values separated by `,` and an optional `}`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreenMap {
    key_values: SpanList<GreenKeyValue>,
    missing_curly_close: bool,
}

impl GreenMap {
    /// # Panics
    ///
    /// Panics if `key_values` is empty.
    pub fn new(
        key_values: impl IntoIterator<Item = GreenKeyValue>,
        missing_curly_close: bool,
    ) -> Self {
        let key_values = SpanList::separated(key_values, SINGLE_CHAR_LEN);
        assert!(!key_values.is_empty(), "a map holds at least one key-value");
        Self { key_values, missing_curly_close }
    }

    #[inline]
    pub fn key_values(&self) -> &SpanList<GreenKeyValue> {
        &self.key_values
    }

    #[inline]
    pub fn missing_curly_close(&self) -> bool {
        self.missing_curly_close
    }

    /// First key-value whose valid key decodes to `key`.
    pub fn get(&self, key: &str) -> Option<&GreenKeyValue> {
        self.key_values
            .iter()
            .find(|key_value| key_value.valid_key().is_some_and(|valid| valid.value() == key))
    }
}

impl HasTextLen for GreenMap {
    fn text_len(&self) -> TextSize {
        bracketed_len(self.key_values.text_len(), !self.missing_curly_close)
    }
}

fn bracketed_len(inner: TextSize, closed: bool) -> TextSize {
    let close = if closed { SINGLE_CHAR_LEN } else { TextSize::new(0) };
    SINGLE_CHAR_LEN + inner + close
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::green::{GreenBackground, StringSegment};

    fn value(value: GreenValue) -> GreenMultiValue {
        GreenMultiValue::new(
            [GreenValueWithBackground::new(GreenBackgroundList::empty(), value)],
            GreenBackgroundList::empty(),
        )
    }

    fn string(text: &str) -> GreenValue {
        GreenValue::String(Arc::new(GreenStringLiteral::new(vec![StringSegment::Raw(
            text.into(),
        )])))
    }

    #[test]
    fn list_length_counts_brackets_and_commas() {
        // [true,false]
        let closed = GreenList::new([value(true.into()), value(false.into())], false);
        assert_eq!(closed.text_len(), TextSize::new(12));

        // [true,
        let open = GreenList::new([value(true.into()), value(GreenValue::Missing)], true);
        assert_eq!(open.text_len(), TextSize::new(6));
    }

    #[test]
    fn key_value_keeps_valid_key() {
        // "a": true
        let key_value = GreenKeyValue::new([
            value(string("a")),
            GreenMultiValue::new(
                [GreenValueWithBackground::new(
                    GreenBackgroundList::new([GreenBackground::Whitespace(TextSize::new(1))]),
                    true.into(),
                )],
                GreenBackgroundList::empty(),
            ),
        ]);
        assert_eq!(key_value.text_len(), TextSize::new(9));
        assert_eq!(key_value.valid_key().map(|key| key.value()), Some("a"));
        assert_eq!(key_value.value_sections().len(), 1);

        let map = GreenMap::new([key_value], false);
        assert_eq!(map.text_len(), TextSize::new(11));
        assert!(map.get("a").is_some());
        assert!(map.get("b").is_none());
    }

    #[test]
    fn non_string_key_is_not_valid() {
        let key_value = GreenKeyValue::new([value(true.into()), value(GreenValue::Missing)]);
        assert!(key_value.valid_key().is_none());

        let missing = GreenKeyValue::new([GreenMultiValue::missing(GreenBackgroundList::empty())]);
        assert!(missing.valid_key().is_none());
        assert_eq!(missing.text_len(), TextSize::new(0));
    }
}
