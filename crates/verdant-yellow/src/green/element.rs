use text_size::{TextRange, TextSize};
use verdant_span::{HasTextLen, SINGLE_CHAR_LEN, SpanList};

use super::{
    GreenBackground, GreenBackgroundList, GreenKeyValue, GreenMultiValue, GreenValue,
    GreenValueWithBackground, Punctuation,
};
use crate::SyntaxKind;

/// Any green node, as seen through a uniform child interface.
///
/// Child layouts:
///
/// * multi-value: every value, then the trailing background list
/// * value with background: the background list, then the value
/// * background list: each background symbol
/// * root-level delimiter: the punctuation it wraps
/// * list and map: open bracket, items interleaved with commas, and the
///   close bracket when present
/// * key-value: sections interleaved with colons
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GreenElement {
    MultiValue(GreenMultiValue),
    ValueWithBackground(GreenValueWithBackground),
    BackgroundList(GreenBackgroundList),
    Background(GreenBackground),
    Value(GreenValue),
    KeyValue(GreenKeyValue),
    Punctuation(Punctuation),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Separated {
    Item(usize),
    Separator(usize),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Bracketed {
    Open,
    Inner(Separated),
    Close,
}

fn separated_count(items: usize) -> usize {
    (2 * items).saturating_sub(1)
}

fn separated_child(items: usize, index: usize) -> Option<Separated> {
    if index >= separated_count(items) {
        return None;
    }
    Some(if index % 2 == 0 { Separated::Item(index / 2) } else { Separated::Separator(index / 2) })
}

fn bracketed_count(items: usize, closed: bool) -> usize {
    1 + separated_count(items) + usize::from(closed)
}

fn bracketed_child(items: usize, closed: bool, index: usize) -> Option<Bracketed> {
    let inner = separated_count(items);
    match index {
        0 => Some(Bracketed::Open),
        _ if index <= inner => separated_child(items, index - 1).map(Bracketed::Inner),
        _ if index == inner + 1 && closed => Some(Bracketed::Close),
        _ => None,
    }
}

fn separated_range<T: HasTextLen>(items: &SpanList<T>, child: Separated) -> Option<TextRange> {
    match child {
        Separated::Item(index) => items.range_of(index),
        Separated::Separator(index) => items.separator_range(index),
    }
}

fn bracketed_range<T: HasTextLen>(items: &SpanList<T>, child: Bracketed) -> Option<TextRange> {
    match child {
        Bracketed::Open => Some(TextRange::at(TextSize::new(0), SINGLE_CHAR_LEN)),
        Bracketed::Inner(inner) => Some(separated_range(items, inner)? + SINGLE_CHAR_LEN),
        Bracketed::Close => {
            Some(TextRange::at(SINGLE_CHAR_LEN + items.text_len(), SINGLE_CHAR_LEN))
        }
    }
}

impl GreenElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            GreenElement::MultiValue(_) => SyntaxKind::MULTI_VALUE,
            GreenElement::ValueWithBackground(_) => SyntaxKind::VALUE_WITH_BACKGROUND,
            GreenElement::BackgroundList(_) => SyntaxKind::BACKGROUND_LIST,
            GreenElement::Background(background) => background.kind(),
            GreenElement::Value(value) => value.kind(),
            GreenElement::KeyValue(_) => SyntaxKind::KEY_VALUE,
            GreenElement::Punctuation(punctuation) => punctuation.kind(),
        }
    }

    pub fn child_count(&self) -> usize {
        match self {
            GreenElement::MultiValue(node) => node.values().len() + 1,
            GreenElement::ValueWithBackground(_) => 2,
            GreenElement::BackgroundList(list) => list.nodes().len(),
            GreenElement::Background(GreenBackground::RootLevelDelimiter(_)) => 1,
            GreenElement::Value(GreenValue::List(list)) => {
                bracketed_count(list.items().len(), !list.missing_bracket_close())
            }
            GreenElement::Value(GreenValue::Map(map)) => {
                bracketed_count(map.key_values().len(), !map.missing_curly_close())
            }
            GreenElement::KeyValue(node) => separated_count(node.sections().len()),
            GreenElement::Background(_)
            | GreenElement::Value(_)
            | GreenElement::Punctuation(_) => 0,
        }
    }

    /// The child at `index`. Cloning a green child only bumps reference
    /// counts.
    pub fn child(&self, index: usize) -> Option<GreenElement> {
        Some(match self {
            GreenElement::MultiValue(node) => match node.values().get(index) {
                Some(value) => GreenElement::ValueWithBackground(value.clone()),
                None if index == node.values().len() => {
                    GreenElement::BackgroundList(node.trailing().clone())
                }
                None => return None,
            },
            GreenElement::ValueWithBackground(node) => match index {
                0 => GreenElement::BackgroundList(node.background().clone()),
                1 => GreenElement::Value(node.value().clone()),
                _ => return None,
            },
            GreenElement::BackgroundList(list) => {
                GreenElement::Background(*list.nodes().get(index)?)
            }
            GreenElement::Background(GreenBackground::RootLevelDelimiter(punctuation))
                if index == 0 =>
            {
                GreenElement::Punctuation(*punctuation)
            }
            GreenElement::Value(GreenValue::List(list)) => {
                let items = list.items();
                match bracketed_child(items.len(), !list.missing_bracket_close(), index)? {
                    Bracketed::Open => GreenElement::Punctuation(Punctuation::BracketOpen),
                    Bracketed::Inner(Separated::Item(index)) => {
                        GreenElement::MultiValue(items.get(index)?.clone())
                    }
                    Bracketed::Inner(Separated::Separator(_)) => {
                        GreenElement::Punctuation(Punctuation::Comma)
                    }
                    Bracketed::Close => GreenElement::Punctuation(Punctuation::BracketClose),
                }
            }
            GreenElement::Value(GreenValue::Map(map)) => {
                let key_values = map.key_values();
                match bracketed_child(key_values.len(), !map.missing_curly_close(), index)? {
                    Bracketed::Open => GreenElement::Punctuation(Punctuation::CurlyOpen),
                    Bracketed::Inner(Separated::Item(index)) => {
                        GreenElement::KeyValue(key_values.get(index)?.clone())
                    }
                    Bracketed::Inner(Separated::Separator(_)) => {
                        GreenElement::Punctuation(Punctuation::Comma)
                    }
                    Bracketed::Close => GreenElement::Punctuation(Punctuation::CurlyClose),
                }
            }
            GreenElement::KeyValue(node) => {
                let sections = node.sections();
                match separated_child(sections.len(), index)? {
                    Separated::Item(index) => {
                        GreenElement::MultiValue(sections.get(index)?.clone())
                    }
                    Separated::Separator(_) => GreenElement::Punctuation(Punctuation::Colon),
                }
            }
            _ => return None,
        })
    }

    /// Range of the child at `index`, relative to the start of this node.
    pub fn child_range(&self, index: usize) -> Option<TextRange> {
        match self {
            GreenElement::MultiValue(node) => {
                let values = node.values();
                match values.range_of(index) {
                    Some(range) => Some(range),
                    None if index == values.len() => {
                        Some(TextRange::at(values.text_len(), node.trailing().text_len()))
                    }
                    None => None,
                }
            }
            GreenElement::ValueWithBackground(node) => {
                let background_len = node.background().text_len();
                match index {
                    0 => Some(TextRange::up_to(background_len)),
                    1 => Some(TextRange::at(background_len, node.value().text_len())),
                    _ => None,
                }
            }
            GreenElement::BackgroundList(list) => list.nodes().range_of(index),
            GreenElement::Background(GreenBackground::RootLevelDelimiter(_)) if index == 0 => {
                Some(TextRange::up_to(SINGLE_CHAR_LEN))
            }
            GreenElement::Value(GreenValue::List(list)) => {
                let items = list.items();
                let child = bracketed_child(items.len(), !list.missing_bracket_close(), index)?;
                bracketed_range(items, child)
            }
            GreenElement::Value(GreenValue::Map(map)) => {
                let key_values = map.key_values();
                let child = bracketed_child(key_values.len(), !map.missing_curly_close(), index)?;
                bracketed_range(key_values, child)
            }
            GreenElement::KeyValue(node) => {
                let sections = node.sections();
                separated_range(sections, separated_child(sections.len(), index)?)
            }
            _ => None,
        }
    }
}

impl HasTextLen for GreenElement {
    fn text_len(&self) -> TextSize {
        match self {
            GreenElement::MultiValue(node) => node.text_len(),
            GreenElement::ValueWithBackground(node) => node.text_len(),
            GreenElement::BackgroundList(list) => list.text_len(),
            GreenElement::Background(background) => background.text_len(),
            GreenElement::Value(value) => value.text_len(),
            GreenElement::KeyValue(node) => node.text_len(),
            GreenElement::Punctuation(punctuation) => punctuation.text_len(),
        }
    }
}

impl From<GreenMultiValue> for GreenElement {
    fn from(node: GreenMultiValue) -> Self {
        GreenElement::MultiValue(node)
    }
}
