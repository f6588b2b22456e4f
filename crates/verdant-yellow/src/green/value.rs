use num_bigint::BigInt;
use text_size::TextSize;
use triomphe::Arc;
use verdant_span::HasTextLen;

use super::{GreenList, GreenMap, GreenStringLiteral};
use crate::SyntaxKind;

const TRUE_LEN: TextSize = TextSize::new(4);
const FALSE_LEN: TextSize = TextSize::new(5);

/// Integer literal. The source spelling is not kept, only its length, so
/// `007` and `7` share a value but not a length.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GreenInteger {
    value: BigInt,
    text_len: TextSize,
}

impl GreenInteger {
    pub fn new(value: BigInt, text_len: TextSize) -> Self {
        Self { value, text_len }
    }

    #[inline]
    pub fn value(&self) -> &BigInt {
        &self.value
    }
}

/// Run of value characters that is not a recognized literal.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GreenUndefinedValue {
    text: Box<str>,
}

impl GreenUndefinedValue {
    pub fn new(text: impl Into<Box<str>>) -> Self {
        Self { text: text.into() }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Anything that can occupy a value slot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GreenValue {
    Boolean(bool),
    Integer(Arc<GreenInteger>),
    String(Arc<GreenStringLiteral>),
    /// String literal with lexical errors; only its length is kept.
    ErrorString(TextSize),
    Undefined(Arc<GreenUndefinedValue>),
    UnknownSymbol(char),
    List(Arc<GreenList>),
    Map(Arc<GreenMap>),
    /// Placeholder for a value that was expected but absent. Always empty.
    Missing,
}

impl GreenValue {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            GreenValue::Boolean(_) => SyntaxKind::BOOLEAN,
            GreenValue::Integer(_) => SyntaxKind::INTEGER,
            GreenValue::String(_) => SyntaxKind::STRING,
            GreenValue::ErrorString(_) => SyntaxKind::ERROR_STRING,
            GreenValue::Undefined(_) => SyntaxKind::UNDEFINED_VALUE,
            GreenValue::UnknownSymbol(_) => SyntaxKind::UNKNOWN_SYMBOL,
            GreenValue::List(_) => SyntaxKind::LIST,
            GreenValue::Map(_) => SyntaxKind::MAP,
            GreenValue::Missing => SyntaxKind::MISSING_VALUE,
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, GreenValue::Missing)
    }

    pub fn as_string_literal(&self) -> Option<&Arc<GreenStringLiteral>> {
        match self {
            GreenValue::String(literal) => Some(literal),
            _ => None,
        }
    }
}

impl HasTextLen for GreenValue {
    fn text_len(&self) -> TextSize {
        match self {
            GreenValue::Boolean(true) => TRUE_LEN,
            GreenValue::Boolean(false) => FALSE_LEN,
            GreenValue::Integer(integer) => integer.text_len,
            GreenValue::String(literal) => literal.text_len(),
            GreenValue::ErrorString(len) => *len,
            GreenValue::Undefined(undefined) => TextSize::of(undefined.text()),
            GreenValue::UnknownSymbol(symbol) => TextSize::of(*symbol),
            GreenValue::List(list) => list.text_len(),
            GreenValue::Map(map) => map.text_len(),
            GreenValue::Missing => TextSize::new(0),
        }
    }
}

impl From<bool> for GreenValue {
    fn from(value: bool) -> Self {
        GreenValue::Boolean(value)
    }
}
