use text_size::TextSize;
use triomphe::Arc;
use verdant_span::HasTextLen;

use super::{
    GreenBackground, GreenInteger, GreenStringLiteral, GreenUndefinedValue, GreenValue,
    Punctuation,
};
use crate::SymbolType;

/// Terminal symbol as produced by the tokenizer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GreenSymbol {
    Whitespace(TextSize),
    Comment(TextSize),
    UnterminatedComment(TextSize),
    Boolean(bool),
    Integer(Arc<GreenInteger>),
    String(Arc<GreenStringLiteral>),
    ErrorString(TextSize),
    Undefined(Arc<GreenUndefinedValue>),
    UnknownSymbol(char),
    Punctuation(Punctuation),
    Eof,
}

impl GreenSymbol {
    pub fn symbol_type(&self) -> SymbolType {
        match self {
            GreenSymbol::Whitespace(_) => SymbolType::Whitespace,
            GreenSymbol::Comment(_) => SymbolType::Comment,
            GreenSymbol::UnterminatedComment(_) => SymbolType::UnterminatedComment,
            GreenSymbol::Boolean(_) => SymbolType::BooleanLiteral,
            GreenSymbol::Integer(_) => SymbolType::IntegerLiteral,
            GreenSymbol::String(_) => SymbolType::StringLiteral,
            GreenSymbol::ErrorString(_) => SymbolType::ErrorString,
            GreenSymbol::Undefined(_) => SymbolType::UndefinedValue,
            GreenSymbol::UnknownSymbol(_) => SymbolType::UnknownSymbol,
            GreenSymbol::Punctuation(punctuation) => punctuation.symbol_type(),
            GreenSymbol::Eof => SymbolType::Eof,
        }
    }

    /// Converts a background symbol into its tree form.
    pub fn to_background(&self) -> Option<GreenBackground> {
        Some(match *self {
            GreenSymbol::Whitespace(len) => GreenBackground::Whitespace(len),
            GreenSymbol::Comment(len) => GreenBackground::Comment(len),
            GreenSymbol::UnterminatedComment(len) => GreenBackground::UnterminatedComment(len),
            _ => return None,
        })
    }

    /// Converts a terminal value symbol into its tree form.
    ///
    /// Brackets start composite values and are not converted here.
    pub fn to_value(&self) -> Option<GreenValue> {
        Some(match self {
            GreenSymbol::Boolean(value) => GreenValue::Boolean(*value),
            GreenSymbol::Integer(integer) => GreenValue::Integer(integer.clone()),
            GreenSymbol::String(literal) => GreenValue::String(literal.clone()),
            GreenSymbol::ErrorString(len) => GreenValue::ErrorString(*len),
            GreenSymbol::Undefined(undefined) => GreenValue::Undefined(undefined.clone()),
            GreenSymbol::UnknownSymbol(symbol) => GreenValue::UnknownSymbol(*symbol),
            _ => return None,
        })
    }

    /// The structural character, if this is punctuation.
    pub fn punctuation(&self) -> Option<Punctuation> {
        match self {
            GreenSymbol::Punctuation(punctuation) => Some(*punctuation),
            _ => None,
        }
    }
}

impl HasTextLen for GreenSymbol {
    fn text_len(&self) -> TextSize {
        match self {
            GreenSymbol::Whitespace(len)
            | GreenSymbol::Comment(len)
            | GreenSymbol::UnterminatedComment(len)
            | GreenSymbol::ErrorString(len) => *len,
            GreenSymbol::Punctuation(punctuation) => punctuation.text_len(),
            GreenSymbol::Eof => TextSize::new(0),
            _ => self.to_value().map_or(TextSize::new(0), |value| value.text_len()),
        }
    }
}
