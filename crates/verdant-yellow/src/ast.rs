use num_bigint::BigInt;

use crate::SyntaxKind::*;
use crate::green::{GreenElement, GreenValue};
use crate::{Children, SyntaxNode};

pub trait Node<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self>
    where
        Self: Sized;

    fn syntax(self) -> SyntaxNode<'a>;
}

macro_rules! ast_node {
    ($($(#[$meta:meta])* $name:ident => $kind:ident,)*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name<'a>(SyntaxNode<'a>);

        impl<'a> Node<'a> for $name<'a> {
            fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
                (syntax.kind() == $kind).then_some(Self(syntax))
            }

            fn syntax(self) -> SyntaxNode<'a> {
                self.0
            }
        }
    )*};
}

ast_node! {
    /// Value slot: the first value counts, later ones are errors.
    MultiValue => MULTI_VALUE,
    ValueWithBackground => VALUE_WITH_BACKGROUND,
    BackgroundList => BACKGROUND_LIST,
    KeyValue => KEY_VALUE,
    Boolean => BOOLEAN,
    Integer => INTEGER,
    StringLiteral => STRING,
    ErrorString => ERROR_STRING,
    UndefinedValue => UNDEFINED_VALUE,
    UnknownSymbol => UNKNOWN_SYMBOL,
    MissingValue => MISSING_VALUE,
    List => LIST,
    Map => MAP,
}

fn green_value<'a>(syntax: SyntaxNode<'a>) -> &'a GreenValue {
    match syntax.green() {
        GreenElement::Value(value) => value,
        _ => unreachable!("{:?} is not a value", syntax.kind()),
    }
}

impl<'a> MultiValue<'a> {
    pub fn values(self) -> impl Iterator<Item = ValueWithBackground<'a>> + 'a {
        self.0.children().filter_map(ValueWithBackground::cast)
    }

    /// The meaningful value of this slot.
    pub fn value(self) -> Value<'a> {
        self.values().next().map(ValueWithBackground::value).expect("a multi-value holds a value")
    }

    pub fn trailing_background(self) -> BackgroundList<'a> {
        self.0.last_child().and_then(BackgroundList::cast).expect("trailing background")
    }
}

impl<'a> ValueWithBackground<'a> {
    pub fn background(self) -> BackgroundList<'a> {
        self.0.first_child().and_then(BackgroundList::cast).expect("leading background")
    }

    pub fn value(self) -> Value<'a> {
        self.0.child(1).and_then(Value::cast).expect("a value")
    }
}

impl<'a> BackgroundList<'a> {
    pub fn nodes(self) -> Children<'a> {
        self.0.children()
    }
}

impl<'a> KeyValue<'a> {
    /// The section before the first colon.
    pub fn key(self) -> MultiValue<'a> {
        self.0.first_child().and_then(MultiValue::cast).expect("a key section")
    }

    /// The decoded key, if the key section holds a string literal.
    pub fn valid_key(self) -> Option<&'a str> {
        match self.0.green() {
            GreenElement::KeyValue(green) => green.valid_key().map(|key| key.value()),
            _ => None,
        }
    }

    /// Sections after the first colon.
    pub fn value_sections(self) -> impl Iterator<Item = MultiValue<'a>> + 'a {
        self.0.children().filter_map(MultiValue::cast).skip(1)
    }

    /// The first value section, if a colon was present.
    pub fn value(self) -> Option<MultiValue<'a>> {
        self.value_sections().next()
    }
}

impl Boolean<'_> {
    pub fn value(self) -> bool {
        matches!(green_value(self.0), GreenValue::Boolean(true))
    }
}

impl<'a> Integer<'a> {
    pub fn value(self) -> &'a BigInt {
        match green_value(self.0) {
            GreenValue::Integer(integer) => integer.value(),
            _ => unreachable!(),
        }
    }
}

impl<'a> StringLiteral<'a> {
    /// The decoded value, escapes resolved.
    pub fn value(self) -> &'a str {
        match green_value(self.0) {
            GreenValue::String(literal) => literal.value(),
            _ => unreachable!(),
        }
    }
}

impl<'a> UndefinedValue<'a> {
    pub fn text(self) -> &'a str {
        self.0.text()
    }
}

impl UnknownSymbol<'_> {
    pub fn symbol(self) -> char {
        match green_value(self.0) {
            GreenValue::UnknownSymbol(symbol) => *symbol,
            _ => unreachable!(),
        }
    }
}

impl<'a> List<'a> {
    pub fn items(self) -> impl Iterator<Item = MultiValue<'a>> + 'a {
        self.0.children().filter_map(MultiValue::cast)
    }

    pub fn is_closed(self) -> bool {
        self.0.last_child().is_some_and(|last| last.kind() == BRACKET_CLOSE)
    }
}

impl<'a> Map<'a> {
    pub fn key_values(self) -> impl Iterator<Item = KeyValue<'a>> + 'a {
        self.0.children().filter_map(KeyValue::cast)
    }

    pub fn is_closed(self) -> bool {
        self.0.last_child().is_some_and(|last| last.kind() == CURLY_CLOSE)
    }

    /// First member whose valid key equals `key`.
    pub fn get(self, key: &str) -> Option<KeyValue<'a>> {
        self.key_values().find(|key_value| key_value.valid_key() == Some(key))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Boolean(Boolean<'a>),
    Integer(Integer<'a>),
    String(StringLiteral<'a>),
    ErrorString(ErrorString<'a>),
    Undefined(UndefinedValue<'a>),
    UnknownSymbol(UnknownSymbol<'a>),
    Missing(MissingValue<'a>),
    List(List<'a>),
    Map(Map<'a>),
}

impl<'a> Node<'a> for Value<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        Some(match syntax.kind() {
            BOOLEAN => Value::Boolean(Boolean(syntax)),
            INTEGER => Value::Integer(Integer(syntax)),
            STRING => Value::String(StringLiteral(syntax)),
            ERROR_STRING => Value::ErrorString(ErrorString(syntax)),
            UNDEFINED_VALUE => Value::Undefined(UndefinedValue(syntax)),
            UNKNOWN_SYMBOL => Value::UnknownSymbol(UnknownSymbol(syntax)),
            MISSING_VALUE => Value::Missing(MissingValue(syntax)),
            LIST => Value::List(List(syntax)),
            MAP => Value::Map(Map(syntax)),
            _ => return None,
        })
    }

    fn syntax(self) -> SyntaxNode<'a> {
        match self {
            Value::Boolean(node) => node.0,
            Value::Integer(node) => node.0,
            Value::String(node) => node.0,
            Value::ErrorString(node) => node.0,
            Value::Undefined(node) => node.0,
            Value::UnknownSymbol(node) => node.0,
            Value::Missing(node) => node.0,
            Value::List(node) => node.0,
            Value::Map(node) => node.0,
        }
    }
}

impl Value<'_> {
    #[inline]
    pub fn is_missing(self) -> bool {
        matches!(self, Value::Missing(_))
    }
}
