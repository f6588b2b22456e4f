//! Immutable, position-independent syntax nodes.
//!
//! Green nodes know their own length and nothing about where they sit in the
//! source. They are built bottom-up by the parser and shared freely between
//! trees.

mod background;
mod composite;
mod element;
mod string;
mod symbol;
mod value;

pub use background::{GreenBackground, GreenBackgroundList, Punctuation};
pub use composite::{GreenKeyValue, GreenList, GreenMap, GreenMultiValue, GreenValueWithBackground};
pub use element::GreenElement;
pub use string::{GreenStringLiteral, StringSegment};
pub use symbol::GreenSymbol;
pub use value::{GreenInteger, GreenUndefinedValue, GreenValue};
