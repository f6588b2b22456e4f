/// Kind of a terminal symbol produced by the tokenizer.
///
/// Variants are ordered so that a single comparison classifies a symbol:
/// everything before [`SymbolType::FIRST_FOREGROUND`] is background, and
/// everything from [`SymbolType::FIRST_VALUE_DELIMITER`] on ends the current
/// value section. Symbols in between can start a value.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum SymbolType {
    Whitespace,
    Comment,
    UnterminatedComment,

    BooleanLiteral,
    IntegerLiteral,
    StringLiteral,
    ErrorString,
    UndefinedValue,
    UnknownSymbol,
    CurlyOpen,
    BracketOpen,

    Colon,
    Comma,
    CurlyClose,
    BracketClose,
    Eof,
}

impl SymbolType {
    pub const FIRST_FOREGROUND: Self = SymbolType::BooleanLiteral;
    pub const FIRST_VALUE_DELIMITER: Self = SymbolType::Colon;

    #[inline]
    pub const fn is_background(self) -> bool {
        (self as u8) < Self::FIRST_FOREGROUND as u8
    }

    #[inline]
    pub const fn is_value_delimiter(self) -> bool {
        (self as u8) >= Self::FIRST_VALUE_DELIMITER as u8
    }

    #[inline]
    pub const fn is_value_start(self) -> bool {
        !self.is_background() && !self.is_value_delimiter()
    }
}

#[cfg(test)]
mod tests {
    use super::SymbolType::{self, *};

    #[test]
    fn thresholds_partition_symbol_types() {
        let background = [Whitespace, Comment, UnterminatedComment];
        let value_starts = [
            BooleanLiteral,
            IntegerLiteral,
            StringLiteral,
            ErrorString,
            UndefinedValue,
            UnknownSymbol,
            CurlyOpen,
            BracketOpen,
        ];
        let delimiters = [Colon, Comma, CurlyClose, BracketClose, Eof];

        for symbol in background {
            assert!(symbol.is_background(), "{symbol:?}");
            assert!(!symbol.is_value_start() && !symbol.is_value_delimiter(), "{symbol:?}");
        }
        for symbol in value_starts {
            assert!(symbol.is_value_start(), "{symbol:?}");
            assert!(!symbol.is_background() && !symbol.is_value_delimiter(), "{symbol:?}");
        }
        for symbol in delimiters {
            assert!(symbol.is_value_delimiter(), "{symbol:?}");
            assert!(!symbol.is_background() && !symbol.is_value_start(), "{symbol:?}");
        }
    }

    #[test]
    fn thresholds_are_ordered() {
        assert!(SymbolType::FIRST_FOREGROUND < SymbolType::FIRST_VALUE_DELIMITER);
    }
}
