/// Kind of a node in the red tree.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SyntaxKind {
    MULTI_VALUE,
    VALUE_WITH_BACKGROUND,
    BACKGROUND_LIST,
    KEY_VALUE,

    WHITESPACE,
    COMMENT,
    UNTERMINATED_COMMENT,
    ROOT_LEVEL_DELIMITER,

    BOOLEAN,
    INTEGER,
    STRING,
    ERROR_STRING,
    UNDEFINED_VALUE,
    UNKNOWN_SYMBOL,
    MISSING_VALUE,
    LIST,
    MAP,

    CURLY_OPEN,
    CURLY_CLOSE,
    BRACKET_OPEN,
    BRACKET_CLOSE,
    COLON,
    COMMA,
}

impl SyntaxKind {
    pub fn is_background(self) -> bool {
        matches!(
            self,
            SyntaxKind::WHITESPACE
                | SyntaxKind::COMMENT
                | SyntaxKind::UNTERMINATED_COMMENT
                | SyntaxKind::ROOT_LEVEL_DELIMITER
        )
    }

    pub fn is_value(self) -> bool {
        matches!(
            self,
            SyntaxKind::BOOLEAN
                | SyntaxKind::INTEGER
                | SyntaxKind::STRING
                | SyntaxKind::ERROR_STRING
                | SyntaxKind::UNDEFINED_VALUE
                | SyntaxKind::UNKNOWN_SYMBOL
                | SyntaxKind::MISSING_VALUE
                | SyntaxKind::LIST
                | SyntaxKind::MAP
        )
    }

    pub fn is_punctuation(self) -> bool {
        matches!(
            self,
            SyntaxKind::CURLY_OPEN
                | SyntaxKind::CURLY_CLOSE
                | SyntaxKind::BRACKET_OPEN
                | SyntaxKind::BRACKET_CLOSE
                | SyntaxKind::COLON
                | SyntaxKind::COMMA
        )
    }
}
