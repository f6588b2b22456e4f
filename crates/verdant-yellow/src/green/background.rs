use text_size::TextSize;
use verdant_span::{HasTextLen, SINGLE_CHAR_LEN, SpanList};

use crate::{SymbolType, SyntaxKind};

/// Single-character structural symbol.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Punctuation {
    CurlyOpen,
    CurlyClose,
    BracketOpen,
    BracketClose,
    Colon,
    Comma,
}

impl Punctuation {
    pub const fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '{' => Punctuation::CurlyOpen,
            '}' => Punctuation::CurlyClose,
            '[' => Punctuation::BracketOpen,
            ']' => Punctuation::BracketClose,
            ':' => Punctuation::Colon,
            ',' => Punctuation::Comma,
            _ => return None,
        })
    }

    pub const fn as_char(self) -> char {
        match self {
            Punctuation::CurlyOpen => '{',
            Punctuation::CurlyClose => '}',
            Punctuation::BracketOpen => '[',
            Punctuation::BracketClose => ']',
            Punctuation::Colon => ':',
            Punctuation::Comma => ',',
        }
    }

    pub const fn kind(self) -> SyntaxKind {
        match self {
            Punctuation::CurlyOpen => SyntaxKind::CURLY_OPEN,
            Punctuation::CurlyClose => SyntaxKind::CURLY_CLOSE,
            Punctuation::BracketOpen => SyntaxKind::BRACKET_OPEN,
            Punctuation::BracketClose => SyntaxKind::BRACKET_CLOSE,
            Punctuation::Colon => SyntaxKind::COLON,
            Punctuation::Comma => SyntaxKind::COMMA,
        }
    }

    pub const fn symbol_type(self) -> SymbolType {
        match self {
            Punctuation::CurlyOpen => SymbolType::CurlyOpen,
            Punctuation::CurlyClose => SymbolType::CurlyClose,
            Punctuation::BracketOpen => SymbolType::BracketOpen,
            Punctuation::BracketClose => SymbolType::BracketClose,
            Punctuation::Colon => SymbolType::Colon,
            Punctuation::Comma => SymbolType::Comma,
        }
    }
}

impl HasTextLen for Punctuation {
    fn text_len(&self) -> TextSize {
        SINGLE_CHAR_LEN
    }
}

/// Text with no meaning to the value structure.
///
/// A structural symbol that appears after a complete root value cannot be
/// attached anywhere else, so it is kept as background too.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GreenBackground {
    Whitespace(TextSize),
    Comment(TextSize),
    UnterminatedComment(TextSize),
    RootLevelDelimiter(Punctuation),
}

impl GreenBackground {
    pub const fn kind(self) -> SyntaxKind {
        match self {
            GreenBackground::Whitespace(_) => SyntaxKind::WHITESPACE,
            GreenBackground::Comment(_) => SyntaxKind::COMMENT,
            GreenBackground::UnterminatedComment(_) => SyntaxKind::UNTERMINATED_COMMENT,
            GreenBackground::RootLevelDelimiter(_) => SyntaxKind::ROOT_LEVEL_DELIMITER,
        }
    }
}

impl HasTextLen for GreenBackground {
    fn text_len(&self) -> TextSize {
        match *self {
            GreenBackground::Whitespace(len)
            | GreenBackground::Comment(len)
            | GreenBackground::UnterminatedComment(len) => len,
            GreenBackground::RootLevelDelimiter(punctuation) => punctuation.text_len(),
        }
    }
}

/// Run of background symbols, usually empty.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GreenBackgroundList {
    nodes: SpanList<GreenBackground>,
}

impl GreenBackgroundList {
    pub const fn empty() -> Self {
        Self { nodes: SpanList::empty() }
    }

    pub fn new(nodes: impl IntoIterator<Item = GreenBackground>) -> Self {
        Self { nodes: SpanList::new(nodes) }
    }

    #[inline]
    pub fn nodes(&self) -> &SpanList<GreenBackground> {
        &self.nodes
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl HasTextLen for GreenBackgroundList {
    fn text_len(&self) -> TextSize {
        self.nodes.text_len()
    }
}
