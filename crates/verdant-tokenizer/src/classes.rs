//! Character classes driving run segmentation.
//!
//! Classes follow the Unicode general category: letters, marks, numbers,
//! connector and dash punctuation form values; separators, controls, format
//! characters, private use, surrogates and unassigned code points are
//! whitespace; everything else is a symbol.

use unicode_general_category::{GeneralCategory, get_general_category};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CharClass {
    Whitespace,
    Value,
    Symbol,
}

pub(crate) fn classify(c: char) -> CharClass {
    if c.is_ascii() {
        return match c {
            '\0'..=' ' | '\x7f' => CharClass::Whitespace,
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' | '.' | '+' => CharClass::Value,
            _ => CharClass::Symbol,
        };
    }

    use GeneralCategory::*;
    match get_general_category(c) {
        UppercaseLetter | LowercaseLetter | TitlecaseLetter | ModifierLetter | OtherLetter
        | NonspacingMark | SpacingMark | EnclosingMark | DecimalNumber | LetterNumber
        | OtherNumber | ConnectorPunctuation | DashPunctuation => CharClass::Value,
        SpaceSeparator | LineSeparator | ParagraphSeparator | Control | Format | PrivateUse
        | Surrogate | Unassigned => CharClass::Whitespace,
        _ => CharClass::Symbol,
    }
}

/// Characters that may not appear unescaped inside a string literal.
pub(crate) fn is_illegal_in_string(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}')
}
