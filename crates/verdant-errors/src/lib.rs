//! Diagnostics reported while tokenizing and parsing.
//!
//! Every anomaly in the input becomes a [`Diagnostic`]: an [`ErrorCode`], a
//! [`Severity`], an absolute [`TextRange`] and zero or more typed
//! [`ErrorParameter`]s. Diagnostics are plain data; nothing here aborts.

use std::fmt;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::{TextRange, TextSize};

/// Closed set of everything the tokenizer and parser can complain about.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorCode {
    // Lexical.
    UnexpectedSymbol,
    UnterminatedMultiLineComment,
    UnterminatedString,
    UnrecognizedEscapeSequence,
    IllegalControlCharacterInString,
    UnrecognizedValue,

    // Grammatical.
    ExpectedEof,
    ControlSymbolInObject,
    UnexpectedEofInObject,
    InvalidPropertyKey,
    MissingPropertyKey,
    MissingValue,
    MultiplePropertyKeySections,
    MultiplePropertyKeys,
    MultipleValues,
    ControlSymbolInArray,
    UnexpectedEofInArray,
    ParseTreeTooDeep,
}

impl ErrorCode {
    pub const fn default_severity(self) -> Severity {
        match self {
            ErrorCode::UnterminatedMultiLineComment => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Whether the tokenizer (as opposed to the parser) reports this code.
    pub const fn is_lexical(self) -> bool {
        matches!(
            self,
            ErrorCode::UnexpectedSymbol
                | ErrorCode::UnterminatedMultiLineComment
                | ErrorCode::UnterminatedString
                | ErrorCode::UnrecognizedEscapeSequence
                | ErrorCode::IllegalControlCharacterInString
                | ErrorCode::UnrecognizedValue
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Severity {
    Message,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Message => "message",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// The offending piece of input a diagnostic refers to.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ErrorParameter {
    Char(char),
    Text(Box<str>),
}

impl From<char> for ErrorParameter {
    fn from(value: char) -> Self {
        ErrorParameter::Char(value)
    }
}

impl From<&str> for ErrorParameter {
    fn from(value: &str) -> Self {
        ErrorParameter::Text(value.into())
    }
}

impl fmt::Display for ErrorParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorParameter::Char(c) => write!(f, "{}", c.escape_debug()),
            ErrorParameter::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Diagnostic {
    code: ErrorCode,
    severity: Severity,
    range: TextRange,
    parameters: Box<[ErrorParameter]>,
}

impl Diagnostic {
    /// Creates a diagnostic with the code's default severity and no parameters.
    pub fn new(code: ErrorCode, range: TextRange) -> Self {
        Self { code, severity: code.default_severity(), range, parameters: Box::default() }
    }

    pub fn with_parameter(self, parameter: impl Into<ErrorParameter>) -> Self {
        let mut parameters = self.parameters.into_vec();
        parameters.push(parameter.into());
        Self { parameters: parameters.into_boxed_slice(), ..self }
    }

    pub fn unexpected_symbol(symbol: char, start: TextSize) -> Self {
        Self::new(ErrorCode::UnexpectedSymbol, char_range(symbol, start)).with_parameter(symbol)
    }

    pub fn unterminated_multi_line_comment(range: TextRange) -> Self {
        Self::new(ErrorCode::UnterminatedMultiLineComment, range)
    }

    pub fn unterminated_string(range: TextRange) -> Self {
        Self::new(ErrorCode::UnterminatedString, range)
    }

    pub fn unrecognized_escape_sequence(escape: &str, start: TextSize) -> Self {
        Self::new(ErrorCode::UnrecognizedEscapeSequence, text_range(escape, start))
            .with_parameter(escape)
    }

    pub fn illegal_control_character_in_string(symbol: char, start: TextSize) -> Self {
        Self::new(ErrorCode::IllegalControlCharacterInString, char_range(symbol, start))
            .with_parameter(symbol)
    }

    pub fn unrecognized_value(value: &str, start: TextSize) -> Self {
        Self::new(ErrorCode::UnrecognizedValue, text_range(value, start)).with_parameter(value)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn start(&self) -> TextSize {
        self.range.start()
    }

    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn parameters(&self) -> &[ErrorParameter] {
        &self.parameters
    }

    /// Human-readable description, with parameters substituted.
    pub fn message(&self) -> String {
        let parameter = self.parameters.first().map(ToString::to_string).unwrap_or_default();

        match self.code {
            ErrorCode::UnexpectedSymbol => format!("unexpected symbol '{parameter}'"),
            ErrorCode::UnterminatedMultiLineComment => "unterminated multi-line comment".into(),
            ErrorCode::UnterminatedString => "unterminated string".into(),
            ErrorCode::UnrecognizedEscapeSequence => {
                format!("unrecognized escape sequence '{parameter}'")
            }
            ErrorCode::IllegalControlCharacterInString => {
                format!("illegal control character '{parameter}' in string")
            }
            ErrorCode::UnrecognizedValue => format!("unrecognized value '{parameter}'"),
            ErrorCode::ExpectedEof if self.parameters.is_empty() => "expected end of input".into(),
            ErrorCode::ExpectedEof => format!("unexpected '{parameter}', expected end of input"),
            ErrorCode::ControlSymbolInObject => {
                format!("'{parameter}' is not allowed in an object, expected ',' or '}}'")
            }
            ErrorCode::UnexpectedEofInObject => "unexpected end of input, expected '}'".into(),
            ErrorCode::InvalidPropertyKey => "property keys must be strings".into(),
            ErrorCode::MissingPropertyKey => "missing property key".into(),
            ErrorCode::MissingValue => "missing value".into(),
            ErrorCode::MultiplePropertyKeySections => "unexpected ':', expected ',' or '}'".into(),
            ErrorCode::MultiplePropertyKeys => "unexpected property key, expected ':'".into(),
            ErrorCode::MultipleValues => "unexpected value, expected ','".into(),
            ErrorCode::ControlSymbolInArray => {
                format!("'{parameter}' is not allowed in an array, expected ',' or ']'")
            }
            ErrorCode::UnexpectedEofInArray => "unexpected end of input, expected ']'".into(),
            ErrorCode::ParseTreeTooDeep => "input is nested too deeply".into(),
        }
    }

    pub fn render(&self, renderer: &Renderer, path: &str, text: &str) -> String {
        let level = match self.severity {
            Severity::Error => Level::Error,
            Severity::Warning => Level::Warning,
            Severity::Message => Level::Info,
        };
        let title = self.message();
        let message = level.title(&title).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(level.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message).to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}: {}", self.severity, self.range, self.message())
    }
}

fn char_range(symbol: char, start: TextSize) -> TextRange {
    TextRange::at(start, TextSize::of(symbol))
}

fn text_range(text: &str, start: TextSize) -> TextRange {
    TextRange::at(start, TextSize::of(text))
}
