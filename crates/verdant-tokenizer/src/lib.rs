//! Tokenizer turning source text into green terminal symbols.
//!
//! Lexical problems never stop the tokenizer: they are recorded as
//! diagnostics and the offending text is still covered by some symbol, so
//! the symbols of a text always tile it exactly.

mod classes;
mod cursor;

use std::mem;

use classes::{CharClass, classify, is_illegal_in_string};
use cursor::Cursor;
use num_bigint::BigInt;
use text_size::{TextRange, TextSize};
use triomphe::Arc;
use verdant_errors::Diagnostic;
use verdant_yellow::SymbolType;
use verdant_yellow::green::{
    GreenInteger, GreenStringLiteral, GreenSymbol, GreenUndefinedValue, Punctuation,
    StringSegment,
};

/// A terminal symbol with its absolute range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub green: GreenSymbol,
    pub range: TextRange,
}

impl Symbol {
    const EOF: Self = Self { green: GreenSymbol::Eof, range: TextRange::empty(TextSize::new(0)) };

    #[inline]
    pub fn symbol_type(&self) -> SymbolType {
        self.green.symbol_type()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    Start,
    Whitespace,
    Value,
    String { raw_start: TextSize, failed: bool },
    SingleLineComment,
    MultiLineComment,
}

pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    current: Symbol,
    segments: Vec<StringSegment>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut tokenizer = Self {
            text,
            cursor: Cursor::new(text),
            current: Symbol::EOF,
            segments: Vec::new(),
            diagnostics: Vec::new(),
        };
        tokenizer.next_symbol();
        tokenizer
    }

    /// The symbol the next call to [`Tokenizer::next_symbol`] returns.
    #[inline]
    pub fn peek(&self) -> &Symbol {
        &self.current
    }

    /// Returns the current symbol and scans the one after it. Once the end
    /// is reached, keeps returning the end-of-file symbol.
    pub fn next_symbol(&mut self) -> Symbol {
        self.cursor.reset_pos_within_token();
        let green = self.scan();
        let range = self.range();
        mem::replace(&mut self.current, Symbol { green, range })
    }

    /// Byte offset of the next unscanned character.
    #[inline]
    pub fn offset(&self) -> TextSize {
        TextSize::new(self.text.len() as u32) - self.cursor.len()
    }

    /// Lexical diagnostics reported so far, in the order they were found.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        mem::take(&mut self.diagnostics)
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        TextRange::new(end - self.cursor.pos_within_token(), end)
    }

    fn text(&self) -> &'a str {
        &self.text[self.range()]
    }

    fn scan(&mut self) -> GreenSymbol {
        let mut mode = Mode::Start;
        loop {
            mode = match mode {
                Mode::Start => {
                    if self.cursor.is_eof() {
                        return GreenSymbol::Eof;
                    }
                    match self.cursor.advance() {
                        '"' => {
                            self.segments.clear();
                            Mode::String { raw_start: self.offset(), failed: false }
                        }
                        '/' if self.cursor.peek() == '/' => {
                            self.cursor.advance();
                            Mode::SingleLineComment
                        }
                        '/' if self.cursor.peek() == '*' => {
                            self.cursor.advance();
                            Mode::MultiLineComment
                        }
                        c => match classify(c) {
                            CharClass::Whitespace => Mode::Whitespace,
                            CharClass::Value => Mode::Value,
                            CharClass::Symbol => return self.symbol(c),
                        },
                    }
                }
                Mode::Whitespace => {
                    self.cursor.advance_while(|c| classify(c) == CharClass::Whitespace);
                    return GreenSymbol::Whitespace(self.cursor.pos_within_token());
                }
                Mode::Value => {
                    self.cursor.advance_while(|c| classify(c) == CharClass::Value);
                    return self.value();
                }
                Mode::String { raw_start, failed } => {
                    if self.cursor.is_eof() {
                        self.diagnostics.push(Diagnostic::unterminated_string(self.range()));
                        return GreenSymbol::ErrorString(self.cursor.pos_within_token());
                    }
                    let offset = self.offset();
                    match self.cursor.peek() {
                        '"' => {
                            self.push_raw(raw_start, offset);
                            self.cursor.advance();
                            return self.string(failed);
                        }
                        '\\' => {
                            self.push_raw(raw_start, offset);
                            self.cursor.advance();
                            let recognized = self.escape(offset);
                            Mode::String { raw_start: self.offset(), failed: failed || !recognized }
                        }
                        c if is_illegal_in_string(c) => {
                            self.push_raw(raw_start, offset);
                            self.cursor.advance();
                            self.diagnostics
                                .push(Diagnostic::illegal_control_character_in_string(c, offset));
                            Mode::String { raw_start: self.offset(), failed: true }
                        }
                        _ => {
                            self.cursor.advance();
                            mode
                        }
                    }
                }
                Mode::SingleLineComment => match self.cursor.peek() {
                    _ if self.cursor.is_eof() => return self.comment(),
                    '\n' => return self.comment(),
                    '\r' if self.cursor.second() == '\n' => return self.comment(),
                    _ => {
                        self.cursor.advance();
                        mode
                    }
                },
                Mode::MultiLineComment => {
                    if self.cursor.is_eof() {
                        let range = self.range();
                        self.diagnostics.push(Diagnostic::unterminated_multi_line_comment(range));
                        return GreenSymbol::UnterminatedComment(range.len());
                    }
                    if self.cursor.advance() == '*' && self.cursor.peek() == '/' {
                        self.cursor.advance();
                        return self.comment();
                    }
                    mode
                }
            };
        }
    }

    fn symbol(&mut self, c: char) -> GreenSymbol {
        match Punctuation::from_char(c) {
            Some(punctuation) => GreenSymbol::Punctuation(punctuation),
            None => {
                self.diagnostics.push(Diagnostic::unexpected_symbol(c, self.range().start()));
                GreenSymbol::UnknownSymbol(c)
            }
        }
    }

    fn comment(&self) -> GreenSymbol {
        GreenSymbol::Comment(self.cursor.pos_within_token())
    }

    fn value(&mut self) -> GreenSymbol {
        let text = self.text();
        match text {
            "true" => GreenSymbol::Boolean(true),
            "false" => GreenSymbol::Boolean(false),
            _ => match parse_integer(text) {
                Some(value) => {
                    GreenSymbol::Integer(Arc::new(GreenInteger::new(value, TextSize::of(text))))
                }
                None => {
                    let start = self.range().start();
                    self.diagnostics.push(Diagnostic::unrecognized_value(text, start));
                    GreenSymbol::Undefined(Arc::new(GreenUndefinedValue::new(text)))
                }
            },
        }
    }

    fn string(&mut self, failed: bool) -> GreenSymbol {
        let segments = mem::take(&mut self.segments);
        if failed {
            return GreenSymbol::ErrorString(self.cursor.pos_within_token());
        }
        GreenSymbol::String(Arc::new(GreenStringLiteral::new(segments)))
    }

    fn push_raw(&mut self, start: TextSize, end: TextSize) {
        if start < end {
            let raw = &self.text[TextRange::new(start, end)];
            self.segments.push(StringSegment::Raw(raw.into()));
        }
    }

    /// Scans an escape sequence whose backslash, at `start`, was just
    /// consumed. Returns `false` if the sequence was reported as invalid.
    fn escape(&mut self, start: TextSize) -> bool {
        if self.cursor.is_eof() {
            return true;
        }

        let c = self.cursor.peek();
        if let Some(decoded) = simple_escape(c) {
            self.cursor.advance();
            self.segments.push(StringSegment::SimpleEscape(decoded));
            return true;
        }

        if c == 'u' {
            self.cursor.advance();
            let mut unit = 0;
            let mut digits = 0;
            while digits < 4 && !self.cursor.is_eof() {
                let Some(digit) = self.cursor.peek().to_digit(16) else { break };
                self.cursor.advance();
                unit = unit * 16 + digit;
                digits += 1;
            }
            if digits == 4 {
                self.segments.push(StringSegment::UnicodeEscape(unit as u16));
                return true;
            }
        } else if !is_illegal_in_string(c) {
            self.cursor.advance();
        }

        let escape = &self.text[TextRange::new(start, self.offset())];
        self.diagnostics.push(Diagnostic::unrecognized_escape_sequence(escape, start));
        false
    }
}

fn simple_escape(c: char) -> Option<char> {
    Some(match c {
        '"' => '"',
        '\\' => '\\',
        '/' => '/',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{b}',
        _ => return None,
    })
}

/// An optional `-` followed by one or more ASCII digits.
fn parse_integer(text: &str) -> Option<BigInt> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigInt::parse_bytes(text.as_bytes(), 10)
}

/// Tokenizes all of `text`, the final end-of-file symbol included.
pub fn tokenize(text: &str) -> (Vec<Symbol>, Vec<Diagnostic>) {
    let mut tokenizer = Tokenizer::new(text);
    let mut symbols = Vec::new();
    loop {
        let symbol = tokenizer.next_symbol();
        let done = symbol.symbol_type() == SymbolType::Eof;
        symbols.push(symbol);
        if done {
            break;
        }
    }
    (symbols, tokenizer.take_diagnostics())
}
