use text_size::TextSize;
use verdant_span::HasTextLen;

const QUOTES_LEN: TextSize = TextSize::new(2);
const SIMPLE_ESCAPE_LEN: TextSize = TextSize::new(2);
const UNICODE_ESCAPE_LEN: TextSize = TextSize::new(6);

/// Piece of a well-formed string literal between its quotes.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum StringSegment {
    /// Characters taken verbatim.
    Raw(Box<str>),
    /// Two-character escape such as `\n`, holding the decoded character.
    SimpleEscape(char),
    /// `\uXXXX`, holding the UTF-16 code unit it denotes.
    UnicodeEscape(u16),
}

impl StringSegment {
    /// Appends this segment's decoded UTF-16 code units to `units`.
    pub fn append_to(&self, units: &mut Vec<u16>) {
        match self {
            StringSegment::Raw(text) => units.extend(text.encode_utf16()),
            StringSegment::SimpleEscape(c) => {
                let mut buf = [0; 2];
                units.extend_from_slice(c.encode_utf16(&mut buf));
            }
            StringSegment::UnicodeEscape(unit) => units.push(*unit),
        }
    }
}

impl HasTextLen for StringSegment {
    fn text_len(&self) -> TextSize {
        match self {
            StringSegment::Raw(text) => TextSize::of(&**text),
            StringSegment::SimpleEscape(_) => SIMPLE_ESCAPE_LEN,
            StringSegment::UnicodeEscape(_) => UNICODE_ESCAPE_LEN,
        }
    }
}

/// Well-formed string literal, quotes included.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GreenStringLiteral {
    value: Box<str>,
    segments: Box<[StringSegment]>,
    text_len: TextSize,
}

impl GreenStringLiteral {
    /// Decodes the literal from its segments.
    ///
    /// Adjacent `\u` escapes forming a surrogate pair combine into one
    /// character; unpaired surrogates decode to U+FFFD.
    pub fn new(segments: impl Into<Box<[StringSegment]>>) -> Self {
        let segments = segments.into();
        let mut units = Vec::new();
        let mut text_len = QUOTES_LEN;
        for segment in &segments {
            segment.append_to(&mut units);
            text_len += segment.text_len();
        }
        let value = String::from_utf16_lossy(&units).into_boxed_str();
        Self { value, segments, text_len }
    }

    /// The decoded value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn segments(&self) -> &[StringSegment] {
        &self.segments
    }
}

impl HasTextLen for GreenStringLiteral {
    #[inline]
    fn text_len(&self) -> TextSize {
        self.text_len
    }
}
