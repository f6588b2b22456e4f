use text_size::TextRange;
use verdant_errors::Diagnostic;
use verdant_tokenizer::{Symbol, Tokenizer};
use verdant_yellow::SymbolType;
use verdant_yellow::green::{GreenBackground, GreenBackgroundList};

/// Nesting went past the configured limit. Unwinds the whole parse.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct TooDeep {
    /// The symbol that opened the section that was one level too deep.
    pub(crate) range: TextRange,
}

pub(crate) struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    previous_range: TextRange,
    background: Vec<GreenBackground>,
    diagnostics: Vec<Diagnostic>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(text: &'a str, max_depth: usize) -> Self {
        let mut parser = Self {
            tokenizer: Tokenizer::new(text),
            previous_range: TextRange::default(),
            background: Vec::new(),
            diagnostics: Vec::new(),
            depth: 0,
            max_depth,
        };
        parser.skip_background();
        parser
    }

    /// The current foreground symbol. Never background.
    #[inline]
    pub(crate) fn current(&self) -> &Symbol {
        self.tokenizer.peek()
    }

    #[inline]
    pub(crate) fn current_type(&self) -> SymbolType {
        self.current().symbol_type()
    }

    #[inline]
    pub(crate) fn current_range(&self) -> TextRange {
        self.current().range
    }

    /// Range of the last foreground symbol consumed.
    #[inline]
    pub(crate) fn previous_range(&self) -> TextRange {
        self.previous_range
    }

    /// Consumes the current symbol and any background after it.
    pub(crate) fn shift(&mut self) -> Symbol {
        let symbol = self.tokenizer.next_symbol();
        self.previous_range = symbol.range;
        self.skip_background();
        symbol
    }

    fn skip_background(&mut self) {
        while let Some(background) = self.tokenizer.peek().green.to_background() {
            self.tokenizer.next_symbol();
            self.background.push(background);
        }
    }

    pub(crate) fn push_background(&mut self, background: GreenBackground) {
        self.background.push(background);
    }

    /// Takes the background collected since the last call.
    pub(crate) fn take_background(&mut self) -> GreenBackgroundList {
        if self.background.is_empty() {
            return GreenBackgroundList::empty();
        }
        GreenBackgroundList::new(self.background.drain(..))
    }

    pub(crate) fn error(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Enters a value section one level deeper.
    pub(crate) fn enter(&mut self) -> Result<(), TooDeep> {
        if self.depth > self.max_depth {
            return Err(TooDeep { range: self.previous_range });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit(&mut self) {
        self.depth -= 1;
    }

    /// Lexical and grammatical diagnostics, stably sorted by start.
    pub(crate) fn finish(mut self) -> Vec<Diagnostic> {
        let mut diagnostics = self.tokenizer.take_diagnostics();
        diagnostics.extend(self.diagnostics);
        diagnostics.sort_by_key(Diagnostic::start);
        diagnostics
    }
}
