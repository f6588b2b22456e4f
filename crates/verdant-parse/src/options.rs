pub const DEFAULT_MAX_DEPTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseOptionsError {
    #[error("maximum nesting depth must be at least 1")]
    ZeroMaxDepth,
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    max_depth: usize,
}

impl ParseOptions {
    pub const fn new(max_depth: usize) -> Result<Self, ParseOptionsError> {
        if max_depth == 0 {
            return Err(ParseOptionsError::ZeroMaxDepth);
        }
        Ok(Self { max_depth })
    }

    /// How many lists and maps may nest inside each other.
    ///
    /// Exactly `max_depth` nested lists or maps are accepted: with the
    /// default of 40, forty nested `[` parse and the forty-first aborts.
    /// Top-level scalars are always accepted, even with a limit of 1.
    /// Deeper input is replaced by a single-node tree and a
    /// [`ParseTreeTooDeep`](verdant_errors::ErrorCode::ParseTreeTooDeep)
    /// diagnostic.
    #[inline]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}
