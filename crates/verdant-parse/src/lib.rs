//! Error-tolerant parser for JSON-like settings documents.
//!
//! Parsing never fails: malformed input produces a complete tree plus
//! diagnostics. The only whole-parse fallback is for input nested deeper
//! than [`ParseOptions::max_depth`].

use verdant_errors::{Diagnostic, ErrorCode, Severity};
use verdant_yellow::green::{GreenBackground, GreenBackgroundList, GreenMultiValue};
use verdant_yellow::{SyntaxTree, TextSize};

mod grammar;
mod options;
mod parser;
#[cfg(test)]
mod tests;

pub use options::{DEFAULT_MAX_DEPTH, ParseOptions, ParseOptionsError};

/// Parses `text` with the default options.
pub fn parse(text: &str) -> SyntaxTree {
    parse_with_options(text, &ParseOptions::default())
}

/// Parses `text`, allowing at most `max_depth` levels of nested lists and
/// maps.
///
/// # Panics
///
/// Panics if `max_depth` is zero.
pub fn parse_with_max_depth(text: &str, max_depth: usize) -> SyntaxTree {
    match ParseOptions::new(max_depth) {
        Ok(options) => parse_with_options(text, &options),
        Err(err) => panic!("{err}"),
    }
}

pub fn parse_with_options(text: &str, options: &ParseOptions) -> SyntaxTree {
    let _span = tracing::debug_span!("parse", len = text.len(), max_depth = options.max_depth())
        .entered();

    let mut parser = parser::Parser::new(text, options.max_depth());
    let (root, diagnostics) = match grammar::root(&mut parser) {
        Ok(root) => (root, parser.finish()),
        Err(parser::TooDeep { range }) => {
            tracing::debug!(?range, "nesting limit exceeded, discarding the tree");
            let diagnostic = Diagnostic::new(ErrorCode::ParseTreeTooDeep, range);
            (fallback_root(text), vec![diagnostic])
        }
    };

    tracing::debug!(
        diagnostics = diagnostics.len(),
        errors = diagnostics.iter().filter(|d| d.severity() == Severity::Error).count(),
        "parsed"
    );
    SyntaxTree::new(text, root, diagnostics)
}

/// The whole input as background in front of a missing value.
fn fallback_root(text: &str) -> GreenMultiValue {
    let whitespace = GreenBackground::Whitespace(TextSize::of(text));
    GreenMultiValue::missing(GreenBackgroundList::new([whitespace]))
}
