//! Recursive descent over value sections.
//!
//! Every production consumes at least one symbol or ends at a value
//! delimiter, and every delimiter is either consumed by the enclosing
//! container or reported, so parsing always reaches the end of input.

use text_size::TextRange;
use triomphe::Arc;
use verdant_errors::{Diagnostic, ErrorCode};
use verdant_yellow::green::{
    GreenBackground, GreenKeyValue, GreenList, GreenMap, GreenMultiValue, GreenValue,
    GreenValueWithBackground, Punctuation,
};
use verdant_yellow::{HasTextLen, SymbolType};

use crate::parser::{Parser, TooDeep};

pub(crate) fn root(p: &mut Parser<'_>) -> Result<GreenMultiValue, TooDeep> {
    p.enter()?;
    let mut values = Vec::new();
    values_until_delimiter(p, &mut values, ErrorCode::ExpectedEof)?;

    while p.current_type() != SymbolType::Eof {
        let range = p.current_range();
        if let Some(punctuation) = p.current().green.punctuation() {
            let diagnostic = Diagnostic::new(ErrorCode::ExpectedEof, range);
            p.error(diagnostic.with_parameter(punctuation.as_char()));
            p.push_background(GreenBackground::RootLevelDelimiter(punctuation));
        }
        p.shift();
        values_until_delimiter(p, &mut values, ErrorCode::ExpectedEof)?;
    }

    p.exit();
    Ok(finish_multi_value(p, values))
}

/// One value slot. Values after the first are reported with `extra`.
fn multi_value(p: &mut Parser<'_>, extra: ErrorCode) -> Result<GreenMultiValue, TooDeep> {
    p.enter()?;
    let mut values = Vec::new();
    values_until_delimiter(p, &mut values, extra)?;
    p.exit();
    Ok(finish_multi_value(p, values))
}

fn finish_multi_value(
    p: &mut Parser<'_>,
    values: Vec<GreenValueWithBackground>,
) -> GreenMultiValue {
    if values.is_empty() {
        return GreenMultiValue::missing(p.take_background());
    }
    GreenMultiValue::new(values, p.take_background())
}

fn values_until_delimiter(
    p: &mut Parser<'_>,
    values: &mut Vec<GreenValueWithBackground>,
    extra: ErrorCode,
) -> Result<(), TooDeep> {
    while !p.current_type().is_value_delimiter() {
        let background = p.take_background();
        let start = p.current_range().start();
        let value = value(p)?;
        if !values.is_empty() {
            p.error(Diagnostic::new(extra, TextRange::at(start, value.text_len())));
        }
        values.push(GreenValueWithBackground::new(background, value));
    }
    Ok(())
}

fn value(p: &mut Parser<'_>) -> Result<GreenValue, TooDeep> {
    if let Some(value) = p.current().green.to_value() {
        p.shift();
        return Ok(value);
    }
    match p.current().green.punctuation() {
        Some(Punctuation::CurlyOpen) => Ok(GreenValue::Map(Arc::new(map(p)?))),
        Some(Punctuation::BracketOpen) => Ok(GreenValue::List(Arc::new(list(p)?))),
        _ => unreachable!("{:?} does not start a value", p.current_type()),
    }
}

fn list(p: &mut Parser<'_>) -> Result<GreenList, TooDeep> {
    p.shift();
    let mut items = Vec::new();
    loop {
        let item = multi_value(p, ErrorCode::MultipleValues)?;
        let missing = item.first().value().is_missing();
        items.push(item);

        let range = p.current_range();
        match p.current().green.punctuation() {
            Some(Punctuation::Comma) => {
                if missing {
                    p.error(Diagnostic::new(ErrorCode::MissingValue, range));
                }
                p.shift();
            }
            Some(Punctuation::BracketClose) => {
                p.shift();
                return Ok(GreenList::new(items, false));
            }
            Some(punctuation) => {
                p.error(
                    Diagnostic::new(ErrorCode::ControlSymbolInArray, range)
                        .with_parameter(punctuation.as_char()),
                );
                return Ok(GreenList::new(items, true));
            }
            None => {
                p.error(Diagnostic::new(ErrorCode::UnexpectedEofInArray, range));
                return Ok(GreenList::new(items, true));
            }
        }
    }
}

fn map(p: &mut Parser<'_>) -> Result<GreenMap, TooDeep> {
    p.shift();
    let mut key_values = Vec::new();
    loop {
        let key_start = p.previous_range().end();
        let key = multi_value(p, ErrorCode::MultiplePropertyKeys)?;
        let first = key.first();
        let got_key = !first.value().is_missing();
        if got_key && first.value().as_string_literal().is_none() {
            let start = key_start + first.background().text_len();
            let range = TextRange::at(start, first.value().text_len());
            p.error(Diagnostic::new(ErrorCode::InvalidPropertyKey, range));
        }

        let mut sections = vec![key];
        let mut got_value = false;
        while p.current().green.punctuation() == Some(Punctuation::Colon) {
            if sections.len() > 1 {
                let range = p.current_range();
                p.error(Diagnostic::new(ErrorCode::MultiplePropertyKeySections, range));
            }
            p.shift();
            let section = multi_value(p, ErrorCode::MultipleValues)?;
            got_value |= !section.first().value().is_missing();
            sections.push(section);
        }
        let got_colon = sections.len() > 1;
        key_values.push(GreenKeyValue::new(sections));

        let range = p.current_range();
        let punctuation = p.current().green.punctuation();
        let closes_member = match punctuation {
            Some(Punctuation::Comma) => true,
            Some(Punctuation::CurlyClose) => got_key || got_colon,
            _ => false,
        };
        if closes_member {
            if !got_key {
                p.error(Diagnostic::new(ErrorCode::MissingPropertyKey, range));
            }
            if !got_value {
                p.error(Diagnostic::new(ErrorCode::MissingValue, range));
            }
        }

        match punctuation {
            Some(Punctuation::Comma) => {
                p.shift();
            }
            Some(Punctuation::CurlyClose) => {
                p.shift();
                return Ok(GreenMap::new(key_values, false));
            }
            Some(punctuation) => {
                p.error(
                    Diagnostic::new(ErrorCode::ControlSymbolInObject, range)
                        .with_parameter(punctuation.as_char()),
                );
                return Ok(GreenMap::new(key_values, true));
            }
            None => {
                p.error(Diagnostic::new(ErrorCode::UnexpectedEofInObject, range));
                return Ok(GreenMap::new(key_values, true));
            }
        }
    }
}
