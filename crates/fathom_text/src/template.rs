//! Bracket template scanning.
//!
//! `write` templates are plain text with two escapes:
//!
//! - `[cmd arg arg ...]` invokes a sink command with the given
//!   arguments; single-quoted arguments may contain spaces, as in
//!   `[the 'red apple']`.
//! - `{word|flag|flag}` is sugar for `[reword word flag flag]`.
//!
//! This module only scans templates into segments; executing the
//! commands against a world and sink happens upstream.

use fathom_foundation::{Error, Result};

/// One piece of a scanned template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, emitted verbatim.
    Literal(String),
    /// A sink command with its arguments.
    Command {
        /// The command name (first word inside the brackets).
        name: String,
        /// Remaining arguments, unquoted.
        args: Vec<String>,
    },
}

impl Segment {
    fn command(name: impl Into<String>, args: Vec<String>) -> Self {
        Self::Command {
            name: name.into(),
            args,
        }
    }
}

/// Scans a template into segments, left to right.
///
/// # Errors
///
/// Returns an internal error for an unterminated `[`, `{`, or quote.
pub fn scan(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '[' => {
                flush(&mut segments, &mut literal);
                let body = take_until(&mut chars, ']')
                    .ok_or_else(|| Error::internal(format!("unterminated [ in {template:?}")))?;
                let mut words = split_args(&body)?;
                if words.is_empty() {
                    return Err(Error::internal(format!("empty command in {template:?}")));
                }
                let name = words.remove(0);
                segments.push(Segment::command(name, words));
            }
            '{' => {
                flush(&mut segments, &mut literal);
                let body = take_until(&mut chars, '}')
                    .ok_or_else(|| Error::internal(format!("unterminated {{ in {template:?}")))?;
                let mut parts = body.split('|').map(str::to_string);
                let word = parts
                    .next()
                    .filter(|w| !w.is_empty())
                    .ok_or_else(|| Error::internal(format!("empty reword in {template:?}")))?;
                let mut args = vec![word];
                args.extend(parts);
                segments.push(Segment::command("reword", args));
            }
            _ => literal.push(ch),
        }
    }

    flush(&mut segments, &mut literal);
    Ok(segments)
}

fn flush(segments: &mut Vec<Segment>, literal: &mut String) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

fn take_until(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, end: char) -> Option<String> {
    let mut body = String::new();
    for ch in chars.by_ref() {
        if ch == end {
            return Some(body);
        }
        body.push(ch);
    }
    None
}

/// Splits a command body on whitespace, honoring single quotes.
fn split_args(body: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '\'' {
                        closed = true;
                        break;
                    }
                    current.push(c);
                }
                if !closed {
                    return Err(Error::internal(format!("unterminated quote in {body:?}")));
                }
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    Ok(args)
}
