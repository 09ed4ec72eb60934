//! Name matching for pfind.
//!
//! [NamePattern] wraps a compiled [glob::Pattern] and is applied to a single entry name,
//! never to a full path. The pattern is validated once when it is built, so a malformed
//! pattern stops the program before any directory is listed.
//!
//! The accepted syntax is the usual shell glob:
//! - `*` any run of characters, `?` any single character
//! - `[abc]`, `[a-z]` character classes, negated with `[!...]` or `[^...]`
//! - `\c` matches `c` literally, inside a class as well as outside

use crate::error::PfindError;

use glob::{MatchOptions, Pattern};
use std::ffi::OsStr;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone)]
pub struct NamePattern {
    raw: String,
    pattern: Pattern,
    options: MatchOptions,
}

impl NamePattern {
    /// Compile a case-sensitive pattern.
    pub fn new(raw: &str) -> Result<Self, PfindError> {
        Self::with_case(raw, false)
    }

    pub fn with_case(raw: &str, ignore_case: bool) -> Result<Self, PfindError> {
        let translated = translate(raw)?;
        let pattern = Pattern::new(&translated).map_err(|source| PfindError::InvalidPattern {
            pattern: raw.to_string(),
            source,
        })?;
        let options = MatchOptions {
            case_sensitive: !ignore_case,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };
        Ok(Self {
            raw: raw.to_string(),
            pattern,
            options,
        })
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[inline]
    pub fn ignores_case(&self) -> bool {
        !self.options.case_sensitive
    }

    /// Test an entry name against the pattern.
    /// Names that are not valid UTF-8 are matched on their lossy form.
    pub fn matches(&self, name: &OsStr) -> bool {
        match name.to_str() {
            Some(name) => self.pattern.matches_with(name, self.options),
            None => self
                .pattern
                .matches_with(&name.to_string_lossy(), self.options),
        }
    }
}

/// Rewrite shell glob syntax into the dialect understood by the glob crate.
///
/// Names never contain a separator, so a run of `*` is collapsed into one.
fn translate(raw: &str) -> Result<String, PfindError> {
    let mut out = String::with_capacity(raw.len() + 4);
    let total = raw.chars().count();
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let lit = chars.next().ok_or_else(|| trailing_escape(raw))?;
                push_literal(&mut out, lit);
            }
            '*' => {
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
                out.push('*');
            }
            '[' => {
                let start = total - chars.clone().count() - 1;
                let (negated, items) = parse_class(&mut chars, raw, start)?;
                emit_class(&mut out, negated, &items, raw, start)?;
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}

/// One member of a bracket class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassItem {
    Char(char),
    Range(char, char),
}

/// Parse the members of a class whose `[` has just been consumed, up to and including `]`.
///
/// `\c` is the literal `c`. A `]` in first position is a member, as is a `-` in first or
/// last position.
fn parse_class(
    chars: &mut Peekable<Chars<'_>>,
    raw: &str,
    start: usize,
) -> Result<(bool, Vec<ClassItem>), PfindError> {
    let negated = matches!(chars.peek(), Some('^' | '!'));
    if negated {
        chars.next();
    }

    let mut items = Vec::new();
    loop {
        let lo = match chars.next() {
            None => return Err(invalid(raw, start, "unclosed character class")),
            Some(']') if !items.is_empty() => break,
            Some('\\') => chars.next().ok_or_else(|| trailing_escape(raw))?,
            Some(c) => c,
        };

        let mut ahead = chars.clone();
        if ahead.next() == Some('-') && !matches!(ahead.peek(), Some(']') | None) {
            chars.next();
            let hi = match chars.next() {
                Some('\\') => chars.next().ok_or_else(|| trailing_escape(raw))?,
                Some(c) => c,
                None => return Err(invalid(raw, start, "unclosed character class")),
            };
            items.push(ClassItem::Range(lo, hi));
        } else {
            items.push(ClassItem::Char(lo));
        }
    }
    Ok((negated, items))
}

/// Write a parsed class in glob crate syntax.
///
/// The glob crate has no escapes inside a class, so position does the work: `]` and
/// ranges starting with `]` or `-` go first, a lone `-` last and `!` never directly
/// after the opening bracket.
fn emit_class(
    out: &mut String,
    negated: bool,
    items: &[ClassItem],
    raw: &str,
    start: usize,
) -> Result<(), PfindError> {
    if !negated && let [ClassItem::Char(c)] = items {
        push_literal(out, *c);
        return Ok(());
    }

    let mut front: Option<ClassItem> = None;
    let mut middle = String::new();
    let mut bang = false;
    let mut dash = false;

    for &item in items {
        match item {
            ClassItem::Range(_, ']') => {
                return Err(invalid(raw, start, "range cannot end with `]`"));
            }
            ClassItem::Range(']' | '-', _) | ClassItem::Char(']') => match front {
                None => front = Some(item),
                Some(prev) if prev == item => {}
                Some(_) => {
                    return Err(invalid(
                        raw,
                        start,
                        "class mixes `]` with a range starting at `]` or `-`",
                    ));
                }
            },
            ClassItem::Char('-') => dash = true,
            ClassItem::Char('!') => bang = true,
            ClassItem::Char(c) => middle.push(c),
            ClassItem::Range(lo, hi) => {
                middle.push(lo);
                middle.push('-');
                middle.push(hi);
            }
        }
    }

    out.push('[');
    if negated {
        out.push('!');
    }
    match front {
        Some(ClassItem::Range(lo, hi)) => {
            out.push(lo);
            out.push('-');
            out.push(hi);
        }
        Some(ClassItem::Char(c)) => out.push(c),
        None => {}
    }
    if front.is_none() && middle.is_empty() {
        // Only `!` and `-` are left: `-` first keeps `!` from reading as a negation.
        if dash {
            out.push('-');
        }
        if bang {
            out.push('!');
        }
    } else {
        out.push_str(&middle);
        if bang {
            out.push('!');
        }
        if dash {
            out.push('-');
        }
    }
    out.push(']');
    Ok(())
}

/// Append `c` so that it matches only itself.
fn push_literal(out: &mut String, c: char) {
    match c {
        '*' | '?' | '[' | ']' => {
            out.push('[');
            out.push(c);
            out.push(']');
        }
        _ => out.push(c),
    }
}

fn trailing_escape(raw: &str) -> PfindError {
    PfindError::TrailingEscape {
        pattern: raw.to_string(),
    }
}

fn invalid(raw: &str, pos: usize, msg: &'static str) -> PfindError {
    PfindError::InvalidPattern {
        pattern: raw.to_string(),
        source: glob::PatternError { pos, msg },
    }
}
