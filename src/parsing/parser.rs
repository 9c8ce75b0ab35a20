//! tokenizer for GEDCOM's level-tagged line format

use std::borrow::Cow;
use std::fmt;

use crate::language::Line;

/// Failures to split a physical line into level, tag and value. These are
/// fatal: a file that cannot be tokenized is corrupt and the destination
/// must not be treated as complete. Each variant carries the 1-based line
/// number at which the problem was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError<'i> {
    MissingTag(usize),
    InvalidLevel(usize, &'i str),
    OutsideRecord(usize),
}

impl<'i> ParsingError<'i> {
    pub fn line(&self) -> usize {
        match self {
            ParsingError::MissingTag(number) => *number,
            ParsingError::InvalidLevel(number, _) => *number,
            ParsingError::OutsideRecord(number) => *number,
        }
    }
}

impl<'i> fmt::Display for ParsingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsingError::MissingTag(_) => {
                write!(f, "Line does not have a level and a tag")
            }
            ParsingError::InvalidLevel(_, text) => {
                write!(f, "Invalid level number \"{}\"", text)
            }
            ParsingError::OutsideRecord(_) => {
                write!(f, "Line encountered before any level 0 record")
            }
        }
    }
}

/// Split one physical line on its first two spaces. The value keeps
/// everything after the second space verbatim, embedded spaces included;
/// the line terminator has already been removed by the caller.
pub fn tokenize<'i>(text: &'i str, number: usize) -> Result<Line<'i>, ParsingError<'i>> {
    let (first, rest) = text
        .split_once(' ')
        .ok_or(ParsingError::MissingTag(number))?;

    let level = first
        .parse::<u8>()
        .map_err(|_| ParsingError::InvalidLevel(number, first))?;

    let (tag, value) = match rest.split_once(' ') {
        Some((tag, value)) => (tag, Some(Cow::Borrowed(value))),
        None => (rest, None),
    };

    if tag.is_empty() {
        return Err(ParsingError::MissingTag(number));
    }

    Ok(Line { level, tag, value })
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn plain_lines() {
        let line = tokenize("0 HEAD", 1).unwrap();
        assert_eq!(line.level, 0);
        assert_eq!(line.tag, "HEAD");
        assert_eq!(line.value, None);

        let line = tokenize("1 NAME John /Doe/", 2).unwrap();
        assert_eq!(line.level, 1);
        assert_eq!(line.tag, "NAME");
        assert_eq!(line.value.as_deref(), Some("John /Doe/"));
    }

    #[test]
    fn declaration_lines() {
        let line = tokenize("0 @S1@ SOUR", 1).unwrap();
        assert_eq!(line.level, 0);
        assert_eq!(line.tag, "@S1@");
        assert_eq!(line.value.as_deref(), Some("SOUR"));
        assert_eq!(line.record_type(), Some("SOUR"));
    }

    #[test]
    fn empty_value_field_is_kept() {
        let line = tokenize("1 DATA ", 3).unwrap();
        assert_eq!(line.value.as_deref(), Some(""));
    }

    #[test]
    fn malformed_lines() {
        assert_eq!(tokenize("0", 1), Err(ParsingError::MissingTag(1)));
        assert_eq!(tokenize("", 4), Err(ParsingError::MissingTag(4)));
        assert_eq!(
            tokenize("x HEAD", 7),
            Err(ParsingError::InvalidLevel(7, "x"))
        );
        assert_eq!(tokenize("0  HEAD", 2), Err(ParsingError::MissingTag(2)));
    }
}
