//! Types representing a GEDCOM document as a forest of records

use std::borrow::Cow;
use std::fmt;

/// One physical line, split per GEDCOM's `LEVEL TAG VALUE` convention. The
/// value borrows from the loaded source except where a rewrite rule has
/// synthesized it. A value of `None` means the line had no third field at
/// all; `Some("")` means it had one that was empty, which EasyTree writes
/// as a trailing space and which we preserve so that a repaired file is a
/// fixed point of the transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'i> {
    pub level: u8,
    pub tag: &'i str,
    pub value: Option<Cow<'i, str>>,
}

impl<'i> Line<'i> {
    /// A synthesized line whose value field is present but empty, such as
    /// the `1 DATA ` opening a rebuilt source data block.
    pub fn empty(level: u8, tag: &'i str) -> Line<'i> {
        Line {
            level,
            tag,
            value: Some(Cow::Borrowed("")),
        }
    }

    /// The record type of a level-0 line: the tag itself for `0 HEAD`, or
    /// the value for a declaration such as `0 @I1@ INDI`.
    pub fn record_type(&self) -> Option<&'i str> {
        if self
            .tag
            .starts_with('@')
        {
            match &self.value {
                Some(Cow::Borrowed(value)) => Some(value.trim_end()),
                _ => None,
            }
        } else {
            Some(self.tag)
        }
    }

    /// The cross-reference identifier this line points at, if its value is
    /// an `@id@` token.
    pub fn reference(&self) -> Option<&'i str> {
        match &self.value {
            Some(Cow::Borrowed(value)) => {
                let value = value.trim_end();
                if value.starts_with('@') {
                    Some(value)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl<'i> fmt::Display for Line<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level, self.tag)?;
        if let Some(value) = &self.value {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}

/// An ordered run of lines beginning with a single level-0 line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'i> {
    pub lines: Vec<Line<'i>>,
}

impl<'i> Record<'i> {
    pub fn new() -> Record<'i> {
        Record { lines: Vec::new() }
    }

    /// Inlined note records are emptied rather than removed, so that
    /// positions held by the cross-reference index stay valid.
    pub fn is_empty(&self) -> bool {
        self.lines
            .is_empty()
    }
}

impl<'i> Default for Record<'i> {
    fn default() -> Record<'i> {
        Record::new()
    }
}

/// The whole document. Owns every record; the cross-reference index refers
/// to records by position in this vector, never by reference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document<'i> {
    pub records: Vec<Record<'i>>,
}

impl<'i> Document<'i> {
    pub fn new() -> Document<'i> {
        Document {
            records: Vec::new(),
        }
    }
}
