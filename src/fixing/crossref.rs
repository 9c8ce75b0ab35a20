//! cross-reference indexing and whole-document fixups

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::fixing::ancestry::Ancestry;
use crate::language::{Document, Line};

/// Which records declare which identifiers, and how often each identifier
/// is referenced under each tag. Declarations are held as positions into
/// the document's record vector, never as references, so the post-pass
/// can mutate records freely.
#[derive(Debug, Default)]
pub struct Index<'i> {
    declarations: HashMap<&'i str, HashMap<&'i str, usize>>,
    references: HashMap<&'i str, HashMap<&'i str, usize>>,
}

impl<'i> Index<'i> {
    pub fn new() -> Index<'i> {
        Index::default()
    }

    /// Record a line just before it is appended to the record at the given
    /// position: a level-0 `@id@` line declares that identifier under its
    /// record type, and any `@id@` value counts as a reference under the
    /// line's tag.
    pub fn observe(&mut self, line: &Line<'i>, position: usize) {
        if line.level == 0
            && line
                .tag
                .starts_with('@')
        {
            if let Some(kind) = line.record_type() {
                self.declarations
                    .entry(kind)
                    .or_default()
                    .insert(line.tag, position);
            }
        }

        if let Some(target) = line.reference() {
            *self
                .references
                .entry(line.tag)
                .or_default()
                .entry(target)
                .or_default() += 1;
        }
    }

    pub fn declaration(&self, kind: &str, id: &str) -> Option<usize> {
        self.declarations
            .get(kind)?
            .get(id)
            .copied()
    }

    pub fn count(&self, tag: &str, id: &str) -> usize {
        self.references
            .get(tag)
            .and_then(|ids| ids.get(id))
            .copied()
            .unwrap_or(0)
    }

    /// Zeroed once a note has been inlined, so it cannot be inlined again.
    fn zero(&mut self, tag: &str, id: &str) {
        if let Some(count) = self
            .references
            .get_mut(tag)
            .and_then(|ids| ids.get_mut(id))
        {
            *count = 0;
        }
    }
}

/// Violations of the assumptions the post-pass makes about well-formed
/// EasyTree output. These are internal-consistency failures, not user
/// input validation; producing output that silently dropped the affected
/// text would be worse than stopping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    NoteNotContinuation(String),
    TextNotContinuation(String),
    UnknownSource(String),
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralError::NoteNotContinuation(id) => {
                write!(f, "Note record {} does not begin with continuation text", id)
            }
            StructuralError::TextNotContinuation(line) => {
                write!(f, "Expected a continuation of source text, found \"{}\"", line)
            }
            StructuralError::UnknownSource(id) => {
                write!(f, "Source text cites undeclared source {}", id)
            }
        }
    }
}

/// Walk the assembled document and apply the two fixups that need the
/// whole file in memory: inlining note records that are referenced exactly
/// once, and moving source text out of citations into the source records
/// themselves. Each record's lines are replaced wholesale; text headed for
/// another record is collected on the side and appended after the walk so
/// that no record is touched while it is being iterated.
pub fn fix_references<'i>(
    document: &mut Document<'i>,
    index: &mut Index<'i>,
) -> Result<(), StructuralError> {
    let mut relocated: Vec<(usize, Line<'i>)> = Vec::new();
    let mut seen_text: HashSet<&'i str> = HashSet::new();

    for position in 0..document
        .records
        .len()
    {
        if document.records[position].is_empty() {
            continue;
        }

        let lines = std::mem::take(&mut document.records[position].lines);
        let mut replacement: Vec<Line<'i>> = Vec::with_capacity(lines.len());
        let mut ancestry = Ancestry::new();

        for line in lines {
            ancestry.descend(&line);

            // Inline notes that are only used once
            if line.level == 1 && line.tag == "NOTE" {
                if let Some(id) = line.reference() {
                    if index.count("NOTE", id) == 1 {
                        if let Some(target) = index.declaration("NOTE", id) {
                            if target != position {
                                index.zero("NOTE", id);
                                inline_note(document, target, id, &mut replacement)?;
                                continue;
                            }
                        }
                    }
                }
            }

            // Text from the source needs to be part of the source record,
            // not attached to a citing cross-reference
            if let Some(moved) = relocate_text(&ancestry, &line, index, &mut seen_text)? {
                relocated.push(moved);
                continue;
            }

            replacement.push(line);
        }

        document.records[position].lines = replacement;
    }

    for (position, line) in relocated {
        document.records[position]
            .lines
            .push(line);
    }

    Ok(())
}

/// Replace a `1 NOTE @id@` cross-reference with the target record's own
/// content, and empty the target so it is never written out.
///
///   0 @N1@ NOTE   -->   1 NOTE ...
///   1 CONT ...          2 CONT ...
///   1 SOUR @S1@         2 SOUR @S1@
fn inline_note<'i>(
    document: &mut Document<'i>,
    target: usize,
    id: &str,
    replacement: &mut Vec<Line<'i>>,
) -> Result<(), StructuralError> {
    let note = std::mem::take(&mut document.records[target].lines);

    let mut lines = note
        .into_iter()
        .skip(1);

    let first = match lines.next() {
        Some(first) if matches!(first.tag, "CONT" | "CONC") => first,
        _ => return Err(StructuralError::NoteNotContinuation(id.to_string())),
    };

    replacement.push(Line {
        level: 1,
        tag: "NOTE",
        value: first.value,
    });

    for mut line in lines {
        line.level = line
            .level
            .saturating_add(1);
        replacement.push(line);
    }

    Ok(())
}

/// If this line is source text hanging off a `SOUR @id@` citation (or a
/// continuation of such text), compute its new position inside the
/// referenced source record: its level drops by the depth of the enclosing
/// citation. When a second citer contributes text for the same source the
/// fragment continues the existing TEXT block as a CONT rather than
/// starting another one.
fn relocate_text<'i>(
    ancestry: &Ancestry<'i>,
    line: &Line<'i>,
    index: &Index<'i>,
    seen_text: &mut HashSet<&'i str>,
) -> Result<Option<(usize, Line<'i>)>, StructuralError> {
    if ancestry.depth() < 3 {
        return Ok(None);
    }

    for depth in 1..ancestry.depth() - 1 {
        let citation = match ancestry.at(depth) {
            Some(found) if found.tag == "SOUR" => found,
            _ => continue,
        };
        let text = match ancestry.at(depth + 1) {
            Some(found) if found.tag == "TEXT" => found,
            _ => continue,
        };
        let id = match citation.reference() {
            Some(id) => id,
            // an embedded source description legitimately carries its
            // own TEXT; only cross-references are defective
            None => continue,
        };

        let target = match index.declaration("SOUR", id) {
            Some(target) => target,
            None => return Err(StructuralError::UnknownSource(id.to_string())),
        };

        let mut level = line.level;
        let mut tag = line.tag;

        if text.level == line.level {
            // this is the first TEXT line itself
            if !seen_text.insert(id) {
                // concatenate multiple text for the same source
                level += 1;
                tag = "CONT";
            }
        } else if !matches!(line.tag, "CONT" | "CONC") {
            return Err(StructuralError::TextNotContinuation(line.to_string()));
        }

        let moved = Line {
            level: level - depth as u8,
            tag,
            value: line
                .value
                .clone(),
        };
        return Ok(Some((target, moved)));
    }

    Ok(None)
}
