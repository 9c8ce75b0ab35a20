use std::borrow::Cow;

use crate::language::{Line, Record};

/// Side buffers accumulated while scanning a SOUR record's level-1 lines.
/// EasyTree writes a source's title, event details, and ancillary fields
/// in positions GEDCOM does not allow; we hold the corrected lines here
/// and flush them in a fixed order at the record boundary: the promoted
/// title first, then a synthesized DATA block carrying an EVEN block and a
/// NOTE block.
#[derive(Debug, Default)]
pub struct Deferred<'i> {
    title: Option<Line<'i>>,
    events: Vec<Line<'i>>,
    notes: Vec<String>,
}

impl<'i> Deferred<'i> {
    pub fn new() -> Deferred<'i> {
        Deferred::default()
    }

    pub fn set_title(&mut self, line: Line<'i>) {
        self.title = Some(line);
    }

    /// An explicit TITL line in the record wins over a promoted TYPE.
    pub fn clear_title(&mut self) {
        self.title = None;
    }

    pub fn push_event(&mut self, line: Line<'i>) {
        self.events
            .push(line);
    }

    pub fn push_note(&mut self, text: String) {
        self.notes
            .push(text);
    }

    /// Append everything buffered to the given record, leaving the buffers
    /// empty for the next one.
    pub fn flush(&mut self, record: &mut Record<'i>) {
        if let Some(title) = self
            .title
            .take()
        {
            record
                .lines
                .push(title);
        }

        if !self
            .events
            .is_empty()
            || !self
                .notes
                .is_empty()
        {
            record
                .lines
                .push(Line::empty(1, "DATA"));
        }

        if !self
            .events
            .is_empty()
        {
            record
                .lines
                .push(Line::empty(2, "EVEN"));
            record
                .lines
                .append(&mut self.events);
        }

        let mut notes = self
            .notes
            .drain(..);
        if let Some(first) = notes.next() {
            record
                .lines
                .push(Line {
                    level: 2,
                    tag: "NOTE",
                    value: Some(Cow::Owned(first)),
                });
        }
        for note in notes {
            record
                .lines
                .push(Line {
                    level: 3,
                    tag: "CONT",
                    value: Some(Cow::Owned(note)),
                });
        }
    }
}
