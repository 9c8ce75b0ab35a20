//! per-line rewrite rules for the defects EasyTree is known to produce

use crate::fixing::deferred::Deferred;
use crate::language::{Line, Record};

/// Level-1 fields EasyTree writes directly under a SOUR record that GEDCOM
/// has no structural position for. Each becomes a labelled text fragment
/// in the synthesized DATA/NOTE block.
pub const SOURCE_FIELDS: [(&str, &str); 10] = [
    ("FILN", "File Number"),
    ("REGI", "Register"),
    ("MEDI", "Media Type"),
    ("LOCA", "Location of Source"),
    ("INTV", "Interviewee"),
    ("INTE", "Interviewer"),
    ("VOL", "Volume Number"),
    ("PAGE", "Page"),
    ("SUBM", "Submitter"),
    ("FILE", "File Name"),
];

fn source_field(tag: &str) -> Option<&'static str> {
    SOURCE_FIELDS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, label)| *label)
}

/// What the rules decided about one line. The reader folds these: kept and
/// rewritten lines land in the current record, deferred lines sit in the
/// side buffers until the record boundary, dropped lines are reported and
/// forgotten.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome<'i> {
    Keep(Line<'i>),
    Rewrite(Line<'i>),
    Defer,
    Drop(Line<'i>),
}

/// Rewrite state carried across the lines of one record: the record's
/// type, the discard window if one is open, and the deferred source
/// blocks. Discard windows do not stack; one only ever opens at level 1
/// and closes again before another of the rules that open one can match.
#[derive(Debug, Default)]
pub struct State<'i> {
    record: Option<&'i str>,
    discard: Option<u8>,
    deferred: Deferred<'i>,
}

impl<'i> State<'i> {
    pub fn new() -> State<'i> {
        State::default()
    }

    /// An open discard window closes the moment a line at or above its
    /// level arrives. This runs before any other rule sees the line, so
    /// the closing line itself is still subject to rewriting.
    pub fn close_discard(&mut self, level: u8) {
        if let Some(limit) = self.discard {
            if level <= limit {
                self.discard = None;
            }
        }
    }

    /// Start a new record. The deferred buffers must already have been
    /// flushed into the previous record at this point.
    pub fn begin(&mut self, record: Option<&'i str>) {
        self.record = record;
    }

    /// The current record type, for discard diagnostics.
    pub fn record_name(&self) -> &str {
        self.record
            .unwrap_or("?")
    }

    pub fn flush(&mut self, record: &mut Record<'i>) {
        self.deferred
            .flush(record);
    }

    /// Apply the rewrite rules to one tokenized line.
    pub fn apply(&mut self, mut line: Line<'i>) -> Outcome<'i> {
        let mut rewritten = false;

        if self.record == Some("SOUR") && line.level == 1 {
            match line.tag {
                "TYPE" => {
                    // EasyTree abuses TYPE for what GEDCOM calls the
                    // title; TITL must precede the rest of the source
                    // substructure, so it is buffered rather than emitted
                    line.tag = "TITL";
                    self.deferred
                        .set_title(line);
                    return Outcome::Defer;
                }
                "TITL" => {
                    self.deferred
                        .clear_title();
                }
                "DATE" | "PLAC" => {
                    // belongs three levels down, under DATA/EVEN
                    line.level = 3;
                    self.deferred
                        .push_event(line);
                    return Outcome::Defer;
                }
                tag => {
                    if let Some(label) = source_field(tag) {
                        let value = line
                            .value
                            .as_deref()
                            .unwrap_or("");
                        self.deferred
                            .push_note(format!("{}: {}", label, value));
                        return Outcome::Defer;
                    }
                }
            }
        }

        if line.level == 1 {
            match (self.record, line.tag) {
                (Some("INDI"), "ADDR") => {
                    // individual addresses may just repeat the family
                    // address, and the destination has no place for them
                    self.discard = Some(line.level);
                }
                (Some("FAM"), "ADDR" | "PHON") => {
                    // not supported
                    self.discard = Some(line.level);
                }
                (Some("SUBM"), "ADDR") => {
                    self.discard = Some(line.level);
                }
                (Some("SUBM"), "EMAL") => {
                    line.tag = "EMAIL";
                    rewritten = true;
                }
                _ => {}
            }
        }

        if line.tag == "CONC" {
            // the destination re-wraps text without the 255 character
            // convention, so every continuation must start a new line
            line.tag = "CONT";
            rewritten = true;
        }

        if self.record == Some("NOTE") && line.level == 2 && line.tag == "SOUR" {
            // EasyTree nests a note's source citation one level too deep
            line.level = 1;
            rewritten = true;
        }

        if self
            .discard
            .is_some()
        {
            return Outcome::Drop(line);
        }

        if rewritten {
            Outcome::Rewrite(line)
        } else {
            Outcome::Keep(line)
        }
    }
}

#[cfg(test)]
mod check {
    use super::*;
    use std::borrow::Cow;

    fn line<'i>(level: u8, tag: &'i str, value: &'i str) -> Line<'i> {
        Line {
            level,
            tag,
            value: Some(Cow::Borrowed(value)),
        }
    }

    #[test]
    fn source_type_is_buffered_as_title() {
        let mut state = State::new();
        state.begin(Some("SOUR"));

        let outcome = state.apply(line(1, "TYPE", "Newspaper"));
        assert_eq!(outcome, Outcome::Defer);

        let mut record = Record::new();
        state.flush(&mut record);
        assert_eq!(
            record.lines,
            vec![line(1, "TITL", "Newspaper")]
        );
    }

    #[test]
    fn explicit_title_cancels_promoted_type() {
        let mut state = State::new();
        state.begin(Some("SOUR"));

        state.apply(line(1, "TYPE", "Newspaper"));
        let outcome = state.apply(line(1, "TITL", "The Times"));
        assert_eq!(outcome, Outcome::Keep(line(1, "TITL", "The Times")));

        let mut record = Record::new();
        state.flush(&mut record);
        assert!(record.is_empty());
    }

    #[test]
    fn source_dates_and_places_move_to_event_depth() {
        let mut state = State::new();
        state.begin(Some("SOUR"));

        assert_eq!(state.apply(line(1, "DATE", "1 JAN 1900")), Outcome::Defer);
        assert_eq!(state.apply(line(1, "PLAC", "London")), Outcome::Defer);

        let mut record = Record::new();
        state.flush(&mut record);
        assert_eq!(
            record.lines,
            vec![
                Line::empty(1, "DATA"),
                Line::empty(2, "EVEN"),
                line(3, "DATE", "1 JAN 1900"),
                line(3, "PLAC", "London"),
            ]
        );
    }

    #[test]
    fn ancillary_source_fields_become_labelled_notes() {
        let mut state = State::new();
        state.begin(Some("SOUR"));

        assert_eq!(state.apply(line(1, "PAGE", "45")), Outcome::Defer);
        assert_eq!(state.apply(line(1, "FILN", "17")), Outcome::Defer);

        let mut record = Record::new();
        state.flush(&mut record);
        assert_eq!(
            record.lines,
            vec![
                Line::empty(1, "DATA"),
                Line {
                    level: 2,
                    tag: "NOTE",
                    value: Some(Cow::Owned("Page: 45".to_string())),
                },
                Line {
                    level: 3,
                    tag: "CONT",
                    value: Some(Cow::Owned("File Number: 17".to_string())),
                },
            ]
        );
    }

    #[test]
    fn family_address_opens_a_discard_window() {
        let mut state = State::new();
        state.begin(Some("FAM"));

        let outcome = state.apply(line(1, "ADDR", "1 Main Street"));
        assert_eq!(outcome, Outcome::Drop(line(1, "ADDR", "1 Main Street")));

        // still inside the window at level 2
        state.close_discard(2);
        let outcome = state.apply(line(2, "CONT", "Townsville"));
        assert_eq!(outcome, Outcome::Drop(line(2, "CONT", "Townsville")));

        // a level 1 sibling closes it
        state.close_discard(1);
        let outcome = state.apply(line(1, "CHIL", "@I1@"));
        assert_eq!(outcome, Outcome::Keep(line(1, "CHIL", "@I1@")));
    }

    #[test]
    fn family_address_is_kept_in_a_source_record() {
        let mut state = State::new();
        state.begin(Some("SOUR"));

        let outcome = state.apply(line(1, "ADDR", "1 Main Street"));
        assert_eq!(outcome, Outcome::Keep(line(1, "ADDR", "1 Main Street")));
    }

    #[test]
    fn submitter_email_tag_is_corrected() {
        let mut state = State::new();
        state.begin(Some("SUBM"));

        let outcome = state.apply(line(1, "EMAL", "john@example.com"));
        assert_eq!(
            outcome,
            Outcome::Rewrite(line(1, "EMAIL", "john@example.com"))
        );
    }

    #[test]
    fn concatenations_become_continuations_everywhere() {
        let mut state = State::new();
        state.begin(Some("NOTE"));

        let outcome = state.apply(line(1, "CONC", "more text"));
        assert_eq!(outcome, Outcome::Rewrite(line(1, "CONT", "more text")));
    }

    #[test]
    fn note_source_citation_is_promoted_a_level() {
        let mut state = State::new();
        state.begin(Some("NOTE"));

        let outcome = state.apply(line(2, "SOUR", "@S1@"));
        assert_eq!(outcome, Outcome::Rewrite(line(1, "SOUR", "@S1@")));
    }
}
