//! loading and reading of GEDCOM files

use std::path::Path;
use tracing::{debug, info};

use crate::fixing::{Index, Outcome, State};
use crate::language::{Document, LoadingError, Record};
use crate::parsing::parser::ParsingError;

pub mod parser;

/// Read a file and return an owned String. We pass that ownership back to
/// the caller so that the Document produced by read() below can borrow
/// from it for the lifetime of the run.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                std::io::ErrorKind::InvalidData => Err(LoadingError {
                    problem: "Not a text file".to_string(),
                    // EasyTree exports in a legacy 8-bit encoding by
                    // default; encoding conversion is up to the caller
                    details: "convert the export to UTF-8 first".to_string(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Tokenize the whole input, fold every line through the rewrite rules,
/// and assemble the surviving lines into records, building the
/// cross-reference index as we go. Deferred source blocks are flushed into
/// the finished record at each record boundary and again at end of input,
/// so a file truncated before its trailer still gets them.
pub fn read(content: &str) -> Result<(Document<'_>, Index<'_>), ParsingError<'_>> {
    let mut state = State::new();
    let mut index = Index::new();
    let mut document = Document::new();

    for (i, text) in content
        .lines()
        .enumerate()
    {
        let number = i + 1;
        let line = parser::tokenize(text, number)?;

        state.close_discard(line.level);

        if line.level == 0 {
            if let Some(record) = document
                .records
                .last_mut()
            {
                state.flush(record);
            }
            document
                .records
                .push(Record::new());
            state.begin(line.record_type());
        } else if document
            .records
            .is_empty()
        {
            return Err(ParsingError::OutsideRecord(number));
        }

        let line = match state.apply(line) {
            Outcome::Keep(line) => line,
            Outcome::Rewrite(line) => {
                debug!("Rewrote line {} as {}", number, line);
                line
            }
            Outcome::Defer => continue,
            Outcome::Drop(line) => {
                info!("Discarding {} {}", state.record_name(), line);
                continue;
            }
        };

        index.observe(&line, document.records.len() - 1);

        if let Some(record) = document
            .records
            .last_mut()
        {
            record
                .lines
                .push(line);
        }
    }

    if let Some(record) = document
        .records
        .last_mut()
    {
        state.flush(record);
    }

    debug!(
        "Read {} record{}",
        document
            .records
            .len(),
        if document
            .records
            .len()
            == 1
        {
            ""
        } else {
            "s"
        }
    );

    Ok((document, index))
}
