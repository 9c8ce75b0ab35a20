//! writer for repaired GEDCOM documents

use std::io::Write;

use crate::language::Document;

/// Write every surviving line with CRLF endings, regardless of platform,
/// as the destination GEDCOM profile requires. Records emptied by the
/// note-inlining fixup contribute nothing.
pub fn write<W: Write>(document: &Document, out: &mut W) -> std::io::Result<()> {
    for record in &document.records {
        for line in &record.lines {
            match &line.value {
                Some(value) => write!(out, "{} {} {}\r\n", line.level, line.tag, value)?,
                None => write!(out, "{} {}\r\n", line.level, line.tag)?,
            }
        }
    }

    Ok(())
}
