// Repair engine for EasyTree GEDCOM exports

use std::fmt;

use crate::language::Document;
use crate::parsing;
use crate::parsing::parser::ParsingError;

mod ancestry;
mod crossref;
mod deferred;
mod rules;

// Re-export all public symbols
pub use ancestry::*;
pub use crossref::*;
pub use deferred::*;
pub use rules::*;

/// Anything that can stop a run: input that does not tokenize, or a
/// structural assumption about the document that turned out not to hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairError<'i> {
    Parsing(ParsingError<'i>),
    Structural(StructuralError),
}

impl<'i> From<ParsingError<'i>> for RepairError<'i> {
    fn from(error: ParsingError<'i>) -> RepairError<'i> {
        RepairError::Parsing(error)
    }
}

impl<'i> From<StructuralError> for RepairError<'i> {
    fn from(error: StructuralError) -> RepairError<'i> {
        RepairError::Structural(error)
    }
}

impl<'i> fmt::Display for RepairError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepairError::Parsing(error) => error.fmt(f),
            RepairError::Structural(error) => error.fmt(f),
        }
    }
}

/// Run the whole transformation: read and rewrite every line, then fix up
/// cross-references across the assembled document.
pub fn repair(content: &str) -> Result<Document<'_>, RepairError<'_>> {
    let (mut document, mut index) = parsing::read(content)?;

    fix_references(&mut document, &mut index)?;

    Ok(document)
}
