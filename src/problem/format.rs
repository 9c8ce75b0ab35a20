use owo_colors::OwoColorize;
use std::path::Path;

use crate::fixing::RepairError;
use crate::language::LoadingError;

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error(error: &LoadingError) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    )
}

/// Format a repair failure with concise single-line output, including the
/// offending line number when the input failed to tokenize
pub fn concise_repair_error(error: &RepairError, filename: &Path) -> String {
    match error {
        RepairError::Parsing(error) => format!(
            "{}: {}:{} {}",
            "error".bright_red(),
            filename.display(),
            error.line(),
            error
                .to_string()
                .bold()
        ),
        RepairError::Structural(error) => format!(
            "{}: {}: {}",
            "error".bright_red(),
            filename.display(),
            error
                .to_string()
                .bold()
        ),
    }
}

/// Format a failure to create or write the destination file
pub fn concise_writing_error(error: &std::io::Error, filename: &Path) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        filename.display(),
        error
            .to_string()
            .bold()
    )
}
