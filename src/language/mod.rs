// Types representing GEDCOM's level-tagged record format

mod error;
mod types;

// Re-export all public symbols
pub use error::*;
pub use types::*;
