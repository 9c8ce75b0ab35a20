//! Repair GEDCOM files exported by the EasyTree genealogy program.
//!
//! EasyTree writes a number of structures that other genealogy software
//! cannot read: source citation fields in the wrong roles and at the wrong
//! depths, address and phone fields the 5.5.1 schema has no place for,
//! CONC continuations the destination cannot re-wrap, and source text
//! attached to the citing cross-reference instead of the source record.
//! This crate reads a whole file into a forest of records, rewrites the
//! defective lines, fixes up cross-references, and writes the result back
//! out with CRLF line endings.

pub mod fixing;
pub mod language;
pub mod output;
pub mod parsing;
pub mod problem;
