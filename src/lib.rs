//! teigen: TEI Dictionary Generation Library
//!
//! Expands a catalog of monolingual XML dictionaries into one bilingual TEI
//! document per destination language, driving an external XSLT processor and
//! XML formatter, and skipping every document that already exists.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
