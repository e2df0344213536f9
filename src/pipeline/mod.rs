//! Pipeline module - plans and runs the dictionary conversions

pub mod catalog;
pub mod draft;
pub mod driver;
pub mod error;
pub mod language;
pub mod task;
pub mod tools;

pub use catalog::*;
pub use draft::DraftGuard;
pub use driver::*;
pub use error::*;
pub use language::*;
pub use task::*;
pub use tools::*;
