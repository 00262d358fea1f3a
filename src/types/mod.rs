//! Data types for answer sets, question metadata and cell writes.

mod answer;
mod error_record;
mod mapping;
mod question;

pub use answer::*;
pub use error_record::*;
pub use mapping::*;
pub use question::*;
