//! Services that read version requirements out of binaries on disk.

pub mod elf;
pub mod extract;

pub use extract::{extract, versions_from_tags, ExtractError};
