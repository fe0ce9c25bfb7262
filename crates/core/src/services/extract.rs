use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::model::{ParseError, Version, VersionSet};
use crate::services::elf::{self, ElfError};

pub use crate::services::elf::OpenFailure;

static GLIBC_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^GLIBC_([0-9.]+)$").expect("glibc tag pattern is valid"));

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file is missing, unreadable, or not an ELF image.
    #[error("failed to open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: OpenFailure,
    },

    /// The image opened but its dynamic symbol or version tables are unreadable.
    #[error("failed to read imported symbols of '{}': {reason}", path.display())]
    SymbolTable { path: PathBuf, reason: String },

    /// A tag matched `GLIBC_<digits-and-dots>` but its body is not a version.
    #[error("parsing '{tag}' from '{origin}': {source}")]
    VersionParse {
        origin: String,
        tag: String,
        #[source]
        source: ParseError,
    },
}

/// Extract the glibc versions required by the executable at `path`.
///
/// Returns the distinct `GLIBC_*` tags of its imported dynamic symbols, sorted
/// ascending. A binary without any glibc-tagged imports yields an empty set.
pub fn extract(path: impl AsRef<Path>) -> Result<VersionSet, ExtractError> {
    let path = path.as_ref();
    log::debug!("reading imported symbols from {}", path.display());

    let bytes = fs::read(path)
        .map_err(|e| ExtractError::Open { path: path.to_path_buf(), source: e.into() })?;
    let imports = elf::imported_symbols(&bytes).map_err(|e| match e {
        ElfError::Open(source) => ExtractError::Open { path: path.to_path_buf(), source },
        ElfError::SymbolTable(reason) => {
            ExtractError::SymbolTable { path: path.to_path_buf(), reason }
        }
    })?;
    log::debug!("{} imported dynamic symbols in {}", imports.len(), path.display());

    versions_from_tags(&path.display().to_string(), imports.iter().map(|sym| sym.version.as_str()))
}

/// Turn raw symbol version strings into a sorted glibc `VersionSet`.
///
/// Tags are deduplicated on their raw text before parsing, so `GLIBC_2.17`
/// and `GLIBC_2.17.0` both survive. Strings that are not `GLIBC_*` tags are
/// skipped. `origin` names where the tags came from for error messages.
pub fn versions_from_tags<I, S>(origin: &str, tags: I) -> Result<VersionSet, ExtractError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let distinct: HashSet<String> = tags.into_iter().map(|t| t.as_ref().to_string()).collect();

    let mut versions = Vec::new();
    for tag in &distinct {
        let Some(captures) = GLIBC_TAG.captures(tag) else {
            log::trace!("skipping non-glibc version tag {tag:?} in {origin}");
            continue;
        };
        let body = &captures[1];
        let version = Version::parse(body).map_err(|source| ExtractError::VersionParse {
            origin: origin.to_string(),
            tag: body.to_string(),
            source,
        })?;
        versions.push(version);
    }

    Ok(VersionSet::sorted(versions))
}
