use std::path::Path;

use anyhow::Result;
use glibc_check_core::VersionSet;

use crate::commands::load_non_empty_versions;

/// Evaluate `condition` against every glibc version of `file`.
///
/// Returns the violations; an invalid or non-boolean condition is an error.
pub fn assert_all(condition: &str, file: &Path) -> Result<VersionSet> {
    let versions = load_non_empty_versions(file)?;
    let violations = versions.find_violations(condition)?;
    log::debug!(
        "'{}' checked against {} versions of {}: {} violations",
        condition,
        versions.len(),
        file.display(),
        violations.len()
    );
    Ok(violations)
}

/// Run `assert-all`, reporting violations on stderr.
///
/// Returns the number of violations so the caller can use it as the exit status.
pub fn assert_all_command(condition: &str, file: &Path) -> Result<usize> {
    let violations = assert_all(condition, file)?;
    if !violations.is_empty() {
        eprintln!("condition did not hold for versions: {}", violations);
    }
    Ok(violations.len())
}
