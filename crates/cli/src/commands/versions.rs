use std::path::Path;

use anyhow::{anyhow, Context, Result};
use glibc_check_core::{Version, VersionSet};

/// Extract the glibc version set of `file`, adding the path to any error.
pub fn load_versions(file: &Path) -> Result<VersionSet> {
    glibc_check_core::extract(file)
        .with_context(|| format!("Failed to read glibc versions from {}", file.display()))
}

/// Load the version set of `file` and fail if it has no glibc tags.
pub fn load_non_empty_versions(file: &Path) -> Result<VersionSet> {
    let versions = load_versions(file)?;
    if versions.is_empty() {
        return Err(no_versions(file));
    }
    Ok(versions)
}

fn no_versions(file: &Path) -> anyhow::Error {
    anyhow!("no glibc versions found in {}", file.display())
}

/// Print every glibc version of `file`, oldest first.
pub fn list_versions_command(file: &Path, json: bool) -> Result<()> {
    let versions = load_versions(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&versions)?);
        return Ok(());
    }

    for version in &versions {
        println!("{}", version);
    }

    Ok(())
}

/// Oldest glibc version required by `file`.
pub fn min_version(file: &Path) -> Result<Version> {
    load_versions(file)?.min().cloned().ok_or_else(|| no_versions(file))
}

/// Newest glibc version required by `file`.
pub fn max_version(file: &Path) -> Result<Version> {
    load_versions(file)?.max().cloned().ok_or_else(|| no_versions(file))
}

pub fn min_command(file: &Path) -> Result<()> {
    println!("{}", min_version(file)?);
    Ok(())
}

pub fn max_command(file: &Path) -> Result<()> {
    println!("{}", max_version(file)?);
    Ok(())
}
