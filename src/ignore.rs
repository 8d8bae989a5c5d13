//! Ignore pattern handling for template trees.
//! Entries matching these globs are never materialized, regardless of the
//! feature modules that are active.

use crate::constants::{DEFAULT_IGNORE_PATTERNS, IGNORE_FILE};
use crate::error::{GeneratorError, GeneratorResult};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, path::Path};

/// Reads `.templateignore` from the template root and combines it with the
/// default patterns.
///
/// # Notes
/// - A missing ignore file is not an error
/// - Blank lines and lines starting with `#` are skipped
/// - Invalid patterns result in an `IgnoreError`
pub fn parse_ignore_file<P: AsRef<Path>>(template_root: P) -> GeneratorResult<GlobSet> {
    let ignore_path = template_root.as_ref().join(IGNORE_FILE);
    let mut builder = GlobSetBuilder::new();

    for pattern in DEFAULT_IGNORE_PATTERNS {
        builder.add(compile(pattern)?);
    }

    if let Ok(contents) = read_to_string(&ignore_path) {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            builder.add(compile(line)?);
        }
    } else {
        debug!("{} does not exist", ignore_path.display());
    }

    builder
        .build()
        .map_err(|e| GeneratorError::IgnoreError(format!("{} loading failed: {}", IGNORE_FILE, e)))
}

fn compile(pattern: &str) -> GeneratorResult<Glob> {
    Glob::new(pattern)
        .map_err(|e| GeneratorError::IgnoreError(format!("{} loading failed: {}", IGNORE_FILE, e)))
}
