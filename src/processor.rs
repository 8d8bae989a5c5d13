//! Tree materialization.
//! Walks a template tree, asks the [`Resolver`] which entries belong to the
//! configured project, rewrites text files through the [`TemplateEngine`] and
//! writes the result, followed by the generated manifest.
//!
//! Everything here owns the I/O; the resolver and the engine stay pure.

use crate::config::Configuration;
use crate::constants::MANIFEST_FILE;
use crate::error::{GeneratorError, GeneratorResult};
use crate::ignore::parse_ignore_file;
use crate::manifest::Manifest;
use crate::modules::{Catalog, Resolver};
use crate::template::TemplateEngine;
use crate::variables::build_variables;
use globset::GlobSet;
use log::{debug, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What to do with one template entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    CreateDirectory { target: PathBuf },
    /// Rendered text content, with the names of any unterminated `{{#if}}` blocks
    Write { target: PathBuf, content: String, unterminated: Vec<String> },
    /// Non-UTF-8 content, copied byte for byte
    Copy { target: PathBuf },
}

impl FileOperation {
    pub fn target(&self) -> &Path {
        match self {
            FileOperation::CreateDirectory { target }
            | FileOperation::Write { target, .. }
            | FileOperation::Copy { target } => target,
        }
    }
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files written, relative to the output root, in walk order
    pub files: Vec<String>,
    /// Template entries left out by the resolver or ignore patterns
    pub skipped: Vec<String>,
    /// Files containing `{{#if}}` blocks without a closing `{{/if}}`
    pub warnings: Vec<String>,
}

/// Checks that the output directory can be written to.
///
/// Returns whether the directory already existed.
///
/// # Errors
/// * `GeneratorError::OutputDirectoryExistsError` if it exists, is not empty and `force` is false
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> GeneratorResult<bool> {
    let output_dir = output_dir.as_ref();
    if !output_dir.exists() {
        return Ok(false);
    }
    let is_empty = fs::read_dir(output_dir)?.next().is_none();
    if !is_empty && !force {
        return Err(GeneratorError::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(true)
}

/// Template-relative path with `/` separators.
pub fn relative_path(root: &Path, path: &Path) -> GeneratorResult<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|e| GeneratorError::ConfigError(format!("{}: {}", path.display(), e)))?;
    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/"))
}

pub struct Processor<'a> {
    resolver: Resolver<'a>,
    engine: TemplateEngine,
    template_root: PathBuf,
    output_root: PathBuf,
    ignored: GlobSet,
}

impl<'a> Processor<'a> {
    pub fn new<P: Into<PathBuf>>(
        resolver: Resolver<'a>,
        engine: TemplateEngine,
        template_root: P,
        output_root: P,
        ignored: GlobSet,
    ) -> Self {
        Self {
            resolver,
            engine,
            template_root: template_root.into(),
            output_root: output_root.into(),
            ignored,
        }
    }

    /// Decides the operation for one template entry.
    ///
    /// Returns `Ok(None)` when the entry is not part of the project.
    pub fn plan(
        &self,
        relative: &str,
        source: &Path,
        is_dir: bool,
    ) -> GeneratorResult<Option<FileOperation>> {
        if self.ignored.is_match(relative) {
            debug!("Skipping '{}' (ignore pattern)", relative);
            return Ok(None);
        }
        let target = self.output_root.join(relative);

        if is_dir {
            if !self.resolver.should_include_directory(relative) {
                debug!("Skipping directory '{}'", relative);
                return Ok(None);
            }
            return Ok(Some(FileOperation::CreateDirectory { target }));
        }

        if relative == MANIFEST_FILE {
            debug!("Skipping template '{}', it is generated", MANIFEST_FILE);
            return Ok(None);
        }
        if !self.resolver.should_include_file(relative) {
            debug!("Skipping file '{}'", relative);
            return Ok(None);
        }

        match String::from_utf8(fs::read(source)?) {
            Ok(text) => {
                let unterminated = self.engine.unterminated_conditionals(&text);
                let content = self.engine.render(&text);
                Ok(Some(FileOperation::Write { target, content, unterminated }))
            }
            Err(_) => Ok(Some(FileOperation::Copy { target })),
        }
    }

    fn apply(&self, source: &Path, operation: &FileOperation) -> GeneratorResult<()> {
        match operation {
            FileOperation::CreateDirectory { target } => fs::create_dir_all(target)?,
            FileOperation::Write { target, content, .. } => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(target, content)?;
            }
            FileOperation::Copy { target } => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(source, target)?;
            }
        }
        Ok(())
    }

    /// Materializes the whole tree and writes the manifest.
    ///
    /// Paths written so far are pushed into `written` so the caller can roll
    /// back when an error is returned.
    pub fn process(&self, written: &mut Vec<PathBuf>) -> GeneratorResult<GenerationReport> {
        let mut report = GenerationReport::default();
        fs::create_dir_all(&self.output_root)?;

        let mut entries =
            WalkDir::new(&self.template_root).min_depth(1).sort_by_file_name().into_iter();
        while let Some(entry) = entries.next() {
            let entry = entry?;
            let relative = relative_path(&self.template_root, entry.path())?;
            let is_dir = entry.file_type().is_dir();
            debug!("Processing template entry '{}'", relative);

            let Some(operation) = self.plan(&relative, entry.path(), is_dir)? else {
                if is_dir {
                    entries.skip_current_dir();
                }
                report.skipped.push(relative);
                continue;
            };

            if let FileOperation::Write { unterminated, .. } = &operation {
                if !unterminated.is_empty() {
                    warn!(
                        "'{}' has unterminated conditional block(s) for {}; left untouched",
                        relative,
                        unterminated.join(", ")
                    );
                    report.warnings.push(relative.clone());
                }
            }

            // Recorded before writing: a failed write can leave a partial file.
            written.push(operation.target().to_path_buf());
            self.apply(entry.path(), &operation)?;
            if !matches!(operation, FileOperation::CreateDirectory { .. }) {
                report.files.push(relative);
            }
        }

        let manifest_path = self.output_root.join(MANIFEST_FILE);
        let manifest = Manifest::from_resolver(&self.resolver).to_json()?;
        written.push(manifest_path.clone());
        fs::write(&manifest_path, manifest)?;
        report.files.push(MANIFEST_FILE.to_string());

        Ok(report)
    }
}

/// Removes what a failed run left behind.
///
/// A directory created by the run is removed entirely; in a pre-existing one
/// only the paths written by the run are deleted, newest first. Directories
/// that still hold other content are kept.
fn cleanup(output_root: &Path, existed: bool, written: &[PathBuf]) {
    if !existed {
        if let Err(e) = fs::remove_dir_all(output_root) {
            warn!("Failed to clean up '{}': {}", output_root.display(), e);
        }
        return;
    }
    for path in written.iter().rev() {
        let result = if path.is_dir() { fs::remove_dir(path) } else { fs::remove_file(path) };
        match result {
            Ok(()) => debug!("Removed '{}'", path.display()),
            Err(e)
                if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::DirectoryNotEmpty) => {}
            Err(e) => warn!("Failed to remove '{}': {}", path.display(), e),
        }
    }
}

/// Generates a project from `template_root` into `output_root`.
///
/// # Errors
/// * `GeneratorError::CatalogError` if the catalog is inconsistent
/// * `GeneratorError::TemplateDoesNotExistsError` if the template directory is missing
/// * `GeneratorError::OutputDirectoryExistsError` if the output is not empty and `force` is false
/// * Any I/O error from the walk; partial output is removed before returning
pub fn generate_project<P: AsRef<Path>>(
    config: &Configuration,
    catalog: &Catalog,
    template_root: P,
    output_root: P,
    force: bool,
) -> GeneratorResult<GenerationReport> {
    let template_root = template_root.as_ref();
    let output_root = output_root.as_ref();

    catalog.validate()?;
    if !template_root.is_dir() {
        return Err(GeneratorError::TemplateDoesNotExistsError {
            template_dir: template_root.display().to_string(),
        });
    }
    let existed = ensure_output_dir(output_root, force)?;

    let resolver = Resolver::new(config, catalog);
    let mut engine = TemplateEngine::new();
    engine.set_variables(build_variables(config));
    let ignored = parse_ignore_file(template_root)?;

    let processor = Processor::new(resolver, engine, template_root, output_root, ignored);
    let mut written = Vec::new();
    match processor.process(&mut written) {
        Ok(report) => Ok(report),
        Err(e) => {
            warn!("Generation failed ({}), removing partial output", e);
            cleanup(output_root, existed, &written);
            Err(e)
        }
    }
}
