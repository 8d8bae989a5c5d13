//! Project configuration: the single input of a generation run.
//! Answers can be collected interactively, taken from presets, or parsed from
//! JSON/YAML supplied on stdin.

use crate::constants::{DEFAULT_PROJECT_NAME, MAX_PROJECT_NAME_LEN, RESERVED_NAMES};
use crate::error::{GeneratorError, GeneratorResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Style-sheet dialect of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleDialect {
    #[default]
    Scss,
    Less,
    None,
}

impl StyleDialect {
    pub const ALL: [StyleDialect; 3] = [StyleDialect::Scss, StyleDialect::Less, StyleDialect::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleDialect::Scss => "scss",
            StyleDialect::Less => "less",
            StyleDialect::None => "none",
        }
    }
}

impl fmt::Display for StyleDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StyleDialect {
    type Err = GeneratorError;

    fn from_str(s: &str) -> GeneratorResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "scss" => Ok(StyleDialect::Scss),
            "less" => Ok(StyleDialect::Less),
            "none" => Ok(StyleDialect::None),
            other => Err(GeneratorError::ConfigError(format!(
                "unknown CSS preprocessor '{}' (expected scss, less or none)",
                other
            ))),
        }
    }
}

/// Named sets of defaults used when prompts are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Preset {
    /// Bare Vue + Ant Design Vue project
    #[default]
    Basic,
    /// Basic plus Pinia and Vue Router
    Full,
}

/// Validated user choices driving one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub project_name: String,
    #[serde(default)]
    pub css_preprocessor: StyleDialect,
    #[serde(default)]
    pub use_pinia: bool,
    #[serde(default)]
    pub use_router: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::from_preset(DEFAULT_PROJECT_NAME, Preset::Basic)
    }
}

impl Configuration {
    pub fn new<S: Into<String>>(
        project_name: S,
        css_preprocessor: StyleDialect,
        use_pinia: bool,
        use_router: bool,
    ) -> Self {
        Self { project_name: project_name.into(), css_preprocessor, use_pinia, use_router }
    }

    pub fn from_preset<S: Into<String>>(project_name: S, preset: Preset) -> Self {
        let full = preset == Preset::Full;
        Self::new(project_name, StyleDialect::Scss, full, full)
    }

    /// Parses answers given as JSON or YAML and validates the result.
    ///
    /// # Errors
    /// * `GeneratorError::ConfigError` if the content is neither valid JSON nor YAML;
    ///   content starting with `{` reports the JSON error
    /// * `GeneratorError::ValidationError` if the project name is rejected
    pub fn from_answers(content: &str) -> GeneratorResult<Self> {
        let config: Configuration = match serde_json::from_str(content) {
            Ok(config) => config,
            // Object literals are only ever parsed as JSON.
            Err(json_err) if content.trim_start().starts_with('{') => {
                return Err(GeneratorError::ConfigError(format!(
                    "Invalid JSON answers: {}",
                    json_err
                )));
            }
            Err(json_err) => {
                debug!("Answers are not JSON ({}), trying YAML", json_err);
                serde_yaml::from_str(content).map_err(|e| {
                    GeneratorError::ConfigError(format!("Invalid answers format: {}", e))
                })?
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GeneratorResult<()> {
        validate_project_name(&self.project_name).map_err(GeneratorError::ValidationError)
    }
}

/// Checks a project name against the npm package naming rules.
///
/// Returns the reason for rejection as the error value so that prompts can
/// display it directly.
pub fn validate_project_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("Project name cannot be empty".to_string());
    }
    if name.len() > MAX_PROJECT_NAME_LEN {
        return Err(format!(
            "Project name must be {} characters or less",
            MAX_PROJECT_NAME_LEN
        ));
    }
    if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err("Project name must start with a letter".to_string());
    }
    if !name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(
            "Project name can only contain lowercase letters, numbers, and hyphens".to_string()
        );
    }
    if name.ends_with('-') {
        return Err("Project name cannot end with a hyphen".to_string());
    }
    if name.contains("--") {
        return Err("Project name cannot contain consecutive hyphens".to_string());
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(format!("\"{}\" is a reserved name and cannot be used", name));
    }
    Ok(())
}
