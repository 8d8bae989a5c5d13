//! Interactive collection of the project [`Configuration`].
//! The [`Prompter`] trait separates the questions from the terminal backend
//! so the flow can be driven without a TTY.

use crate::config::{validate_project_name, Configuration, StyleDialect};
use crate::error::{GeneratorError, GeneratorResult};
use dialoguer::{Confirm, Input, Select};

/// Backend that answers the generator's questions.
pub trait Prompter {
    /// Free text answer with a default and a validator returning the rejection reason.
    fn input(
        &self,
        prompt: &str,
        default: &str,
        validate: fn(&str) -> std::result::Result<(), String>,
    ) -> GeneratorResult<String>;

    /// Index of the chosen item.
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> GeneratorResult<usize>;

    fn confirm(&self, prompt: &str, default: bool) -> GeneratorResult<bool>;
}

/// Terminal prompts backed by `dialoguer`.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn input(
        &self,
        prompt: &str,
        default: &str,
        validate: fn(&str) -> std::result::Result<(), String>,
    ) -> GeneratorResult<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .validate_with(move |input: &String| validate(&normalize_name(input)))
            .interact_text()
            .map(|answer| normalize_name(&answer))
            .map_err(|e| GeneratorError::PromptError(e.to_string()))
    }

    fn select(&self, prompt: &str, items: &[&str], default: usize) -> GeneratorResult<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(|e| GeneratorError::PromptError(e.to_string()))
    }

    fn confirm(&self, prompt: &str, default: bool) -> GeneratorResult<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| GeneratorError::PromptError(e.to_string()))
    }
}

/// Project names are trimmed and lower-cased before validation.
pub fn normalize_name(input: &str) -> String {
    input.trim().to_lowercase()
}

const DIALECT_LABELS: [&str; 3] = ["SCSS", "Less", "None"];

/// Asks for every configuration field, starting from `defaults`.
pub fn collect_configuration(
    prompt: &dyn Prompter,
    defaults: &Configuration,
) -> GeneratorResult<Configuration> {
    let project_name =
        prompt.input("Project name", &defaults.project_name, validate_project_name)?;

    let default_dialect = StyleDialect::ALL
        .iter()
        .position(|d| *d == defaults.css_preprocessor)
        .unwrap_or(0);
    let dialect = prompt.select("Select CSS preprocessor", &DIALECT_LABELS, default_dialect)?;
    let css_preprocessor = StyleDialect::ALL.get(dialect).copied().unwrap_or_default();

    let use_pinia = prompt.confirm("Add Pinia for state management?", defaults.use_pinia)?;
    let use_router = prompt.confirm("Add Vue Router for routing?", defaults.use_router)?;

    Ok(Configuration::new(project_name, css_preprocessor, use_pinia, use_router))
}

/// Human-readable summary shown before confirmation.
pub fn describe_configuration(config: &Configuration) -> String {
    let yes_no = |b: bool| if b { "Yes" } else { "No" };
    format!(
        "  Project name: {}\n  CSS preprocessor: {}\n  Pinia: {}\n  Vue Router: {}",
        config.project_name,
        config.css_preprocessor.as_str().to_uppercase(),
        yes_no(config.use_pinia),
        yes_no(config.use_router)
    )
}

/// Collects answers until the user confirms them.
///
/// Returns `Ok(None)` when the user declines and does not want to reconfigure.
pub fn interactive_configuration(
    prompt: &dyn Prompter,
    defaults: &Configuration,
) -> GeneratorResult<Option<Configuration>> {
    let mut current = defaults.clone();
    loop {
        current = collect_configuration(prompt, &current)?;
        println!("\nProject configuration summary:\n{}", describe_configuration(&current));
        if prompt.confirm("Is this configuration correct?", true)? {
            return Ok(Some(current));
        }
        if !prompt.confirm("Would you like to reconfigure the project?", true)? {
            return Ok(None);
        }
    }
}
