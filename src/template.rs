//! Variable substitution and conditional block evaluation.
//!
//! Supported syntax:
//! - `{{ name }}` is replaced with the value of `name`. Unknown names are left as-is.
//! - `{{#if name}} ... {{/if}}` keeps its body when `name` is truthy, otherwise
//!   the whole block is dropped. No `else`, no nesting.
//!
//! Tags are paired in one left-to-right pass: an opening tag closes at the
//! next `{{/if}}` unless another opening tag comes first. Openers that never
//! close stay in the output verbatim and are reported by
//! [`TemplateEngine::unterminated_conditionals`].
//!
//! Conditionals are evaluated against the variable map before any placeholder
//! is substituted, so substituted text can never be mistaken for block syntax.

use crate::variables::Variables;
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

/// Variable names accepted by both placeholders and conditionals.
const IDENTIFIER: &str = r"[A-Za-z_][A-Za-z0-9_]*";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&[r"\{\{\s*(", IDENTIFIER, r")\s*\}\}"].concat())
        .expect("Invalid placeholder regex")
});

/// `{{#if name}}` (group 1 holds the name) or `{{/if}}`.
static CONDITIONAL_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&[r"\{\{#if\s+(", IDENTIFIER, r")\s*\}\}|\{\{/if\}\}"].concat())
        .expect("Invalid conditional tag regex")
});

/// Canonical text form of a variable value.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Truthiness used by `{{#if}}`: non-empty strings, non-zero numbers and `true`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Null => false,
    }
}

/// Template rewriter bound to one variable map.
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    variables: Variables,
}

impl TemplateEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variables(variables: Variables) -> Self {
        Self { variables }
    }

    /// Installs the active variable map, replacing any previous one.
    pub fn set_variables(&mut self, variables: Variables) {
        self.variables = variables;
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Rewrites `template`: conditional blocks first, then placeholders.
    ///
    /// Never fails. Unterminated blocks stay in the output verbatim; callers
    /// that want to report them use [`Self::unterminated_conditionals`].
    pub fn render(&self, template: &str) -> String {
        let (stripped, _) = self.evaluate_conditionals(template);
        self.substitute(&stripped)
    }

    /// Names of `{{#if}}` blocks that have no closing `{{/if}}`, in order.
    pub fn unterminated_conditionals(&self, template: &str) -> Vec<String> {
        self.evaluate_conditionals(template).1
    }

    /// Resolves every complete block and returns the remaining text together
    /// with the names of the openers that could not be paired.
    fn evaluate_conditionals(&self, template: &str) -> (String, Vec<String>) {
        let mut out = String::with_capacity(template.len());
        let mut unterminated = Vec::new();
        let mut cursor = 0;
        // Opening tag start, body start and name of the block being read.
        let mut open: Option<(usize, usize, &str)> = None;

        for caps in CONDITIONAL_TAG.captures_iter(template) {
            let tag = caps.get_match();
            match (caps.get(1), open.take()) {
                (Some(name), pending) => {
                    match pending {
                        Some((start, _, previous)) => {
                            out.push_str(&template[start..tag.start()]);
                            unterminated.push(previous.to_string());
                        }
                        None => out.push_str(&template[cursor..tag.start()]),
                    }
                    open = Some((tag.start(), tag.end(), name.as_str()));
                }
                (None, Some((_, body, name))) => {
                    if self.variables.get(name).is_some_and(is_truthy) {
                        out.push_str(&template[body..tag.start()]);
                    }
                }
                // A stray `{{/if}}` is plain text.
                (None, None) => out.push_str(&template[cursor..tag.end()]),
            }
            cursor = tag.end();
        }

        match open {
            Some((start, _, name)) => {
                out.push_str(&template[start..]);
                unterminated.push(name.to_string());
            }
            None => out.push_str(&template[cursor..]),
        }
        (out, unterminated)
    }

    fn substitute(&self, text: &str) -> String {
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| match self.variables.get(&caps[1]) {
                Some(value) => value_to_text(value),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}
