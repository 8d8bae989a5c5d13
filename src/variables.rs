//! Variable map construction for the rewriter.
//! Flattens a [`Configuration`] into named values, adding presentation forms
//! of the project name and environment-derived values.

use crate::config::{Configuration, StyleDialect};
use chrono::Datelike;
use cruet::Inflector;
use indexmap::IndexMap;
use serde_json::Value;

/// Flat, ordered variable set consumed by [`crate::template::TemplateEngine`].
pub type Variables = IndexMap<String, Value>;

/// Splits a name on runs of hyphens, underscores and whitespace, skipping empty segments.
fn name_segments(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| c == '-' || c == '_' || c.is_whitespace()).filter(|s| !s.is_empty())
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `my-vue-app` -> `MyVueApp`
pub fn to_pascal_case(name: &str) -> String {
    name_segments(name).map(capitalize).collect()
}

/// `my-vue-app` -> `myVueApp`
pub fn to_camel_case(name: &str) -> String {
    let pascal = to_pascal_case(name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds the variable map for one generation run.
///
/// The year is taken as a parameter so callers and tests control the clock;
/// [`build_variables`] supplies the current one.
pub fn build_variables_for_year(config: &Configuration, year: i32) -> Variables {
    let name = config.project_name.as_str();
    let mut vars = Variables::new();

    vars.insert("projectName".into(), Value::from(name));
    vars.insert("cssPreprocessor".into(), Value::from(config.css_preprocessor.as_str()));
    vars.insert("usePinia".into(), Value::from(config.use_pinia));
    vars.insert("useRouter".into(), Value::from(config.use_router));

    vars.insert("projectNamePascal".into(), Value::from(to_pascal_case(name)));
    vars.insert("projectNameCamel".into(), Value::from(to_camel_case(name)));
    vars.insert("projectNameSnake".into(), Value::from(name.to_snake_case()));
    vars.insert("projectTitle".into(), Value::from(name.to_title_case()));

    vars.insert("hasScss".into(), Value::from(config.css_preprocessor == StyleDialect::Scss));
    vars.insert("hasLess".into(), Value::from(config.css_preprocessor == StyleDialect::Less));
    vars.insert("currentYear".into(), Value::from(year));
    vars
}

pub fn build_variables(config: &Configuration) -> Variables {
    build_variables_for_year(config, chrono::Local::now().year())
}
