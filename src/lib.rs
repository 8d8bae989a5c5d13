//! create-vue-template generates Vue 3 project skeletons from a template tree.
//! A configuration selects the feature modules; the resolver turns them into
//! the files, directories and dependencies to materialize, and the template
//! engine rewrites every included file.

/// Command-line interface module
pub mod cli;

/// Project configuration, presets and name validation
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling
pub mod error;

/// Ignore patterns for template trees (.templateignore)
pub mod ignore;

/// Logger initialization for the binary
pub mod logger;

/// `package.json` generation from the resolved dependency sets
pub mod manifest;

/// Feature module catalog and inclusion resolution
pub mod modules;

/// Template tree materialization
/// Combines all components to generate the final output
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Variable substitution and conditional blocks
pub mod template;

/// Variable map construction, including name casing
pub mod variables;
