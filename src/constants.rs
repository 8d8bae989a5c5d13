//! Common constants used throughout the generator.

/// Project name used when none is supplied
pub const DEFAULT_PROJECT_NAME: &str = "my-vue-app";

/// Template tree location used when `--template-dir` is not given
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// File name of the generated manifest
pub const MANIFEST_FILE: &str = "package.json";

/// Optional ignore file read from the template root
pub const IGNORE_FILE: &str = ".templateignore";

/// Patterns that are never materialized
pub const DEFAULT_IGNORE_PATTERNS: [&str; 4] =
    ["**/.DS_Store", "**/.git", "**/.git/**", ".templateignore"];

/// Longest project name accepted by the npm registry
pub const MAX_PROJECT_NAME_LEN: usize = 214;

/// Names that would collide with npm or repository metadata
pub const RESERVED_NAMES: [&str; 10] = [
    "node_modules",
    "favicon.ico",
    "package.json",
    "package-lock.json",
    "yarn.lock",
    ".git",
    ".gitignore",
    "readme",
    "license",
    "changelog",
];
