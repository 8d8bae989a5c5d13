//! `package.json` generation.
//! Dependency identifiers resolved by the [`Resolver`] are mapped to version
//! ranges through a fixed table; identifiers without a known version are
//! omitted from the manifest.

use crate::error::GeneratorResult;
use crate::modules::Resolver;
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

/// Identifier to version-range table used for the generated manifest.
pub const VERSIONS: [(&str, &str); 17] = [
    ("vue", "^3.4.0"),
    ("ant-design-vue", "^4.0.0"),
    ("vue-router", "^4.2.0"),
    ("pinia", "^2.1.0"),
    ("@ant-design/icons-vue", "^7.0.0"),
    ("@types/node", "^20.0.0"),
    ("@typescript-eslint/eslint-plugin", "^6.0.0"),
    ("@typescript-eslint/parser", "^6.0.0"),
    ("@vitejs/plugin-vue", "^4.5.0"),
    ("eslint", "^8.45.0"),
    ("eslint-plugin-vue", "^9.17.0"),
    ("prettier", "^3.0.0"),
    ("typescript", "^5.2.0"),
    ("vite", "^5.0.0"),
    ("vue-tsc", "^1.8.0"),
    ("sass", "^1.69.0"),
    ("less", "^4.2.0"),
];

const SCRIPTS: [(&str, &str); 5] = [
    ("dev", "vite"),
    ("build", "vue-tsc && vite build"),
    ("preview", "vite preview"),
    ("lint", "eslint . --ext vue,js,jsx,ts,tsx --fix"),
    ("format", "prettier --write src/"),
];

/// Looks up the version range of a package identifier.
pub fn version_of(identifier: &str) -> Option<&'static str> {
    VERSIONS.iter().find(|(name, _)| *name == identifier).map(|(_, version)| *version)
}

/// Builds an ordered dependency object, dropping unknown identifiers.
pub fn dependency_object(identifiers: &[&str]) -> IndexMap<String, String> {
    identifiers
        .iter()
        .filter_map(|id| match version_of(id) {
            Some(version) => Some((id.to_string(), version.to_string())),
            None => {
                debug!("No known version for '{}', leaving it out of the manifest", id);
                None
            }
        })
        .collect()
}

/// The generated `package.json`. Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: String,
    pub private: bool,
    pub version: String,
    #[serde(rename = "type")]
    pub module_type: String,
    pub scripts: IndexMap<String, String>,
    pub dependencies: IndexMap<String, String>,
    pub dev_dependencies: IndexMap<String, String>,
}

impl Manifest {
    pub fn from_resolver(resolver: &Resolver) -> Self {
        Self {
            name: resolver.config().project_name.clone(),
            private: true,
            version: "0.0.0".to_string(),
            module_type: "module".to_string(),
            scripts: SCRIPTS.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            dependencies: dependency_object(&resolver.dependencies()),
            dev_dependencies: dependency_object(&resolver.dev_dependencies()),
        }
    }

    /// Pretty-printed JSON with two-space indentation and a trailing newline.
    pub fn to_json(&self) -> GeneratorResult<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}
