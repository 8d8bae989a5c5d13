//! Feature module catalog and inclusion resolution.
//!
//! A [`Catalog`] lists the always-included files, directories and dependencies
//! plus an ordered set of [`FeatureModule`]s. A [`Resolver`] binds a catalog to
//! one [`Configuration`] and answers what the generated project contains.
//!
//! Path matching compares path segments, never raw substrings: the entry
//! `src/style` matches `src/style/main.less` but not `src/styles`.

use crate::config::{Configuration, StyleDialect};
use crate::error::{GeneratorError, GeneratorResult};
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::path::{Component, Path};

/// Activation predicate of a feature module.
pub type Predicate = fn(&Configuration) -> bool;

/// A named, independently activatable bundle of template paths and packages.
#[derive(Clone)]
pub struct FeatureModule {
    pub name: &'static str,
    pub condition: Predicate,
    pub files: Vec<&'static str>,
    pub directories: Vec<&'static str>,
    pub dependencies: Vec<&'static str>,
    pub dev_dependencies: Vec<&'static str>,
}

impl fmt::Debug for FeatureModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureModule")
            .field("name", &self.name)
            .field("files", &self.files)
            .field("directories", &self.directories)
            .field("dependencies", &self.dependencies)
            .field("dev_dependencies", &self.dev_dependencies)
            .finish_non_exhaustive()
    }
}

impl FeatureModule {
    pub fn new(name: &'static str, condition: Predicate) -> Self {
        Self {
            name,
            condition,
            files: Vec::new(),
            directories: Vec::new(),
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
        }
    }

    pub fn files(mut self, files: &[&'static str]) -> Self {
        self.files = files.to_vec();
        self
    }

    pub fn directories(mut self, directories: &[&'static str]) -> Self {
        self.directories = directories.to_vec();
        self
    }

    pub fn dependencies(mut self, dependencies: &[&'static str]) -> Self {
        self.dependencies = dependencies.to_vec();
        self
    }

    pub fn dev_dependencies(mut self, dev_dependencies: &[&'static str]) -> Self {
        self.dev_dependencies = dev_dependencies.to_vec();
        self
    }

    pub fn is_active(&self, config: &Configuration) -> bool {
        (self.condition)(config)
    }
}

/// Immutable description of everything a template can contribute.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub base_files: Vec<&'static str>,
    pub base_directories: Vec<&'static str>,
    pub base_dependencies: Vec<&'static str>,
    pub base_dev_dependencies: Vec<&'static str>,
    pub modules: Vec<FeatureModule>,
}

impl Catalog {
    /// Standard Vue 3 + Vite + Ant Design Vue catalog.
    pub fn vue() -> Self {
        Self {
            base_files: vec![
                "package.json",
                "vite.config.ts",
                "tsconfig.json",
                "tsconfig.node.json",
                "index.html",
                ".eslintrc.cjs",
                ".gitignore",
                ".prettierrc",
                "README.md",
                "src/main.ts",
                "src/App.vue",
                "src/components/HelloWorld.vue",
            ],
            base_directories: vec!["public", "src", "src/components"],
            base_dependencies: vec!["vue", "ant-design-vue", "@ant-design/icons-vue"],
            base_dev_dependencies: vec![
                "@types/node",
                "@typescript-eslint/eslint-plugin",
                "@typescript-eslint/parser",
                "@vitejs/plugin-vue",
                "eslint",
                "eslint-plugin-vue",
                "prettier",
                "typescript",
                "vite",
                "vue-tsc",
            ],
            modules: vec![
                FeatureModule::new("vue-router", |c| c.use_router)
                    .files(&["src/router/index.ts", "src/views/Home.vue", "src/views/About.vue"])
                    .directories(&["src/router", "src/views"])
                    .dependencies(&["vue-router"]),
                FeatureModule::new("pinia", |c| c.use_pinia)
                    .files(&["src/stores/counter.ts"])
                    .directories(&["src/stores"])
                    .dependencies(&["pinia"]),
                FeatureModule::new("scss", |c| c.css_preprocessor == StyleDialect::Scss)
                    .files(&["src/style/main.scss"])
                    .directories(&["src/style"])
                    .dev_dependencies(&["sass"]),
                FeatureModule::new("less", |c| c.css_preprocessor == StyleDialect::Less)
                    .files(&["src/style/main.less"])
                    .directories(&["src/style"])
                    .dev_dependencies(&["less"]),
            ],
        }
    }

    /// Rejects catalogs where one file path is contributed more than once.
    ///
    /// Inclusion must not depend on module order, so a file may belong either
    /// to the base set or to exactly one module.
    pub fn validate(&self) -> GeneratorResult<()> {
        let mut owners: IndexMap<Vec<String>, &str> = IndexMap::new();
        let base = self.base_files.iter().map(|f| ("base", *f));
        let modules = self.modules.iter().flat_map(|m| m.files.iter().map(move |f| (m.name, *f)));

        for (owner, file) in base.chain(modules) {
            let key = segments(file);
            if key.is_empty() {
                return Err(GeneratorError::CatalogError(format!("'{}' lists an empty file path", owner)));
            }
            if let Some(previous) = owners.insert(key, owner) {
                return Err(GeneratorError::CatalogError(format!(
                    "file '{}' is contributed by both '{}' and '{}'",
                    file, previous, owner
                )));
            }
        }
        Ok(())
    }

    fn claims_file(&self, path: &[String]) -> bool {
        self.base_files
            .iter()
            .chain(self.modules.iter().flat_map(|m| m.files.iter()))
            .any(|entry| segments(entry) == path)
    }
}

/// Splits a path into its normal segments, ignoring empty and `.` components
/// and accepting both `/` and `\` as separators.
pub fn segments(path: &str) -> Vec<String> {
    let normalized = path.replace('\\', "/");
    Path::new(&normalized)
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

fn is_at_or_under(path: &[String], entry: &[String]) -> bool {
    path.starts_with(entry)
}

fn dedup<'a>(items: impl IntoIterator<Item = &'a &'static str>) -> Vec<&'static str> {
    items.into_iter().copied().collect::<IndexSet<_>>().into_iter().collect()
}

/// Resolves a catalog against one configuration.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    config: &'a Configuration,
    catalog: &'a Catalog,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a Configuration, catalog: &'a Catalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &'a Configuration {
        self.config
    }

    /// Active modules in catalog order.
    pub fn active_modules(&self) -> Vec<&'a FeatureModule> {
        self.catalog.modules.iter().filter(|m| m.is_active(self.config)).collect()
    }

    pub fn files_to_include(&self) -> Vec<&'static str> {
        let active = self.active_modules();
        dedup(self.catalog.base_files.iter().chain(active.iter().flat_map(|m| m.files.iter())))
    }

    pub fn directories_to_include(&self) -> Vec<&'static str> {
        let active = self.active_modules();
        dedup(
            self.catalog
                .base_directories
                .iter()
                .chain(active.iter().flat_map(|m| m.directories.iter())),
        )
    }

    pub fn dependencies(&self) -> Vec<&'static str> {
        let active = self.active_modules();
        dedup(
            self.catalog
                .base_dependencies
                .iter()
                .chain(active.iter().flat_map(|m| m.dependencies.iter())),
        )
    }

    pub fn dev_dependencies(&self) -> Vec<&'static str> {
        let active = self.active_modules();
        dedup(
            self.catalog
                .base_dev_dependencies
                .iter()
                .chain(active.iter().flat_map(|m| m.dev_dependencies.iter())),
        )
    }

    /// Directories declared by modules that are all inactive.
    fn withheld_directories(&self, included: &[Vec<String>]) -> Vec<Vec<String>> {
        self.catalog
            .modules
            .iter()
            .filter(|m| !m.is_active(self.config))
            .flat_map(|m| m.directories.iter())
            .map(|d| segments(d))
            .filter(|d| !included.contains(d))
            .collect()
    }

    /// Whether a directory of the template tree should be materialized.
    ///
    /// A directory is kept when it leads to an included directory, or when it
    /// sits under an included directory (the template root always counts)
    /// without entering a directory that only inactive modules declare.
    pub fn should_include_directory(&self, path: &str) -> bool {
        let dir = segments(path);
        if dir.is_empty() {
            return true;
        }
        let included: Vec<Vec<String>> =
            self.directories_to_include().iter().map(|d| segments(d)).collect();

        if included.iter().any(|entry| is_at_or_under(entry, &dir)) {
            return true;
        }
        !self.withheld_directories(&included).iter().any(|w| is_at_or_under(&dir, w))
    }

    /// Whether a file of the template tree should be materialized.
    ///
    /// Files listed in the catalog follow their owner's activation. Files the
    /// catalog does not mention are kept whenever their directory is.
    pub fn should_include_file(&self, path: &str) -> bool {
        let file = segments(path);
        if file.is_empty() {
            return false;
        }
        let listed = self.files_to_include();
        if listed.iter().any(|entry| is_at_or_under(&file, &segments(entry))) {
            return true;
        }
        if self.catalog.claims_file(&file) {
            return false;
        }
        let parent = &file[..file.len() - 1];
        parent.is_empty() || self.should_include_directory(&parent.join("/"))
    }
}
