use std::fs;
use std::path::{Path, PathBuf};

use create_vue_template::config::{Configuration, StyleDialect};
use create_vue_template::constants::MANIFEST_FILE;
use create_vue_template::error::GeneratorError;
use create_vue_template::ignore::parse_ignore_file;
use create_vue_template::modules::{Catalog, FeatureModule, Resolver};
use create_vue_template::processor::{
    ensure_output_dir, generate_project, relative_path, FileOperation, Processor,
};
use create_vue_template::template::TemplateEngine;
use create_vue_template::variables::build_variables_for_year;
use tempfile::TempDir;

fn bundled_templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

fn demo_config() -> Configuration {
    Configuration::new("demo-app", StyleDialect::Less, true, false)
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn test_ensure_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    // Non-existent directory
    assert!(!ensure_output_dir(path.join("new_dir"), false).unwrap());

    // Existing empty directory is accepted
    assert!(ensure_output_dir(path, false).unwrap());

    // Existing non-empty directory without force
    fs::write(path.join("file.txt"), "x").unwrap();
    assert!(matches!(
        ensure_output_dir(path, false),
        Err(GeneratorError::OutputDirectoryExistsError { .. })
    ));

    // Existing non-empty directory with force
    assert!(ensure_output_dir(path, true).unwrap());
}

#[test]
fn test_relative_path() {
    let root = Path::new("/tmp/template");
    assert_eq!(relative_path(root, &root.join("src").join("main.ts")).unwrap(), "src/main.ts");
    assert!(relative_path(root, Path::new("/elsewhere/file")).is_err());
}

#[test]
fn test_plan() {
    let template = TempDir::new().unwrap();
    fs::create_dir_all(template.path().join("src/router")).unwrap();
    fs::write(template.path().join("src/main.ts"), "app {{projectName}}").unwrap();

    let catalog = Catalog::vue();
    let config = demo_config();
    let engine = TemplateEngine::with_variables(build_variables_for_year(&config, 2026));
    let ignored = parse_ignore_file(template.path()).unwrap();
    let processor = Processor::new(
        Resolver::new(&config, &catalog),
        engine,
        template.path(),
        Path::new("out"),
        ignored,
    );

    let op = processor.plan("src/main.ts", &template.path().join("src/main.ts"), false).unwrap();
    assert_eq!(
        op,
        Some(FileOperation::Write {
            target: PathBuf::from("out/src/main.ts"),
            content: "app demo-app".to_string(),
            unterminated: vec![],
        })
    );

    let router = template.path().join("src/router");
    assert_eq!(processor.plan("src/router", &router, true).unwrap(), None);
    assert_eq!(processor.plan(".DS_Store", &template.path().join(".DS_Store"), false).unwrap(), None);
    assert_eq!(processor.plan(MANIFEST_FILE, &template.path().join(MANIFEST_FILE), false).unwrap(), None);
}

#[test_log::test]
fn test_generate_demo_app() {
    let output = TempDir::new().unwrap();
    let out = output.path().join("demo-app");
    let catalog = Catalog::vue();

    let report = generate_project(&demo_config(), &catalog, bundled_templates(), out.clone(), false)
        .unwrap();

    assert!(out.join("src/stores/counter.ts").is_file());
    assert!(out.join("src/style/main.less").is_file());
    assert!(out.join("env.d.ts").is_file());
    assert!(!out.join("src/style/main.scss").exists());
    assert!(!out.join("src/router").exists());
    assert!(!out.join("src/views").exists());
    assert!(report.warnings.is_empty());
    assert!(report.skipped.iter().any(|s| s == "src/router"));
    assert_eq!(report.files.last().map(String::as_str), Some(MANIFEST_FILE));

    let main_ts = read(&out, "src/main.ts");
    assert!(main_ts.contains("import { createPinia } from 'pinia'"));
    assert!(main_ts.contains("import './style/main.less'"));
    assert!(!main_ts.contains("router"));
    assert!(!main_ts.contains("main.scss"));
    assert!(!main_ts.contains("{{"));

    let store = read(&out, "src/stores/counter.ts");
    assert!(store.contains("ref('demo-app')"));

    // Vue interpolations are not generator variables and survive untouched.
    let hello = read(&out, "src/components/HelloWorld.vue");
    assert!(hello.contains("{{ clicks }}"));
    assert!(hello.contains("{{ counter.count }}"));

    let manifest: serde_json::Value = serde_json::from_str(&read(&out, MANIFEST_FILE)).unwrap();
    assert_eq!(manifest["name"], "demo-app");
    assert_eq!(manifest["private"], true);
    assert_eq!(manifest["type"], "module");
    assert_eq!(manifest["dependencies"]["pinia"], "^2.1.0");
    assert!(manifest["dependencies"].get("vue-router").is_none());
    assert_eq!(manifest["devDependencies"]["less"], "^4.2.0");
    assert!(manifest["devDependencies"].get("sass").is_none());
}

#[test]
fn test_generate_with_router_and_scss() {
    let output = TempDir::new().unwrap();
    let out = output.path().join("full-app");
    let config = Configuration::new("full-app", StyleDialect::Scss, false, true);

    generate_project(&config, &Catalog::vue(), bundled_templates(), out.clone(), false).unwrap();

    assert!(out.join("src/router/index.ts").is_file());
    assert!(out.join("src/views/Home.vue").is_file());
    assert!(out.join("src/style/main.scss").is_file());
    assert!(!out.join("src/stores").exists());

    let router = read(&out, "src/router/index.ts");
    assert!(router.contains("- FullApp`"));
    let main_ts = read(&out, "src/main.ts");
    assert!(main_ts.contains("app.use(router)"));
    assert!(!main_ts.contains("pinia"));
}

#[test]
fn test_generation_is_deterministic() {
    let output = TempDir::new().unwrap();
    let (a, b) = (output.path().join("a"), output.path().join("b"));
    let config = demo_config();
    let catalog = Catalog::vue();

    generate_project(&config, &catalog, bundled_templates(), a.clone(), false).unwrap();
    generate_project(&config, &catalog, bundled_templates(), b.clone(), false).unwrap();

    assert!(!dir_diff::is_different(&a, &b).unwrap());
}

#[test]
fn test_existing_output_is_rejected() {
    let output = TempDir::new().unwrap();
    fs::write(output.path().join("keep.txt"), "mine").unwrap();

    let result = generate_project(
        &demo_config(),
        &Catalog::vue(),
        bundled_templates(),
        output.path().to_path_buf(),
        false,
    );
    assert!(matches!(result, Err(GeneratorError::OutputDirectoryExistsError { .. })));
    assert_eq!(read(output.path(), "keep.txt"), "mine");
}

#[test]
fn test_missing_template_dir() {
    let output = TempDir::new().unwrap();
    let result = generate_project(
        &demo_config(),
        &Catalog::vue(),
        output.path().join("no-such-template"),
        output.path().join("out"),
        false,
    );
    assert!(matches!(result, Err(GeneratorError::TemplateDoesNotExistsError { .. })));
}

#[test]
fn test_invalid_catalog_is_rejected() {
    let template = TempDir::new().unwrap();
    let mut catalog = Catalog::vue();
    catalog.modules.push(FeatureModule::new("clash", |_| true).files(&["src/main.ts"]));

    let result = generate_project(
        &demo_config(),
        &catalog,
        template.path().to_path_buf(),
        template.path().join("out"),
        false,
    );
    assert!(matches!(result, Err(GeneratorError::CatalogError(_))));
}

#[test]
fn test_binary_files_are_copied_verbatim() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let bytes = [0xff_u8, 0xfe, 0x00, b'{', b'{'];
    fs::create_dir_all(template.path().join("public")).unwrap();
    fs::write(template.path().join("public/logo.bin"), bytes).unwrap();

    let out = output.path().join("app");
    generate_project(&demo_config(), &Catalog::vue(), template.path().to_path_buf(), out.clone(), false)
        .unwrap();

    assert_eq!(fs::read(out.join("public/logo.bin")).unwrap(), bytes);
}

#[test]
fn test_template_manifest_is_replaced() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(template.path().join(MANIFEST_FILE), "{\"name\": \"{{projectName}}\"}").unwrap();

    let out = output.path().join("app");
    generate_project(&demo_config(), &Catalog::vue(), template.path().to_path_buf(), out.clone(), false)
        .unwrap();

    let manifest = read(&out, MANIFEST_FILE);
    assert!(manifest.contains("\"devDependencies\""));
}

#[test_log::test]
fn test_unterminated_conditionals_are_reported() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(template.path().join("broken.txt"), "a {{#if usePinia}} b").unwrap();

    let out = output.path().join("app");
    let report = generate_project(
        &demo_config(),
        &Catalog::vue(),
        template.path().to_path_buf(),
        out.clone(),
        false,
    )
    .unwrap();

    assert_eq!(report.warnings, vec!["broken.txt".to_string()]);
    assert_eq!(read(&out, "broken.txt"), "a {{#if usePinia}} b");
}

#[test]
fn test_ignore_file_is_honored() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(template.path().join(".templateignore"), "*.swp\n").unwrap();
    fs::write(template.path().join("notes.swp"), "x").unwrap();
    fs::write(template.path().join("kept.md"), "{{projectNamePascal}}").unwrap();

    let out = output.path().join("app");
    generate_project(&demo_config(), &Catalog::vue(), template.path().to_path_buf(), out.clone(), false)
        .unwrap();

    assert!(!out.join("notes.swp").exists());
    assert!(!out.join(".templateignore").exists());
    assert_eq!(read(&out, "kept.md"), "DemoApp");
}

#[cfg(unix)]
#[test]
fn test_partial_output_is_removed_on_failure() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(template.path().join("a.txt"), "first").unwrap();
    std::os::unix::fs::symlink(
        template.path().join("missing-target"),
        template.path().join("zz-broken-link"),
    )
    .unwrap();

    // Output directory created by the run is removed entirely.
    let out = output.path().join("app");
    let result =
        generate_project(&demo_config(), &Catalog::vue(), template.path().to_path_buf(), out.clone(), false);
    assert!(matches!(result, Err(GeneratorError::IoError(_))));
    assert!(!out.exists());

    // A pre-existing empty directory is kept, but emptied again.
    let existing = output.path().join("existing");
    fs::create_dir(&existing).unwrap();
    let result = generate_project(
        &demo_config(),
        &Catalog::vue(),
        template.path().to_path_buf(),
        existing.clone(),
        false,
    );
    assert!(result.is_err());
    assert!(existing.is_dir());
    assert_eq!(fs::read_dir(&existing).unwrap().count(), 0);
}

#[test]
fn test_failed_write_in_forced_output_is_rolled_back() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(template.path().join("a.txt"), "first").unwrap();
    fs::write(template.path().join("b.txt"), "second").unwrap();

    // A directory where the run wants to write a file makes that write fail.
    fs::create_dir(output.path().join("b.txt")).unwrap();
    fs::write(output.path().join("b.txt/user.md"), "mine").unwrap();

    let result = generate_project(
        &demo_config(),
        &Catalog::vue(),
        template.path().to_path_buf(),
        output.path().to_path_buf(),
        true,
    );

    assert!(matches!(result, Err(GeneratorError::IoError(_))));
    assert!(!output.path().join("a.txt").exists());
    assert!(!output.path().join(MANIFEST_FILE).exists());
    assert_eq!(read(output.path(), "b.txt/user.md"), "mine");
}
