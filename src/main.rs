//! create-vue-template entry point.
//! Handles argument parsing, configuration collection and drives the
//! generation of the project tree.

use std::io::Read;
use std::path::PathBuf;

use create_vue_template::{
    cli::{get_args, Args},
    config::{validate_project_name, Configuration},
    constants::DEFAULT_PROJECT_NAME,
    error::{default_error_handler, GeneratorError, GeneratorResult},
    logger::init_logger,
    modules::{Catalog, Resolver},
    processor::generate_project,
    prompt::{describe_configuration, interactive_configuration, DialoguerPrompter},
};

fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Builds the configuration from stdin answers, presets or prompts.
///
/// Returns `Ok(None)` when the user cancels.
fn resolve_configuration(args: &Args) -> GeneratorResult<Option<Configuration>> {
    if let Some(name) = &args.project_name {
        validate_project_name(name).map_err(GeneratorError::ValidationError)?;
    }

    if args.stdin {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        let mut config = Configuration::from_answers(&buffer)?;
        if let Some(name) = &args.project_name {
            config.project_name = name.clone();
        }
        if let Some(style) = args.style {
            config.css_preprocessor = style;
        }
        return Ok(Some(config));
    }

    let name = args.project_name.as_deref().unwrap_or(DEFAULT_PROJECT_NAME);
    let mut defaults = Configuration::from_preset(name, args.template);
    if let Some(style) = args.style {
        defaults.css_preprocessor = style;
    }

    if args.skip_prompts {
        println!("Using default configuration (prompts skipped)");
        return Ok(Some(defaults));
    }
    interactive_configuration(&DialoguerPrompter::new(), &defaults)
}

/// Main application logic execution.
///
/// # Flow
/// 1. Collects the configuration
/// 2. Resolves feature modules against the standard catalog
/// 3. Materializes the template tree and writes package.json
/// 4. Prints the enabled features and next steps
fn run(args: Args) -> GeneratorResult<()> {
    println!("Vue Template Generator");

    let Some(config) = resolve_configuration(&args)? else {
        println!("Project generation cancelled.");
        return Ok(());
    };
    println!("\nFinal configuration:\n{}", describe_configuration(&config));

    let output_dir =
        args.output_dir.clone().unwrap_or_else(|| PathBuf::from(".").join(&config.project_name));
    let catalog = Catalog::vue();

    println!("\nGenerating project...");
    let report = generate_project(&config, &catalog, &args.template_dir, &output_dir, args.force)?;
    for file in &report.files {
        log::info!("created: '{}'", file);
    }
    if !report.warnings.is_empty() {
        println!(
            "\nUnterminated conditional blocks were left untouched in: {}",
            report.warnings.join(", ")
        );
    }

    println!("\nProject created successfully in {}.", output_dir.display());
    let active = Resolver::new(&config, &catalog).active_modules();
    if !active.is_empty() {
        println!("\nFeatures enabled:");
        for module in active {
            println!("  - {}", module.name);
        }
    }

    println!("\nNext steps:");
    println!("  1. cd {}", output_dir.display());
    println!("  2. npm install");
    println!("  3. npm run dev");
    println!("\nAdditional commands:");
    println!("  npm run lint     Run ESLint");
    println!("  npm run format   Format code with Prettier");
    println!("  npm run build    Build for production");
    println!("  npm run preview  Preview production build");
    Ok(())
}
