//! Stencil scaffolder entry point.
//! Loads the configuration, renders the structure descriptor and either
//! materializes it or removes it.

use clap::Parser;
use stencil::{
    catalog::TemplateCatalog,
    cli::Args,
    config::load_config,
    demolisher::demolish,
    error::{default_error_handler, Result},
    logger::init_logger,
    materializer::materialize,
    renderer::MiniJinjaRenderer,
    structure::Structure,
};

/// Main application entry point.
fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the configuration and resolves its paths
/// 2. Renders and parses the structure descriptor
/// 3. Removes or creates the structure under the base directory
fn run(args: Args) -> Result<()> {
    let config = load_config(&args.config)?;
    let renderer = MiniJinjaRenderer::with_template_dir(&config.templates);
    let structure = Structure::load(&config.structure, &renderer, &config.context)?;

    if let Some(mode) = args.removal_mode() {
        for action in demolish(&structure, &config.basedir, mode)? {
            println!("{action}");
        }
        println!("Project structure removal complete.");
        return Ok(());
    }

    let catalog = TemplateCatalog::new(&config.templates);
    let outcome = materialize(&structure, &config.basedir, &catalog, &renderer, &config.context)?;
    for path in &outcome.created {
        println!("Created: '{}'", path.display());
    }
    if outcome.warnings.is_empty() {
        println!("Project structure created successfully in {}.", config.basedir.display());
    } else {
        println!(
            "Project structure created in {} with {} warning(s).",
            config.basedir.display(),
            outcome.warnings.len()
        );
    }
    Ok(())
}
