//! Documentation pipeline entry point.

use clap::Parser;
use stencil::{
    cli::DocsArgs,
    docs::{
        config::{load_docs_config, DocsConfig},
        Converters, Pipeline,
    },
    error::{default_error_handler, Result},
    logger::init_logger,
};

fn main() {
    let args = DocsArgs::parse();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: DocsArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_docs_config(path)?,
        None => DocsConfig::default(),
    };
    let converters = Converters::from_config(&config);
    let pipeline = Pipeline::new(&args.source, &args.output, &config, args.formats(), converters)?;

    let converted = pipeline.run()?;
    for document in &converted {
        println!("Converted '{}'", document.source.display());
        for output in &document.outputs {
            println!("  -> '{}'", output.display());
        }
    }
    println!("{} document(s) converted into {}.", converted.len(), args.output.display());
    Ok(())
}
