//! jstpack's application entry point.
//! Parses arguments, loads the configuration and runs every destination
//! group through the pipeline.

use jstpack::{
    cli::{get_args, Args},
    config::{find_config, load_config},
    constants::CONFIG_FILES,
    error::{default_error_handler, Result},
    fs::LocalFileSystem,
    logger::init_logger,
    processor::Processor,
    renderer::MiniJinjaCompiler,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Locates and loads the configuration
/// 2. Applies command-line overrides
/// 3. Compiles and writes every destination group
fn run(args: Args) -> Result<()> {
    let config_path = find_config(&args.config, &CONFIG_FILES)?;
    let config = load_config(&config_path)?;
    let options = args.apply(config.options);

    let compiler = MiniJinjaCompiler::new();
    let fs = LocalFileSystem::new();
    let processor = Processor::new(&compiler, &fs, &options);

    let report = processor.run(&config.files)?;

    println!(
        "{} file(s) written, {} warning(s).",
        report.written.len(),
        report.warnings.len()
    );
    Ok(())
}
