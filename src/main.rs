//! opfill's main application entry point.
//! Parses arguments, fetches the secret documents and writes the filled
//! template.

use std::io;
use std::path::Path;

use opfill::{
    cli::{get_args, Args},
    error::{default_error_handler, Error, Result},
    fill::{Filler, LogObserver},
    fold::fold_sources,
    source::fetch_all,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(args.verbosity().level_filter())
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn read_template<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| {
        Error::IoError(io::Error::new(
            e.kind(),
            format!("failed to read input file {}: {e}", path.display()),
        ))
    })
}

fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    std::fs::write(dest_path, content).map_err(|e| {
        Error::IoError(io::Error::new(
            e.kind(),
            format!("failed to write output file {}: {e}", dest_path.display()),
        ))
    })
}

/// Main application logic execution.
///
/// # Flow
/// 1. Reads the template
/// 2. Builds and fetches the secret sources, in command-line order
/// 3. Validates every document, then folds them into the template
/// 4. Writes the result
fn run(args: Args) -> Result<()> {
    let config = args.config();
    let template = read_template(&args.input)?;

    let sources = args.sources()?;
    let documents = fetch_all(&sources)?;

    let observer = LogObserver;
    let filler = Filler::new(&config, &observer);
    let output = fold_sources(&filler, &template, &documents)?;

    write_file(&output, &args.output)?;
    log::debug!("Wrote {}", args.output.display());
    Ok(())
}
