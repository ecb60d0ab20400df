//! Builds `product-catalog.pdf` from the photos in `images/`.
//!
//! Takes no arguments. Settings come from `catalog.json` in the working
//! directory when present; set `RUST_LOG` for more detail.

use std::path::Path;
use std::process::ExitCode;

use catalog_gen::{CatalogConfig, CatalogError, CatalogJob};

fn run() -> Result<(), CatalogError> {
    let config = CatalogConfig::load(Path::new(CatalogConfig::FILE_NAME))?;
    let job = match CatalogJob::prepare(config) {
        Ok(job) => job,
        Err(CatalogError::NoImages(dir)) => {
            println!("No images found in the {} directory!", dir.display());
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    println!("Found {} images", job.image_count());

    let report = job.write()?;

    for line in report.summary(&job.config().output) {
        println!("{}", line);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
