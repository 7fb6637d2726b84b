//! URL classification without fetching

use crate::app::{ClassifyArgs, OutputFormat};
use crate::output;
use anyhow::Result;
use toread_core::classify;

pub fn run(args: ClassifyArgs, format: OutputFormat) -> Result<()> {
    let kind = classify(&args.url);
    print!("{}", output::format_classification(&args.url, kind, format));
    Ok(())
}
