//! Tags in use

use crate::app::OutputFormat;
use crate::output;
use anyhow::Result;
use toread_core::CollectionService;

pub fn run(service: &CollectionService, owner: i64, format: OutputFormat) -> Result<()> {
    let tags = service.tags(owner)?;
    print!("{}", output::format_tags(&tags, format));
    Ok(())
}
