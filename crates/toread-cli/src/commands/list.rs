//! List saved collections

use crate::app::{FilterArgs, OutputFormat};
use crate::output;
use anyhow::Result;
use toread_core::CollectionService;

pub fn run(
    args: FilterArgs,
    service: &CollectionService,
    owner: i64,
    format: OutputFormat,
) -> Result<()> {
    let items = service.list(owner, &args.to_filter())?;
    print!("{}", output::format_collections(&items, format));
    Ok(())
}
