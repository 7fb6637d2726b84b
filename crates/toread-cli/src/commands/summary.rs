//! Combined report over matching collections

use crate::app::{FilterArgs, OutputFormat};
use crate::output;
use anyhow::Result;
use toread_core::CollectionService;

pub async fn run(
    args: FilterArgs,
    service: &CollectionService,
    owner: i64,
    format: OutputFormat,
) -> Result<()> {
    let report = service.summarize(owner, &args.to_filter()).await?;
    print!("{}", output::format_summary(&report, format));
    Ok(())
}
