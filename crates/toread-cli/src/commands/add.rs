//! Save a URL

use crate::app::{AddArgs, OutputFormat};
use crate::output;
use anyhow::Result;
use toread_core::CollectionService;

pub async fn run(
    args: AddArgs,
    service: &CollectionService,
    owner: i64,
    format: OutputFormat,
) -> Result<()> {
    let item = service.add(owner, &args.url).await?;
    print!("{}", output::format_added(&item, format));
    Ok(())
}
