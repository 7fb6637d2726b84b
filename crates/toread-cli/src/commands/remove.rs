//! Remove a saved collection

use crate::app::{OutputFormat, RemoveArgs};
use anyhow::Result;
use toread_core::CollectionService;

pub fn run(
    args: RemoveArgs,
    service: &CollectionService,
    owner: i64,
    format: OutputFormat,
) -> Result<()> {
    service.remove(owner, args.id)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "removed": args.id })),
        OutputFormat::Cli => println!("Removed collection #{}", args.id),
    }
    Ok(())
}
