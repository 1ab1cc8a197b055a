//! Export content as JSON

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Advent;

/// Write entries, index and progress as pretty JSON.
///
/// The payload is what a consuming site generator needs to render the
/// calendar without touching the markdown files itself.
pub fn run(advent: &Advent, output: Option<&Path>) -> Result<()> {
    let store = advent.store();

    let days = store.all_days()?;
    let index = store.index_entry()?;
    let progress = store.progress(advent.timezone());

    let payload = serde_json::json!({
        "days": days,
        "index": index,
        "progress": progress,
    });
    let json = serde_json::to_string_pretty(&payload)?;

    match output {
        Some(path) => {
            fs::write(path, json)?;
            tracing::info!("Exported {} day entries to {:?}", days.len(), path);
            println!("Exported: {:?}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
