//! Display calendar progress

use anyhow::Result;

use crate::Advent;

/// Print the progress summary in the configured timezone
pub fn run(advent: &Advent, json: bool) -> Result<()> {
    let progress = advent.store().progress(advent.timezone());

    if json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
        return Ok(());
    }

    println!(
        "{}: {}/{} days unlocked ({:.0}%)",
        advent.config.title, progress.completed_days, progress.total_days, progress.percent_complete
    );

    Ok(())
}
