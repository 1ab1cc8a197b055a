//! List day entries

use anyhow::Result;

use crate::content::DayEntry;
use crate::Advent;

/// Print all day entries, in calendar order
pub fn run(advent: &Advent, json: bool) -> Result<()> {
    let store = advent.store();
    let days = store.all_days()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&days)?);
        return Ok(());
    }

    println!("Days ({}):", days.len());
    for entry in &days {
        println!("{}", entry_line(entry));
    }

    Ok(())
}

fn entry_line(entry: &DayEntry) -> String {
    let mut labels = Vec::new();
    if let Some(category) = &entry.category {
        labels.push(category.clone());
    }
    if let Some(difficulty) = &entry.difficulty {
        labels.push(difficulty.clone());
    }
    let labels = if labels.is_empty() {
        String::new()
    } else {
        format!(" [{}]", labels.join(", "))
    };

    format!(
        "  day {:>2}: {} ({} min read){}",
        entry.day,
        entry.display_title(),
        entry.reading_time(),
        labels
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{init, new};
    use tempfile::TempDir;

    #[test]
    fn test_list_runs_in_both_modes() {
        let dir = TempDir::new().unwrap();
        init::init_site(dir.path()).unwrap();
        let advent = Advent::new(dir.path()).unwrap();
        // an entry with no category or difficulty
        new::create_day(&advent, 2, Some("Plain Day"), None, None).unwrap();

        assert!(run(&advent, true).is_ok());
        assert!(run(&advent, false).is_ok());
    }

    #[test]
    fn test_entry_line_with_and_without_labels() {
        let dir = TempDir::new().unwrap();
        init::init_site(dir.path()).unwrap();
        let advent = Advent::new(dir.path()).unwrap();
        new::create_day(&advent, 2, Some("Plain Day"), None, None).unwrap();

        let days = advent.store().all_days().unwrap();
        assert_eq!(days.len(), 2);

        // init's day-1 carries category and difficulty
        let first = entry_line(&days[0]);
        assert!(first.contains("day  1"));
        assert!(first.contains("[containers, beginner]"));

        let second = entry_line(&days[1]);
        assert!(second.contains("Plain Day"));
        assert!(!second.contains('['));
    }
}
