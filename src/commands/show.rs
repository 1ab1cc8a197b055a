//! Show a single entry

use anyhow::Result;

use crate::content::{DayEntry, INDEX_SLUG};
use crate::Advent;

/// Print one entry, looked up by day number or slug.
///
/// `index` (or the index slug itself) selects the overview entry. A
/// lookup that finds nothing is a command error, so the process exits
/// nonzero.
pub fn run(advent: &Advent, entry: &str, meta_only: bool) -> Result<()> {
    let store = advent.store();

    if entry == "index" || entry == INDEX_SLUG {
        let Some(index) = store.index_entry()? else {
            anyhow::bail!("No index entry found (is content/index.md present?)");
        };
        println!("slug:      {}", index.slug);
        println!("title:     {}", index.display_title());
        if let Some(excerpt) = &index.excerpt {
            println!("excerpt:   {}", excerpt);
        }
        if !index.tags.is_empty() {
            println!("tags:      {}", index.tags.join(", "));
        }
        if !meta_only {
            println!();
            println!("{}", index.content);
        }
        return Ok(());
    }

    let found = match entry.parse::<u32>() {
        Ok(number) => store.day_by_number(number)?,
        Err(_) => store.day_by_slug(entry)?,
    };
    let Some(day) = found else {
        anyhow::bail!("No entry found for {:?}", entry);
    };

    print_day(&day, meta_only);
    Ok(())
}

fn print_day(entry: &DayEntry, meta_only: bool) {
    println!("slug:       {}", entry.slug);
    println!("day:        {}", entry.day);
    println!("title:      {}", entry.display_title());
    if let Some(category) = &entry.category {
        println!("category:   {}", category);
    }
    if let Some(difficulty) = &entry.difficulty {
        println!("difficulty: {}", difficulty);
    }
    println!("image:      {}", entry.image);
    if let Some(published_at) = &entry.published_at {
        println!("published:  {}", published_at);
    }
    if let Some(updated_at) = &entry.updated_at {
        println!("updated:    {}", updated_at);
    }
    if !entry.tags.is_empty() {
        println!("tags:       {}", entry.tags.join(", "));
    }
    println!("reading:    {} min", entry.reading_time());
    println!("excerpt:    {}", entry.summary());

    if !meta_only {
        println!();
        println!("{}", entry.content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init;
    use tempfile::TempDir;

    fn site() -> (TempDir, Advent) {
        let dir = TempDir::new().unwrap();
        init::init_site(dir.path()).unwrap();
        let advent = Advent::new(dir.path()).unwrap();
        (dir, advent)
    }

    #[test]
    fn test_show_by_number_slug_and_index() {
        let (_dir, advent) = site();
        assert!(run(&advent, "1", false).is_ok());
        assert!(run(&advent, "day-1", true).is_ok());
        assert!(run(&advent, "index", true).is_ok());
    }

    #[test]
    fn test_show_missing_entry_fails() {
        let (_dir, advent) = site();
        assert!(run(&advent, "19", false).is_err());
        assert!(run(&advent, "day-nineteen", false).is_err());
    }
}
