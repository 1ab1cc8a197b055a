//! Plain-text helpers over raw markdown bodies
//!
//! Entries keep their body as raw markdown; rendering belongs to the
//! consuming site. These helpers only derive display metadata from it:
//! fallback excerpts, word counts and reading times.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Reading speed used for [`reading_time`]
const WORDS_PER_MINUTE: usize = 200;

/// Character budget for [`auto_excerpt`] when no limit is given
pub const EXCERPT_CHARS: usize = 180;

// Enable most options but NOT YAML metadata blocks
// Front matter is handled separately in FrontMatter::parse()
fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Extract the visible text of a markdown body, markup stripped.
///
/// Block boundaries collapse to single spaces, so the result is a flat
/// line of prose suitable for counting or searching.
pub fn plain_text(markdown: &str) -> String {
    let mut out = String::new();

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Text(text) => out.push_str(&text),
            Event::Code(code) => out.push_str(&code),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::BlockQuote(_)
                | TagEnd::TableCell,
            ) => out.push(' '),
            _ => {}
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derive an excerpt from the first paragraph of a markdown body.
///
/// Headings, images and code fences before the first paragraph are
/// skipped. The result is truncated to `max_chars` characters with a
/// trailing ellipsis when it does not fit.
pub fn auto_excerpt(markdown: &str, max_chars: usize) -> String {
    let mut in_paragraph = false;
    let mut text = String::new();

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::Paragraph) => in_paragraph = true,
            Event::End(TagEnd::Paragraph) => {
                if !text.trim().is_empty() {
                    break;
                }
                in_paragraph = false;
                text.clear();
            }
            Event::Text(t) if in_paragraph => text.push_str(&t),
            Event::Code(t) if in_paragraph => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }

    truncate_chars(text.trim(), max_chars)
}

/// Count the words of the visible text
pub fn word_count(markdown: &str) -> usize {
    plain_text(markdown).split_whitespace().count()
}

/// Estimated reading time in whole minutes, always at least 1
pub fn reading_time(markdown: &str) -> u32 {
    let words = word_count(markdown);
    let minutes = (words + WORDS_PER_MINUTE - 1) / WORDS_PER_MINUTE;
    minutes.max(1) as u32
}

// Truncation counts chars, not bytes, so multi-byte text stays intact
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_strips_markup() {
        let text = plain_text("# Heading\n\nSome **bold** and `inline code`.\n");
        assert_eq!(text, "Heading Some bold and inline code.");
    }

    #[test]
    fn test_plain_text_separates_blocks() {
        let text = plain_text("para one\n\n- item a\n- item b\n");
        assert_eq!(text, "para one item a item b");
    }

    #[test]
    fn test_auto_excerpt_skips_leading_heading() {
        let body = "# Day 3: Pipelines\n\nBuild a CI pipeline from scratch.\n\nMore detail here.\n";
        assert_eq!(auto_excerpt(body, 100), "Build a CI pipeline from scratch.");
    }

    #[test]
    fn test_auto_excerpt_truncates_on_char_boundary() {
        let body = "Ein schönes Beispiel für Umlaute und lange Sätze, die gekürzt werden müssen.";
        let excerpt = auto_excerpt(body, 20);
        assert!(excerpt.chars().count() <= 20);
        assert!(excerpt.ends_with('…'));
    }

    #[test]
    fn test_auto_excerpt_empty_body() {
        assert_eq!(auto_excerpt("", 100), "");
        assert_eq!(auto_excerpt("# Only a heading\n", 100), "");
    }

    #[test]
    fn test_word_count_includes_code_blocks() {
        let body = "intro words\n\n```bash\nkubectl get pods\n```\n";
        assert_eq!(word_count(body), 5);
    }

    #[test]
    fn test_reading_time_never_zero() {
        assert_eq!(reading_time(""), 1);
        assert_eq!(reading_time("just a few words"), 1);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let body = "word ".repeat(201);
        assert_eq!(reading_time(&body), 2);
    }
}
