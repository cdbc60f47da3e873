use chrono::{DateTime, Utc};
use colored::Colorize;
use dotnote::commands::{CmdMessage, MessageLevel};
use dotnote::config::NotesConfig;
use dotnote::model::NoteType;
use dotnote::prompt::Page;
use std::path::PathBuf;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const DEFAULT_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

/// Terminal width, or a fixed width when not attached to one.
pub(super) fn line_width() -> usize {
    let term = console::Term::stdout();
    if term.is_term() {
        term.size().1 as usize
    } else {
        DEFAULT_WIDTH
    }
}

/// One line per entry, `[N] name` with the age right-aligned, then the page
/// indicator when there is more than one page.
pub(super) fn render_page(page: &Page, width: usize) -> Vec<String> {
    let now = Utc::now();
    let mut lines = Vec::with_capacity(page.entries.len() + 1);

    for (i, note) in page.entries.iter().enumerate() {
        let index = format!("[{}] ", i + 1);
        let available = width.saturating_sub(index.width() + TIME_WIDTH);
        let name = truncate_to_width(&note.name, available);
        let padding = available.saturating_sub(name.width());
        let age = format_time_ago(note.modified, now);

        lines.push(format!(
            "{}{}{}{}",
            index.yellow(),
            name,
            " ".repeat(padding),
            age.dimmed()
        ));
    }

    if page.is_paginated() {
        lines.push(
            format!(
                "page {}/{}  (n/→ next, p/← previous, enter to stop)",
                page.number, page.total
            )
            .dimmed()
            .to_string(),
        );
    }
    lines
}

pub(super) fn print_page(page: &Page) {
    for line in render_page(page, line_width()) {
        println!("{}", line);
    }
}

pub(super) fn print_paths(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
}

pub(super) fn print_types(types: &[NoteType]) {
    for t in types {
        println!("{:<10} {:<5} .{}", t.name, t.alias.dimmed(), t.extension);
    }
}

pub(super) fn print_config(config: &NotesConfig) {
    for (key, value) in config.list_all() {
        if value.is_empty() {
            println!("{} = {}", key, "(unset)".dimmed());
        } else {
            println!("{} = {}", key, value);
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use dotnote::model::NoteFile;

    fn note(name: &str) -> NoteFile {
        let at = Utc::now() - Duration::hours(3);
        NoteFile {
            path: PathBuf::from("/notes").join(name),
            relative: PathBuf::from(name),
            name: name.to_string(),
            size: 0,
            created: at,
            accessed: at,
            modified: at,
        }
    }

    fn plain(line: &str) -> String {
        console::strip_ansi_codes(line).to_string()
    }

    #[test]
    fn numbers_entries_from_one() {
        let page = Page {
            number: 1,
            total: 1,
            entries: vec![note("a.md"), note("b.md")],
        };
        let lines: Vec<String> = render_page(&page, 60).iter().map(|l| plain(l)).collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[1] a.md"));
        assert!(lines[1].starts_with("[2] b.md"));
        assert!(lines[0].ends_with("3 hours ago"));
    }

    #[test]
    fn paginated_listing_shows_position() {
        let page = Page {
            number: 2,
            total: 3,
            entries: vec![note("a.md")],
        };
        let lines = render_page(&page, 60);
        assert!(plain(&lines[1]).starts_with("page 2/3"));
    }

    #[test]
    fn long_names_are_truncated_to_width() {
        let long = "a".repeat(80) + ".md";
        let page = Page {
            number: 1,
            total: 1,
            entries: vec![note(&long)],
        };
        let line = plain(&render_page(&page, 60)[0]);
        assert!(line.contains('…'));
        assert_eq!(line.width(), 60);
    }

    #[test]
    fn truncation_respects_wide_characters() {
        assert_eq!(truncate_to_width("日本語メモ", 6), "日本…");
        assert_eq!(truncate_to_width("short", 10), "short");
    }
}
