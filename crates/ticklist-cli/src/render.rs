use std::io::{self, IsTerminal, Write};

use ticklist_core::view::ListView;
use ticklist_core::{Level, Notification, TaskFilter, TaskStats};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color = cfg.get_bool("color")? && io::stdout().is_terminal();
        Ok(Self { color })
    }

    /// Renderer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip_all, fields(filter = %view.filter, rows = view.rows.len()))]
    pub fn print_list(&self, view: &ListView) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_list(&mut out, view)
    }

    pub fn print_stats(&self, stats: &TaskStats) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_stats(&mut out, stats)
    }

    pub fn write_list<W: Write>(&self, mut out: W, view: &ListView) -> anyhow::Result<()> {
        let tabs = view
            .tabs
            .iter()
            .map(|tab| {
                let text = format!("{} ({})", tab.filter.label(), tab.count);
                if tab.selected {
                    self.paint(&format!("[{text}]"), "1")
                } else {
                    text
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(out, "{tabs}")?;
        writeln!(out)?;

        if view.is_empty() {
            writeln!(out, "{}", empty_message(view.filter))?;
            return Ok(());
        }

        let headers = vec![
            "#".to_string(),
            "ID".to_string(),
            "Done".to_string(),
            "Task".to_string(),
            "Created".to_string(),
        ];

        let rows = view
            .rows
            .iter()
            .map(|row| {
                let position = if row.active {
                    self.paint(&format!(">{}", row.position), "36")
                } else {
                    row.position.to_string()
                };
                let short: String = row.uuid.as_str().chars().take(8).collect();
                let done = if row.completed { "[x]" } else { "[ ]" };
                let name = if row.completed {
                    self.paint(&row.name, "2;9")
                } else {
                    row.name.clone()
                };

                vec![
                    position,
                    self.paint(&short, "33"),
                    done.to_string(),
                    name,
                    row.created_label.clone(),
                ]
            })
            .collect();

        write_table(&mut out, headers, rows)
    }

    pub fn write_stats<W: Write>(&self, mut out: W, stats: &TaskStats) -> anyhow::Result<()> {
        writeln!(out, "Total           {}", stats.total)?;
        writeln!(out, "Active          {}", stats.active)?;
        writeln!(out, "Completed       {}", stats.completed)?;
        writeln!(out, "Completion rate {}%", stats.completion_rate)?;
        writeln!(out, "Created today   {}", stats.created_today)?;
        Ok(())
    }

    pub fn notification_line(&self, notification: &Notification) -> String {
        let code = match notification.level {
            Level::Success => "32",
            Level::Error => "31",
            Level::Warning => "33",
            Level::Info => "36",
        };
        let tag = self.paint(&notification.level.key().to_ascii_uppercase(), code);
        format!("{tag}: {}", notification.message)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn empty_message(filter: TaskFilter) -> &'static str {
    match filter {
        TaskFilter::All => "No tasks yet. Add one with `ticklist add NAME`.",
        TaskFilter::Active => "No active tasks.",
        TaskFilter::Completed => "No completed tasks.",
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    let last = column_count.saturating_sub(1);
    for idx in 0..column_count {
        if idx == last {
            writeln!(writer, "{}", headers[idx])?;
        } else {
            write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:-<width$}", "", width = widths[idx])?;
        if idx != last {
            write!(writer, " ")?;
        }
    }
    writeln!(writer)?;

    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if idx == last {
                write!(writer, "{cell}")?;
            } else {
                let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
                let padding = widths[idx].saturating_sub(visible_width);
                write!(writer, "{}{} ", cell, " ".repeat(padding))?;
            }
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
