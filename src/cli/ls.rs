//! Ls command implementation

use anyhow::{bail, Result};
use chrono::{Local, TimeZone};
use std::path::Path;

use crate::notes;
use crate::store::NotesStore;
use crate::tracker::Tracker;

pub struct Options {
    /// Re-derive summaries for every known directory before listing
    pub refresh: bool,
    /// Only rows whose directory or notes file is currently absent
    pub missing: bool,
    /// Bare paths only, for scripting
    pub dirs_only: bool,
    /// Comma-separated column selection, e.g. "time,dir,summary"
    pub columns: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Time,
    Dir,
    Summary,
}

impl Column {
    fn header(self) -> &'static str {
        match self {
            Column::Time => "Last visit",
            Column::Dir => "Directory",
            Column::Summary => "Summary",
        }
    }

    fn width(self) -> usize {
        match self {
            Column::Time => 16,
            Column::Dir => 44,
            Column::Summary => 40,
        }
    }
}

fn parse_columns(spec: &str) -> Result<Vec<Column>> {
    spec.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| match name {
            "time" => Ok(Column::Time),
            "dir" => Ok(Column::Dir),
            "summary" => Ok(Column::Summary),
            other => bail!("unknown column '{}' (expected time, dir, summary)", other),
        })
        .collect()
}

pub fn run(store: &NotesStore, notes_file: &str, options: Options) -> Result<()> {
    if options.refresh {
        Tracker::new(store, notes_file).refresh(&[])?;
    }

    let mut rows = store.list()?;

    if options.missing {
        rows.retain(|row| {
            let dir = Path::new(&row.dir_name);
            !dir.is_dir() || !notes::notes_path(dir, notes_file).is_file()
        });
    }

    if rows.is_empty() {
        if !options.dirs_only {
            println!("No notes found.");
        }
        return Ok(());
    }

    if options.dirs_only {
        for row in rows {
            println!("{}", row.dir_name);
        }
        return Ok(());
    }

    let columns = match options.columns.as_deref() {
        Some(spec) => parse_columns(spec)?,
        None => vec![Column::Time, Column::Dir, Column::Summary],
    };
    if columns.is_empty() {
        bail!("no columns selected");
    }

    let header: Vec<String> = columns
        .iter()
        .map(|c| format!("{:<width$}", c.header(), width = c.width()))
        .collect();
    println!("{}", header.join(" ").trim_end());
    println!("{}", "-".repeat(columns.iter().map(|c| c.width() + 1).sum::<usize>() - 1));

    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| {
                let value = match column {
                    Column::Time => human_time(row.last_activity),
                    Column::Dir => row.dir_name.clone(),
                    Column::Summary => row.summary.clone().unwrap_or_else(|| "-".to_string()),
                };
                format!("{:<width$}", value, width = column.width())
            })
            .collect();
        println!("{}", cells.join(" ").trim_end());
    }

    Ok(())
}

fn human_time(unix_secs: i64) -> String {
    match Local.timestamp_opt(unix_secs, 0).single() {
        Some(when) => when.format("%Y-%m-%d %H:%M").to_string(),
        None => unix_secs.to_string(),
    }
}
