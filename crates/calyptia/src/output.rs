//! Output rendering helpers
//!
//! Deliberately thin: a padded-column table writer plus JSON/YAML
//! passthrough of the raw API objects.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// Prints rows with each column padded to its widest cell, tabwriter
/// style.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let render = |cells: Vec<&str>| {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i + 1 == columns {
                line.push_str(cell);
            } else {
                line.push_str(&format!("{cell:<width$} ", width = widths[i]));
            }
        }
        println!("{}", line.trim_end());
    };

    render(headers.to_vec());
    for row in rows {
        render(row.iter().map(String::as_str).collect());
    }
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    serde_json::to_writer(std::io::stdout(), value)?;
    println!();
    Ok(())
}

pub fn print_yaml<T: Serialize>(value: &T) -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(value)?);
    Ok(())
}

/// Humanized age of a timestamp, largest unit only ("3 days").
pub fn fmt_ago(t: DateTime<Utc>) -> String {
    fmt_duration(Utc::now() - t)
}

fn fmt_duration(d: chrono::Duration) -> String {
    let secs = d.num_seconds().max(0);
    let (n, unit) = if secs < 60 {
        (secs, "second")
    } else if secs < 3600 {
        (secs / 60, "minute")
    } else if secs < 86_400 {
        (secs / 3600, "hour")
    } else {
        (secs / 86_400, "day")
    };
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Agent liveness derived from the last metrics timestamp: never reported
/// is "inactive", older than five minutes is "inactive for <age>",
/// anything newer is "active".
pub fn agent_status(last_metrics_added_at: Option<DateTime<Utc>>) -> String {
    match last_metrics_added_at {
        None => "inactive".to_string(),
        Some(t) if Utc::now() - t > chrono::Duration::minutes(5) => {
            format!("inactive for {}", fmt_duration(Utc::now() - t))
        }
        Some(_) => "active".to_string(),
    }
}
