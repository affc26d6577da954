use anyhow::Result;
use chrono::Utc;
use crossterm::terminal as term;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::utils::strings;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoryRecord {
    /// ISO 8601 UTC timestamp for when the story was finalized
    pub timestamp: String,
    pub theme: String,
    /// "manual" or "generated"
    pub source: String,
    pub placeholders: usize,
    pub answered: usize,
    pub completed: bool,
}

fn history_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "madly").map(|dirs| dirs.data_local_dir().join("history.json"))
}

pub fn load_history() -> Result<Vec<StoryRecord>> {
    let Some(path) = history_path() else {
        return Ok(Vec::new());
    };

    if !path.exists() {
        return Ok(Vec::new());
    }

    let raw = fs::read_to_string(&path)?;
    let records: Vec<StoryRecord> = serde_json::from_str(&raw)?;
    Ok(records)
}

fn save_history(records: &[StoryRecord]) -> Result<()> {
    let Some(path) = history_path() else {
        return Ok(());
    };

    // create the data directory if it doesn't exist yet
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(records)?;
    fs::write(&path, json)?;
    Ok(())
}

/// Appends one finalized story to the history file.
pub fn record_story(theme: &str, generated: bool, placeholders: usize, answered: usize) -> Result<()> {
    let record = StoryRecord {
        timestamp: Utc::now().to_rfc3339(),
        theme: theme.to_string(),
        source: if generated { "generated" } else { "manual" }.to_string(),
        placeholders,
        answered,
        completed: answered >= placeholders,
    };

    let mut records = load_history().unwrap_or_default();
    records.push(record);
    save_history(&records)?;
    Ok(())
}

pub fn show_history() -> Result<()> {
    let records = load_history()?;

    if records.is_empty() {
        println!("\n  No history yet. Finish a story to start tracking them.\n");
        return Ok(());
    }

    let term_width = term::size()
        .map(|(w, _)| w as usize)
        .unwrap_or(80)
        .max(40);

    const W_NUM: usize = 5;
    const W_DATE: usize = 12;
    const W_THEME: usize = 20;
    const W_SRC: usize = 11;
    const W_BLANKS: usize = 8;
    const W_FILLED: usize = 8;

    let base_width = 1 + W_NUM + W_DATE + W_BLANKS + 4;
    let show_theme = term_width >= base_width + W_THEME;
    let show_src = term_width >= base_width + W_THEME + W_SRC;
    let show_filled = term_width >= base_width + W_THEME + W_SRC + W_FILLED;

    let total_width = 1
        + W_NUM
        + W_DATE
        + W_BLANKS
        + 4
        + if show_theme { W_THEME } else { 0 }
        + if show_src { W_SRC } else { 0 }
        + if show_filled { W_FILLED } else { 0 };

    let divider = "-".repeat(total_width);

    let total = records.len();
    let done = records.iter().filter(|r| r.completed).count();
    let generated = records.iter().filter(|r| r.source == "generated").count();

    println!();
    println!(
        "  {} stories  |  {} completed  |  {} generated",
        total, done, generated
    );
    println!();

    print!(" {:<nw$}{:<dw$}", "#", "date", nw = W_NUM, dw = W_DATE);
    if show_theme {
        print!("{:<tw$}", "theme", tw = W_THEME);
    }
    if show_src {
        print!("{:<sw$}", "source", sw = W_SRC);
    }
    print!("{:<bw$}", "blanks", bw = W_BLANKS);
    if show_filled {
        print!("{:<fw$}", "filled", fw = W_FILLED);
    }
    println!("done");
    println!(" {}", divider);

    for (i, r) in records.iter().rev().enumerate() {
        let date = r.timestamp.get(..10).unwrap_or(&r.timestamp).to_string();
        let done = if r.completed { "Y" } else { "N" };

        print!(" {:<nw$}{:<dw$}", i + 1, date, nw = W_NUM, dw = W_DATE);
        if show_theme {
            let theme = if r.theme.is_empty() {
                "-".to_string()
            } else {
                strings::truncate(&r.theme, W_THEME - 2)
            };
            print!("{:<tw$}", theme, tw = W_THEME);
        }
        if show_src {
            print!("{:<sw$}", r.source, sw = W_SRC);
        }
        print!("{:<bw$}", r.placeholders, bw = W_BLANKS);
        if show_filled {
            print!("{:<fw$}", r.answered, fw = W_FILLED);
        }
        println!("{}", done);
    }

    println!(" {}", divider);
    println!();

    Ok(())
}
