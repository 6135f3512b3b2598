//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `blueprint` - Blueprint report and directory browser
//! - `config` - Configuration inspection
//! - `insight` - Snapshot analysis
//! - `tour` - Onboarding walkthrough

pub mod blueprint;
pub mod config;
pub mod insight;
pub mod tour;

use std::io::{self, BufRead, BufReader, Cursor};

// Re-export command functions for main.rs
pub use blueprint::*;
pub use config::*;
pub use insight::*;
pub use tour::*;

/// Line-oriented key input for the interactive commands
///
/// A script like `"1, b,q"` is replayed as one key per line; otherwise keys
/// are read from stdin.
pub fn key_source(script: Option<&str>) -> Box<dyn BufRead + Send> {
    match script {
        Some(script) => {
            let lines = script
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|k| !k.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            Box::new(Cursor::new(lines))
        }
        None => Box::new(BufReader::new(io::stdin())),
    }
}

/// Read the next non-empty key, lowercased; `None` at end of input
pub fn next_key(input: &mut dyn BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let key = line.trim();
        if !key.is_empty() {
            return Ok(Some(key.to_lowercase()));
        }
    }
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
