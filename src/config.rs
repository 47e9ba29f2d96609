//! Configuration for diagnostic output.

use std::env;

use serde::{Deserialize, Serialize};

/// Output layout for report records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines with `[test]` / `[perf]` prefixes.
    #[default]
    Terminal,
    /// One JSON object per line.
    Json,
}

/// Configuration options for a [`Reporter`](crate::Reporter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Record layout (default: `Terminal`).
    pub format: OutputFormat,

    /// Emit ANSI colors in terminal output (default: true).
    pub color: bool,

    /// Print both buffers in hex on every comparison, not only on
    /// mismatch (default: true).
    pub show_buffers: bool,

    /// Bytes per space-separated hex group; 0 disables grouping (default: 0).
    pub group_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Terminal,
            color: true,
            show_buffers: true,
            group_bytes: 0,
        }
    }
}

impl Config {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge configuration from environment variables.
    ///
    /// Reads `PRIMBENCH_FORMAT`, `PRIMBENCH_COLOR`, `PRIMBENCH_SHOW_BUFFERS`
    /// and `PRIMBENCH_GROUP_BYTES`. `NO_COLOR` disables colors regardless.
    pub fn from_env(mut self) -> Self {
        if let Some(format) = parse_format_env("PRIMBENCH_FORMAT") {
            self.format = format;
        }
        if let Some(color) = parse_bool_env("PRIMBENCH_COLOR") {
            self.color = color;
        }
        if env::var_os("NO_COLOR").is_some() {
            self.color = false;
        }
        if let Some(show) = parse_bool_env("PRIMBENCH_SHOW_BUFFERS") {
            self.show_buffers = show;
        }
        if let Some(group) = parse_usize_env("PRIMBENCH_GROUP_BYTES") {
            self.group_bytes = group;
        }
        self
    }

    /// Override output format.
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable ANSI colors.
    pub fn color(mut self, yes: bool) -> Self {
        self.color = yes;
        self
    }

    /// Print buffers on every comparison, or only on mismatch.
    pub fn show_buffers(mut self, yes: bool) -> Self {
        self.show_buffers = yes;
        self
    }

    /// Set hex grouping width in bytes.
    pub fn group_bytes(mut self, n: usize) -> Self {
        self.group_bytes = n;
        self
    }
}

fn parse_format_env(key: &str) -> Option<OutputFormat> {
    let val = env::var(key).ok()?;
    parse_format(&val).or_else(|| {
        tracing::warn!(key, value = %val, "ignoring unrecognized output format");
        None
    })
}

fn parse_bool_env(key: &str) -> Option<bool> {
    let val = env::var(key).ok()?;
    parse_bool(&val).or_else(|| {
        tracing::warn!(key, value = %val, "ignoring unparsable boolean");
        None
    })
}

fn parse_usize_env(key: &str) -> Option<usize> {
    let val = env::var(key).ok()?;
    val.trim().parse().ok().or_else(|| {
        tracing::warn!(key, value = %val, "ignoring unparsable integer");
        None
    })
}

fn parse_format(val: &str) -> Option<OutputFormat> {
    match val.trim().to_ascii_lowercase().as_str() {
        "terminal" | "text" => Some(OutputFormat::Terminal),
        "json" => Some(OutputFormat::Json),
        _ => None,
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    let val = val.trim();
    if val == "1" || val.eq_ignore_ascii_case("true") || val.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if val == "0" || val.eq_ignore_ascii_case("false") || val.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}
