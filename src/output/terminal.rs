//! Terminal output formatting with optional colors.

use colored::Colorize;

use crate::compare::Comparison;
use crate::config::Config;
use crate::probe::CheckFailure;
use crate::throughput::Throughput;

/// Render bytes as lowercase hex, optionally split into groups.
pub fn hex(bytes: &[u8], group_bytes: usize) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if group_bytes > 0 && i > 0 && i % group_bytes == 0 {
            out.push(' ');
        }
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// Column of byte `offset` inside a string produced by [`hex`].
fn hex_column(offset: usize, group_bytes: usize) -> usize {
    let separators = if group_bytes > 0 { offset / group_bytes } else { 0 };
    offset * 2 + separators
}

fn paint(text: &str, color: bool, f: impl FnOnce(&str) -> colored::ColoredString) -> String {
    if color {
        f(text).to_string()
    } else {
        text.to_string()
    }
}

/// Format a comparison report.
///
/// On mismatch both full buffers are always rendered, followed by a caret
/// under the first differing byte of the computed output.
pub fn format_comparison(
    label: &str,
    reference: &[u8],
    actual: &[u8],
    cmp: &Comparison,
    config: &Config,
) -> String {
    let mut output = String::new();

    let show_buffers = config.show_buffers || !cmp.is_match();
    if show_buffers {
        output.push_str(&format!(
            "[test] expected output {} is {}\n",
            label,
            hex(&reference[..cmp.len], config.group_bytes)
        ));
        let computed_prefix = format!("[test] computed output {} is ", label);
        output.push_str(&computed_prefix);
        output.push_str(&hex(&actual[..cmp.len], config.group_bytes));
        output.push('\n');

        if let Some(div) = cmp.first_divergence {
            let column = computed_prefix.chars().count() + hex_column(div.offset, config.group_bytes);
            output.push_str(&" ".repeat(column));
            output.push_str(&paint("^^", config.color, |s| s.red().bold()));
            output.push('\n');
        }
    }

    match cmp.first_divergence {
        None => {
            let line = format!("[test] {} is a success", label);
            output.push_str(&paint(&line, config.color, |s| s.green()));
        }
        Some(div) => {
            let line = format!(
                "[test] reference {} and computed {} differ at byte {} \
                 (expected 0x{:02x}, got 0x{:02x}; {} of {} bytes differ)",
                label, label, div.offset, div.expected, div.actual, cmp.mismatches, cmp.len
            );
            output.push_str(&paint(&line, config.color, |s| s.red().bold()));
        }
    }
    output.push('\n');

    output
}

/// Format a cycles-per-round line.
pub fn format_throughput(t: &Throughput) -> String {
    format!(
        "[perf] cpu cycles per round (averaged over {}) = {:.3}\n",
        t.rounds, t.mean_cycles_per_round
    )
}

/// Format a rejected throughput measurement.
pub fn format_invalid_measurement(reason: &str, color: bool) -> String {
    let line = format!("[perf] invalid measurement: {}", reason);
    format!("{}\n", paint(&line, color, |s| s.yellow().bold()))
}

/// Format a comparison that could not be performed.
pub fn format_invalid_comparison(label: &str, reason: &str, color: bool) -> String {
    let line = format!("[test] {} invalid comparison: {}", label, reason);
    format!("{}\n", paint(&line, color, |s| s.red().bold()))
}

/// Format a computed output whose length differs from the reference.
pub fn format_length_mismatch(label: &str, expected: usize, actual: usize, color: bool) -> String {
    let line = format!(
        "[test] {} length differs: expected {} bytes, computed {} bytes",
        label, expected, actual
    );
    format!("{}\n", paint(&line, color, |s| s.red().bold()))
}

/// Format an elapsed wall-clock time.
pub fn format_clock_diff(elapsed_secs: f64) -> String {
    format!("[time] elapsed: {:.6} s\n", elapsed_secs)
}

/// Format a failed scalar check.
pub fn format_check_failure(failure: &CheckFailure, color: bool) -> String {
    let line = format!("[check] failure: {} != {}", failure.expected, failure.actual);
    format!("{}\n", paint(&line, color, |s| s.red().bold()))
}

/// Format an error code reported by the code under test.
pub fn format_error_code(code: u32) -> String {
    format!("[error] got error code {}\n", code)
}
