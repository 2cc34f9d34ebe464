//! Terminal output for the audioplane CLI
//!
//! # Quiet Mode
//!
//! Spinners are suppressed when:
//! - `--quiet` flag is passed
//! - `AUDIOPLANE_QUIET=1` environment variable is set
//! - stderr is not a TTY (piped output)
//!
//! Results go to stdout (a plain table, or JSON with `--json`); spinners,
//! flashes and diagnostics go to stderr.

use std::io::IsTerminal;
use std::sync::OnceLock;
use std::time::Duration;

use audioplane_core::flash::Flashable;
use audioplane_core::{Diagnostic, Fetched, Mutated};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::{json, Value};

static QUIET_MODE: OnceLock<bool> = OnceLock::new();

/// Call once at startup with the --quiet flag value.
pub fn init_quiet_mode(quiet_flag: bool) {
    let is_quiet = quiet_flag
        || std::env::var("AUDIOPLANE_QUIET")
            .map(|v| v == "1")
            .unwrap_or(false)
        || !std::io::stderr().is_terminal();

    QUIET_MODE.set(is_quiet).ok();
}

pub fn is_quiet() -> bool {
    *QUIET_MODE.get().unwrap_or(&false)
}

/// Spinner on stderr, `None` in quiet mode
pub fn spinner(msg: impl Into<String>) -> Option<ProgressBar> {
    if is_quiet() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

/// Run a store call under a spinner that clears once it resolves.
pub async fn with_spinner<T>(msg: &str, work: impl std::future::Future<Output = T>) -> T {
    let pb = spinner(format!("{}...", msg));
    let result = work.await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    result
}

/// Print a caught store failure. The command still succeeds.
pub fn print_diagnostic(diagnostic: &Diagnostic) {
    eprintln!("⚠ {}", diagnostic);
}

/// Print the rows of a read as a table or a JSON array.
pub fn print_fetched<T: Serialize>(fetched: &Fetched<T>, as_json: bool) {
    if let Some(diagnostic) = &fetched.diagnostic {
        print_diagnostic(diagnostic);
    }

    if as_json {
        println!("{}", to_json(&fetched.rows));
    } else {
        print!("{}", render_table(&fetched.rows));
    }
}

/// Print the outcome of a write: the flash (or a miss notice) and the row.
pub fn print_mutated<T: Flashable + Serialize>(mutated: &Mutated<T>, as_json: bool) {
    let flash = mutated.flash();

    if as_json {
        let body = json!({
            "record": mutated.record,
            "flash": flash,
            "diagnostic": mutated.diagnostic.as_ref().map(|d| d.to_string()),
        });
        println!("{}", to_json(&body));
        return;
    }

    match (&flash, &mutated.diagnostic) {
        (Some(flash), _) => eprintln!("{} {}", flash.action.icon(), flash),
        (None, Some(diagnostic)) => print_diagnostic(diagnostic),
        (None, None) => eprintln!("No {} matched", T::ENTITY),
    }
    if let Some(record) = &mutated.record {
        print!("{}", render_table(std::slice::from_ref(record)));
    }
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Render rows as an aligned text table. Columns follow the field order of
/// the first row; nulls render as blanks.
pub fn render_table<T: Serialize>(rows: &[T]) -> String {
    let rows: Vec<Value> = rows
        .iter()
        .filter_map(|row| serde_json::to_value(row).ok())
        .collect();

    let columns: Vec<String> = match rows.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => return "(no rows)\n".to_string(),
    };

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|col| cell(&row[col.as_str()])).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(col.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, &columns, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.replace('\n', " "),
        other => other.to_string(),
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        artist_id: i32,
        name: &'static str,
        location: Option<&'static str>,
    }

    #[test]
    fn empty_table() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(render_table(&rows), "(no rows)\n");
    }

    #[test]
    fn columns_keep_field_order_and_align() {
        let rows = [
            Row {
                artist_id: 1,
                name: "Taylor Swift",
                location: Some("Nashville, TN"),
            },
            Row {
                artist_id: 12,
                name: "Silent Artist",
                location: None,
            },
        ];
        let table = render_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "artist_id  name           location");
        assert_eq!(lines[1], "---------  -------------  -------------");
        assert_eq!(lines[2], "1          Taylor Swift   Nashville, TN");
        assert_eq!(lines[3], "12         Silent Artist");
    }

    #[test]
    fn multiline_text_stays_on_one_row() {
        assert_eq!(cell(&json!("Song: a\nArtist: b")), "Song: a Artist: b");
        assert_eq!(cell(&json!(3.5)), "3.5");
    }
}
