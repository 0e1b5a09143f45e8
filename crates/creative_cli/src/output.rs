//! Terminal output helpers. Styled text for humans, one JSON object per line for machines.
//!
//! Relayed fragments are the only thing written to stdout in text mode while a
//! reply streams; status lines and spinners go to stderr.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::cli::OutputFormat;

// ── Global format flag ─────────────────────────────────────────────

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    if matches!(format, OutputFormat::Json) {
        JSON_MODE.store(true, Ordering::Relaxed);
    }
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

// ── JSON envelope ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Msg<'a> {
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

fn envelope(level: &str, message: &str, data: Option<&JsonValue>) -> String {
    let msg = Msg {
        level,
        message,
        data,
    };
    serde_json::to_string(&msg).unwrap_or_else(|_| {
        serde_json::json!({ "level": level, "message": message }).to_string()
    })
}

fn emit_json(level: &str, message: &str, data: Option<&JsonValue>) {
    println!("{}", envelope(level, message, data));
}

// ── Status lines ───────────────────────────────────────────────────

pub fn header(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).bold().cyan());
    }
}

pub fn error(text: &str) {
    if is_json() {
        eprintln!("{}", envelope("error", text, None));
    } else {
        eprintln!("{} {}", style("✗").red(), style(text).bright());
    }
}

pub fn warning(text: &str) {
    if is_json() {
        eprintln!("{}", envelope("warning", text, None));
    } else {
        eprintln!("{} {}", style("!").yellow(), style(text).bright());
    }
}

pub fn dim(text: &str) {
    if !is_json() {
        eprintln!("{}", style(text).dim());
    }
}

pub fn prompt(text: &str) {
    if !is_json() {
        eprint!("{} ", style(text).green().bold());
        let _ = std::io::stderr().flush();
    }
}

// ── Fragments ──────────────────────────────────────────────────────

/// JSON line for one relayed fragment.
pub fn fragment_line(text: &str) -> String {
    serde_json::json!({ "fragment": text }).to_string()
}

/// Write one fragment to stdout as soon as it arrives.
pub fn fragment(text: &str) {
    let mut stdout = std::io::stdout().lock();
    if is_json() {
        let _ = writeln!(stdout, "{}", fragment_line(text));
    } else {
        let _ = write!(stdout, "{text}");
    }
    let _ = stdout.flush();
}

/// Close a streamed reply.
pub fn reply_end() {
    if is_json() {
        emit_json("done", "", None);
    } else {
        println!();
    }
}

// ── Tables ─────────────────────────────────────────────────────────

/// Print key/value rows as a table, or as one JSON object in JSON mode.
pub fn kv_table(title: &str, rows: &[(&str, String)]) {
    if is_json() {
        let data: serde_json::Map<String, JsonValue> = rows
            .iter()
            .map(|(k, v)| (k.to_string(), JsonValue::String(v.clone())))
            .collect();
        emit_json("data", title, Some(&JsonValue::Object(data)));
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Key")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Value")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
        ]);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key).fg(Color::Green), Cell::new(value)]);
    }
    header(title);
    println!("{table}");
}

// ── Spinners ───────────────────────────────────────────────────────

/// Spinner shown on stderr until the first fragment arrives. Hidden in JSON mode.
pub fn spinner(message: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}
