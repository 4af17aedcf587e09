//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{DiachronArgs, OutputFormat};
use crate::error::Result;

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &DiachronArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(result, args),
        OutputFormat::Human => output_human(message, result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &DiachronArgs) -> Result<()> {
    println!("{}", render_json(result, args.pretty)?);
    Ok(())
}

pub fn render_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &DiachronArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!("{}", "─".repeat(message.chars().count()));
    }

    let value = serde_json::to_value(result)?;
    for line in render_human(&value) {
        println!("{line}");
    }
    Ok(())
}

/// Flatten a JSON value into indented `key: value` lines.
pub fn render_human(value: &serde_json::Value) -> Vec<String> {
    let mut lines = Vec::new();
    render_value(value, 0, &mut lines);
    lines
}

fn render_value(value: &serde_json::Value, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match value {
        serde_json::Value::Object(map) => {
            for (key, value) in map {
                if is_scalar(value) {
                    lines.push(format!("{indent}{key}: {}", scalar(value)));
                } else {
                    lines.push(format!("{indent}{key}:"));
                    render_value(value, depth + 1, lines);
                }
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                if is_scalar(item) {
                    lines.push(format!("{indent}- {}", scalar(item)));
                } else {
                    lines.push(format!("{indent}-"));
                    render_value(item, depth + 1, lines);
                }
            }
        }
        other => lines.push(format!("{indent}{}", scalar(other))),
    }
}

fn is_scalar(value: &serde_json::Value) -> bool {
    !matches!(
        value,
        serde_json::Value::Object(_) | serde_json::Value::Array(_)
    )
}

fn scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
