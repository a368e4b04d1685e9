//! Shared components for CLI commands
//!
//! This module contains logging setup and output helpers used across
//! multiple command implementations.

use crate::Result;
use crate::cli::args::Args;
use crate::header::{HeaderField, WmoHeader};
use crate::models::HeaderRecord;
use serde_json::{Map, Value};
use tracing::debug;

/// Set up structured logging to stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wmo_header={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Render a header as aligned `name value` lines.
///
/// With no fields selected every canonical field is printed and absent values
/// show as `-`. With fields selected only their values are printed, one per
/// line, with absent values as empty lines.
pub fn render_text(header: &WmoHeader, fields: &[HeaderField]) -> String {
    if !fields.is_empty() {
        return fields
            .iter()
            .map(|&field| header.field(field).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut lines: Vec<String> = CANONICAL_FIELDS
        .iter()
        .map(|&field| format!("{:<9}{}", field.name(), header.field(field).unwrap_or("-")))
        .collect();
    if let Some(kind) = header.addendum_kind() {
        lines.push(format!("{:<9}{}", "kind", kind));
    }
    lines.join("\n")
}

/// Render a header as JSON, either the full record or the selected fields
pub fn render_json(header: &WmoHeader, fields: &[HeaderField]) -> serde_json::Result<String> {
    if fields.is_empty() {
        return serde_json::to_string_pretty(&HeaderRecord::from(header));
    }

    let map: Map<String, Value> = fields
        .iter()
        .map(|&field| {
            let value = header
                .field(field)
                .map_or(Value::Null, |v| Value::String(v.to_string()));
            (field.name().to_string(), value)
        })
        .collect();
    serde_json::to_string_pretty(&map)
}

/// Fields printed by default, aliases excluded
const CANONICAL_FIELDS: [HeaderField; 13] = [
    HeaderField::Raw,
    HeaderField::Product,
    HeaderField::Station,
    HeaderField::Time,
    HeaderField::Addendum,
    HeaderField::Region,
    HeaderField::T1,
    HeaderField::T2,
    HeaderField::T1t2,
    HeaderField::A1,
    HeaderField::A2,
    HeaderField::A1a2,
    HeaderField::Ii,
];
