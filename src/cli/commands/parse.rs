//! Parse command: decompose a header line into its fields

use super::shared::{render_json, render_text};
use crate::cli::args::{OutputFormat, ParseArgs};
use crate::header::WmoHeader;
use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::debug;

pub fn run_parse(args: &ParseArgs) -> Result<ExitCode> {
    let header = WmoHeader::parse(&args.line).context("Failed to parse header line")?;
    debug!("Parsed header: {:?}", header);

    let output = match args.format {
        OutputFormat::Text => render_text(&header, &args.fields),
        OutputFormat::Json => {
            render_json(&header, &args.fields).context("Failed to serialize header")?
        }
    };
    println!("{}", output);

    Ok(ExitCode::SUCCESS)
}
