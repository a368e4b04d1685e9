//! Build command: synthesize a header line from explicit fields

use crate::cli::args::BuildArgs;
use crate::header::WmoHeader;
use anyhow::{Context, Result};
use std::process::ExitCode;

pub fn run_build(args: &BuildArgs) -> Result<ExitCode> {
    let header = WmoHeader::from_fields(
        &args.product,
        &args.station,
        &args.time,
        args.addendum.as_deref(),
    )
    .context("Fields do not form a valid header")?;

    println!("{}", header);
    Ok(ExitCode::SUCCESS)
}
