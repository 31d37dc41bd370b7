//! check command - Compare headers on disk with the schema

use std::path::Path;

use crate::engine::{self, Context};
use crate::ui::output;
use anyhow::{bail, Context as _, Result};

/// Report whether both headers are up to date.
///
/// Fails if either header is stale or missing, after printing the report.
pub fn check(ctx: &Context, schema: Option<&Path>, json: bool) -> Result<()> {
    let report = engine::check(ctx, schema)?;

    if json {
        let text = serde_json::to_string_pretty(&report)
            .context("failed to serialize check report")?;
        println!("{text}");
    } else {
        output::print(output::format_check_report(&report), ctx.verbosity());
    }

    if !report.is_up_to_date() {
        bail!("generated headers are out of date; run `makedmt generate`");
    }

    Ok(())
}
