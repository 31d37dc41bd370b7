//! generate command - Compile a schema into both headers

use std::path::PathBuf;

use crate::engine::{self, Context, GenerateRequest};
use crate::ui::output;
use anyhow::Result;

/// Compile the schema and report what was written.
pub fn generate(
    ctx: &Context,
    schema: Option<PathBuf>,
    internal_out: Option<PathBuf>,
    public_out: Option<PathBuf>,
) -> Result<()> {
    let verbosity = ctx.verbosity();
    let request = GenerateRequest {
        schema,
        internal_out,
        public_out,
    };

    let report = engine::generate(ctx, &request)?;

    output::print(
        format!(
            "Wrote {} and {} ({})",
            report.internal_path.display(),
            report.public_path.display(),
            output::format_stats(&report.stats)
        ),
        verbosity,
    );

    Ok(())
}
