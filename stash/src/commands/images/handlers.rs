use super::*;
use libstash::StashError;
use std::io::Write;

/// Handle the images command
pub fn handle_images(ctx: &AppContext, args: &ImagesArgs) {
    let output = match list_images(ctx, args) {
        Ok(output) => output,
        Err(e) => {
            format::error(ctx, &e);
            std::process::exit(1);
        }
    };

    tracing::debug!(bytes = output.len(), "writing listing");
    if let Err(e) = write_output(&mut std::io::stdout().lock(), &output) {
        format::error(ctx, &e);
        std::process::exit(1);
    }
}

/// Write rendered output in one piece
pub fn write_output<W: Write>(out: &mut W, bytes: &[u8]) -> Result<()> {
    out.write_all(bytes)
        .and_then(|()| out.flush())
        .map_err(|e| StashError::io_with_source("failed to write output", e))
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
