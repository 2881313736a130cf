use crate::cue::Cue;

use std::io::{BufWriter, Write};

use anyhow::{Context, Result};

/// Writes `cues` as a pretty-printed JSON array followed by a newline.
/// Non-ASCII text is written as-is.
pub fn serialise<W: Write>(cues: &[Cue], dst: W) -> Result<()> {
    let mut writer = BufWriter::new(dst);
    serde_json::to_writer_pretty(&mut writer, cues).context("Failed to encode cues as JSON.")?;
    writeln!(writer).context("Failed to write output.")?;
    writer.flush().context("Failed to write output.")?;
    Ok(())
}
