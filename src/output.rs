//! JSON rendering of the search envelope.

use crate::error::Result;
use flipkart_search::SearchEnvelope;
use std::io::Write;

/// Render `envelope` as two-space indented JSON.
///
/// Non-ASCII text such as `₹` stays as-is rather than being escaped.
pub fn render_envelope(envelope: &SearchEnvelope) -> Result<String> {
    Ok(serde_json::to_string_pretty(envelope)?)
}

/// Write the rendered envelope and a trailing newline to `out`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_envelope<W: Write>(out: &mut W, envelope: &SearchEnvelope) -> Result<()> {
    let rendered = render_envelope(envelope)?;
    out.write_all(rendered.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
