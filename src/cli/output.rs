use std::io::Write;

use serde::Serialize;

use crate::error::{AstraError, Result};

/// Render a value as two-space indented JSON.
pub fn render_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(AstraError::Serialize)
}

/// Write a value as indented JSON followed by a newline.
pub fn emit_json<T: Serialize, W: Write>(out: &mut W, value: &T) -> Result<()> {
    let payload = render_json(value)?;
    writeln!(out, "{payload}")?;
    Ok(())
}
