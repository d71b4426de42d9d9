//
//  apim-client
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output Formatting
//!
//! Pretty-printed JSON for scripting. Field names match the platform's wire
//! format (camelCase), so output can be piped into `jq` or saved and reused
//! as a request file.

use serde::Serialize;
use std::io::{self, Write};

/// Writes a value as pretty-printed JSON to stdout.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or stdout is not
/// writable.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json_to(&mut handle, value)
}

/// Writes a value as pretty-printed JSON to `writer`, followed by a newline.
///
/// # Example
///
/// ```rust,ignore
/// use apim_client::output::write_json_to;
///
/// let mut buffer = Vec::new();
/// write_json_to(&mut buffer, &serde_json::json!({"id": "abc-123"}))?;
/// assert!(String::from_utf8(buffer)?.contains("\"id\": \"abc-123\""));
/// ```
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_to_buffer() {
        let mut buffer = Vec::new();
        write_json_to(&mut buffer, &serde_json::json!({"applicationId": "app-1"})).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "{\n  \"applicationId\": \"app-1\"\n}\n");
    }
}
