//
//  apim-client
//  output/yaml.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! YAML output. Uses the same field names as JSON.

use serde::Serialize;
use std::io::{self, Write};

/// Writes a value as YAML to stdout.
pub fn write_yaml<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_yaml_to(&mut handle, value)
}

/// Writes a value as YAML to `writer`.
pub fn write_yaml_to<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
) -> anyhow::Result<()> {
    let yaml = serde_yaml::to_string(value)?;
    writer.write_all(yaml.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_yaml_to_buffer() {
        let mut buffer = Vec::new();
        write_yaml_to(
            &mut buffer,
            &serde_json::json!({"name": "PizzaApp", "throttlingPolicy": "Unlimited"}),
        )
        .unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("name: PizzaApp"));
        assert!(output.contains("throttlingPolicy: Unlimited"));
    }
}
