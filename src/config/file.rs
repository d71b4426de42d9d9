//
//  apim-client
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O Module
//!
//! Small helpers used by [`Config`](super::Config) to read and write the
//! TOML file. Write operations create parent directories first.

use std::path::Path;

use anyhow::{Context, Result};

/// Reads the contents of a configuration file.
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Writes configuration content, creating parent directories as needed.
///
/// On Unix the file is restricted to the owner because it may hold the
/// platform password.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

/// Checks whether a configuration file exists.
pub fn config_exists(path: &Path) -> bool {
    path.exists()
}
