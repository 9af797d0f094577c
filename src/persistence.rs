use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants;

/// Destination for the generated configuration
pub trait Persistence {
    fn write_config(&mut self, contents: &str, path: &Path) -> Result<()>;
}

/// Writes to the filesystem, creating parent directories as needed
#[derive(Debug, Default)]
pub struct FilePersistence;

impl Persistence for FilePersistence {
    fn write_config(&mut self, contents: &str, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .context(format!("Failed to create config directory: {}", parent.display()))?;
        }
        fs::write(path, contents)
            .context(format!("Failed to write monitor config to {}", path.display()))?;
        info!(path = %path.display(), bytes = contents.len(), "Wrote monitor configuration");
        Ok(())
    }
}

/// `<config_dir>/hypr/configs/autogen/monitors.conf`
pub fn default_output_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(constants::config::OUTPUT_DIR);
    path.push(constants::config::OUTPUT_FILENAME);
    path
}

/// Keeps written configs in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    pub writes: Vec<(PathBuf, String)>,
    pub fail: bool,
}

#[cfg(test)]
impl Persistence for MemoryPersistence {
    fn write_config(&mut self, contents: &str, path: &Path) -> Result<()> {
        if self.fail {
            anyhow::bail!("disk full");
        }
        self.writes.push((path.to_path_buf(), contents.to_string()));
        Ok(())
    }
}
