use crate::domain::model::MapImage;
use crate::domain::ports::RenderSink;
use crate::utils::error::{LocatorError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Writes the map to a temporary file and opens it with an image viewer.
#[derive(Debug, Clone)]
pub struct DisplaySink {
    directory: PathBuf,
    viewer: Option<String>,
}

impl DisplaySink {
    pub fn new(viewer: Option<String>) -> Self {
        Self {
            directory: std::env::temp_dir(),
            viewer,
        }
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    fn viewer_command(&self, path: &Path) -> Command {
        if let Some(viewer) = &self.viewer {
            let mut command = Command::new(viewer);
            command.arg(path);
            return command;
        }

        if cfg!(target_os = "windows") {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", ""]).arg(path);
            command
        } else if cfg!(target_os = "macos") {
            let mut command = Command::new("open");
            command.arg(path);
            command
        } else {
            let mut command = Command::new("xdg-open");
            command.arg(path);
            command
        }
    }
}

impl RenderSink for DisplaySink {
    fn present(&self, map: &MapImage) -> Result<Option<PathBuf>> {
        let file_name = format!(
            "pharmacy_map_{}.{}",
            chrono::Local::now().format("%Y%m%d_%H%M%S"),
            map.extension()
        );
        let path = self.directory.join(file_name);
        write_map(&path, map)?;

        let mut command = self.viewer_command(&path);
        tracing::debug!("Opening map with {:?}", command);
        command.spawn().map_err(|e| LocatorError::PresentationError {
            message: format!("cannot start image viewer for {}: {}", path.display(), e),
        })?;
        Ok(None)
    }
}

/// Saves the map to a fixed path.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RenderSink for FileSink {
    fn present(&self, map: &MapImage) -> Result<Option<PathBuf>> {
        write_map(&self.path, map)?;
        Ok(Some(self.path.clone()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoopSink;

impl RenderSink for NoopSink {
    fn present(&self, map: &MapImage) -> Result<Option<PathBuf>> {
        tracing::info!(
            "Map display skipped ({}x{}, {} bytes)",
            map.width,
            map.height,
            map.bytes.len()
        );
        Ok(None)
    }
}

fn write_map(path: &Path, map: &MapImage) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    tracing::debug!("Writing {} byte map to {}", map.bytes.len(), path.display());
    fs::write(path, &map.bytes)?;
    Ok(())
}
