use crate::ports::outbound::OutputPresenter;
use crate::shared::error::AppError;
use crate::shared::security::validate_write_target;
use crate::shared::Result;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// FileSystemWriter adapter for writing reports to files
///
/// Refuses to write through a symbolic link or into a missing directory.
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        validate_write_target(&self.output_path)?;

        fs::write(&self.output_path, content).map_err(|e| AppError::FileWriteError {
            path: self.output_path.clone(),
            details: e.to_string(),
        })?;

        tracing::info!(path = %self.output_path.display(), "report written");
        Ok(())
    }
}

/// StdoutPresenter adapter for writing reports to stdout
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| {
                if content.ends_with('\n') {
                    Ok(())
                } else {
                    stdout.write_all(b"\n")
                }
            })
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}
