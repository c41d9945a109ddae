//! Signal file loading, saving and validation.

use std::path::Path;

use pf_signals::SignalSet;

use crate::error::{AppError, AppResult};
use crate::schema::SignalFile;

/// On-disk encoding of a signal file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(FileFormat::Yaml),
            Some("json") => Ok(FileFormat::Json),
            _ => Err(AppError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Load a signal file from YAML or JSON.
pub fn load_signal_file(path: &Path) -> AppResult<SignalFile> {
    let format = FileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| AppError::SignalFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let file: SignalFile = match format {
        FileFormat::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| AppError::Parse(format!("invalid signal YAML: {}", e)))?,
        FileFormat::Json => serde_json::from_str(&content)
            .map_err(|e| AppError::Parse(format!("invalid signal JSON: {}", e)))?,
    };
    tracing::debug!(path = %path.display(), nodes = file.nodes.len(), "loaded signal file");
    Ok(file)
}

/// Save a signal file, encoding chosen by extension.
pub fn save_signal_file(path: &Path, file: &SignalFile) -> AppResult<()> {
    let content = match FileFormat::from_path(path)? {
        FileFormat::Yaml => serde_yaml::to_string(file)
            .map_err(|e| AppError::Serialization(format!("Failed to encode YAML: {}", e)))?,
        FileFormat::Json => serde_json::to_string_pretty(file)?,
    };

    std::fs::write(path, content).map_err(|e| AppError::SignalFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Check a parsed file and turn it into a signal set.
pub fn validate_signal_file(file: &SignalFile) -> AppResult<SignalSet> {
    let set = file.to_signal_set()?;
    tracing::info!(
        samples = set.samples(),
        frequency_hz = set.sampling().frequency_hz(),
        "signal file is valid"
    );
    Ok(set)
}

/// Load and validate in one step.
pub fn load_signal_set(path: &Path) -> AppResult<SignalSet> {
    validate_signal_file(&load_signal_file(path)?)
}
