use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::core::rendered_chart::decode_export_payload;
use crate::error::{PlaygroundError, PlaygroundResult};

pub const EXPORT_EXTENSION: &str = "png";
const UNTITLED_STEM: &str = "chart";

/// Save intent emitted by the workflow when the user exports a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub encoded_image: String,
    pub filename: String,
}

impl ExportRequest {
    pub fn decode_image(&self) -> PlaygroundResult<Vec<u8>> {
        decode_export_payload(&self.encoded_image)
    }
}

/// Local save sink. Implementations make the bytes available to the user
/// under the requested name.
pub trait ChartExporter: Send + Sync {
    fn save(&self, request: &ExportRequest) -> PlaygroundResult<()>;
}

/// Derives the export filename from a chart title.
///
/// Whitespace runs become a single underscore and the fixed extension is
/// appended. A blank title falls back to `chart.png`.
#[must_use]
pub fn export_filename(title: &str) -> String {
    let stem = title.split_whitespace().collect::<Vec<_>>().join("_");
    let stem = if stem.is_empty() { UNTITLED_STEM } else { stem.as_str() };
    format!("{stem}.{EXPORT_EXTENSION}")
}

/// Writes decoded images into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    directory: PathBuf,
}

impl DirectoryExporter {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Target path for `filename`, with path separators neutralized.
    #[must_use]
    pub fn target_path(&self, filename: &str) -> PathBuf {
        let safe: String = filename
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        let safe = safe.trim_start_matches('.');
        let safe = if safe.is_empty() {
            export_filename("")
        } else {
            safe.to_owned()
        };
        self.directory.join(safe)
    }
}

impl ChartExporter for DirectoryExporter {
    fn save(&self, request: &ExportRequest) -> PlaygroundResult<()> {
        let bytes = request.decode_image()?;
        std::fs::create_dir_all(&self.directory).map_err(|e| {
            PlaygroundError::ExportFailed(format!(
                "failed to create `{}`: {e}",
                self.directory.display()
            ))
        })?;
        let path = self.target_path(&request.filename);
        std::fs::write(&path, &bytes).map_err(|e| {
            PlaygroundError::ExportFailed(format!("failed to write `{}`: {e}", path.display()))
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "chart exported");
        Ok(())
    }
}

/// Exporter that keeps every request in memory; used for headless runs and
/// tests.
#[derive(Debug, Default)]
pub struct MemoryExporter {
    saved: Mutex<Vec<ExportRequest>>,
}

impl MemoryExporter {
    #[must_use]
    pub fn saved(&self) -> Vec<ExportRequest> {
        self.saved
            .lock()
            .map(|saved| saved.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    #[must_use]
    pub fn last_saved(&self) -> Option<ExportRequest> {
        self.saved().pop()
    }
}

impl ChartExporter for MemoryExporter {
    fn save(&self, request: &ExportRequest) -> PlaygroundResult<()> {
        self.saved
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(request.clone());
        Ok(())
    }
}
