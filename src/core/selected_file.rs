use std::path::Path;

use crate::error::{PlaygroundError, PlaygroundResult};

const CSV_MIME: &str = "text/csv";
const FALLBACK_MIME: &str = "application/octet-stream";

/// File picked by the user for ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    content: Vec<u8>,
    mime_type: String,
}

impl SelectedFile {
    /// Creates a file from in-memory content. The MIME type is guessed from
    /// the extension.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        let mime_type = guess_mime(&name).to_owned();
        Self {
            name,
            content: content.into(),
            mime_type,
        }
    }

    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Reads a file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> PlaygroundResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or(PlaygroundError::NoFileSelected)?
            .to_owned();
        let content = std::fs::read(path).map_err(|e| {
            PlaygroundError::IngestionFailed(format!("failed to read `{}`: {e}", path.display()))
        })?;
        Ok(Self::new(name, content))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

fn guess_mime(name: &str) -> &'static str {
    let is_csv = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv { CSV_MIME } else { FALLBACK_MIME }
}
