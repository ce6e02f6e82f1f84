//! File handles accepted by the task input collector.
//!
//! Only metadata is ever inspected: the file name and its declared media
//! type. Neither the drop path nor the picker path opens the file.

use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// SupportedFormat
// ---------------------------------------------------------------------------

/// The document formats a task may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportedFormat {
    Pdf,
    Docx,
    Xlsx,
    Csv,
}

impl SupportedFormat {
    pub fn all() -> &'static [SupportedFormat] {
        &[
            SupportedFormat::Pdf,
            SupportedFormat::Docx,
            SupportedFormat::Xlsx,
            SupportedFormat::Csv,
        ]
    }

    pub fn mime(self) -> &'static str {
        match self {
            SupportedFormat::Pdf => "application/pdf",
            SupportedFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            SupportedFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            SupportedFormat::Csv => "text/csv",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            SupportedFormat::Pdf => "pdf",
            SupportedFormat::Docx => "docx",
            SupportedFormat::Xlsx => "xlsx",
            SupportedFormat::Csv => "csv",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.mime() == mime)
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::all().iter().copied().find(|f| f.extension() == ext)
    }
}

// ---------------------------------------------------------------------------
// FileCategory
// ---------------------------------------------------------------------------

/// Icon hint for an uploaded file chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Pdf,
    Word,
    Sheet,
    Other,
}

impl FileCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FileCategory::Pdf => "pdf",
            FileCategory::Word => "word",
            FileCategory::Sheet => "sheet",
            FileCategory::Other => "file",
        }
    }
}

// ---------------------------------------------------------------------------
// FileHandle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub name: String,
    /// Declared MIME type. Empty when the source did not declare one.
    pub media_type: String,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
        }
    }

    /// Build a handle from a path, guessing the media type from its extension.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let media_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or_default()
            .to_string();
        Self { name, media_type }
    }

    /// Resolve the declared media type to a supported format. The extension
    /// is only consulted when no media type was declared.
    pub fn format(&self) -> Option<SupportedFormat> {
        if !self.media_type.is_empty() {
            return SupportedFormat::from_mime(&self.media_type);
        }
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(SupportedFormat::from_extension)
    }

    /// The one predicate both the drop path and the picker path go through.
    pub fn is_supported(&self) -> bool {
        self.format().is_some()
    }

    pub fn category(&self) -> FileCategory {
        let t = self.media_type.as_str();
        if t.contains("pdf") {
            FileCategory::Pdf
        } else if t.contains("word") {
            FileCategory::Word
        } else if t.contains("sheet") || t.contains("csv") {
            FileCategory::Sheet
        } else {
            FileCategory::Other
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
