/// Error types for editing operations.
use crate::ooxml::OoxmlError;
use crate::ooxml::opc::OpcError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for editing operations.
pub type Result<T> = std::result::Result<T, EditorError>;

/// Errors reported by the formatter, the extractor, the style mutator and
/// the session operations.
#[derive(Error, Debug)]
pub enum EditorError {
    /// A document, paragraph index or required style is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// The document cannot be parsed or is structurally invalid.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// The requested style cannot be used or created.
    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid formatting template.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// The kind of an [`EditorError`], as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Malformed,
    Unsupported,
    Io,
    Config,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Malformed => "malformed",
            Self::Unsupported => "unsupported",
            Self::Io => "io",
            Self::Config => "config",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EditorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Malformed(_) => ErrorKind::Malformed,
            Self::Unsupported(_) => ErrorKind::Unsupported,
            Self::Io(_) => ErrorKind::Io,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<OoxmlError> for EditorError {
    /// File system failures keep their I/O kind and a missing file is
    /// `NotFound`; everything else means the package content is broken.
    fn from(err: OoxmlError) -> Self {
        match err {
            OoxmlError::Io(e) | OoxmlError::Opc(OpcError::IoError(e)) => Self::Io(e),
            OoxmlError::Opc(OpcError::PackageNotFound(path)) => {
                Self::NotFound(format!("document {}", path))
            },
            other => Self::Malformed(other.to_string()),
        }
    }
}

/// Outcome of a style update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Success,
    Error,
}

/// Structured result of a style update, suitable for JSON output.
///
/// Failures of an anticipated kind carry that kind and its message. Any
/// other failure is reported without a kind and with a generic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleUpdateReport {
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StyleUpdateReport {
    pub fn success() -> Self {
        Self {
            status: ReportStatus::Success,
            kind: None,
            message: None,
        }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status: ReportStatus::Error,
            kind: Some(kind),
            message: Some(message.into()),
        }
    }

    pub fn generic_failure() -> Self {
        Self {
            status: ReportStatus::Error,
            kind: None,
            message: Some("failed to update paragraph style".to_string()),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.status == ReportStatus::Success
    }
}
