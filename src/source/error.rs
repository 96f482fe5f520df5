//! Errors raised while reading a tabular file.

/// All errors that can occur while opening or streaming a source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML parsing error from quick-xml.
    #[error("XML parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The requested sheet does not exist.
    #[error("Unknown sheet: {0}")]
    UnknownSheet(String),

    /// The workbook structure is not what we expect.
    #[error("Malformed workbook: {0}")]
    Malformed(String),
}

/// Convenience alias used by the sources.
pub type Result<T> = std::result::Result<T, SourceError>;
