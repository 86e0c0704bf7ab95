use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error that might be returned while reading a results report.
///
/// It might wrap an IO error or be a parsing error. In both cases the report is rejected as a whole.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct XmlResultsError {
    #[from]
    pub(crate) kind: XmlResultsErrorKind,
}

impl XmlResultsError {
    /// Returns `true` if the report could not be read at all, as opposed to being malformed.
    pub fn is_io(&self) -> bool {
        match &self.kind {
            XmlResultsErrorKind::Io { .. } => true,
            XmlResultsErrorKind::Xml(quick_xml::Error::Io(_)) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum XmlResultsErrorKind {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error("expected a <{expected}> root element, found <{found}>")]
    UnexpectedRoot { expected: String, found: String },
    #[error("the report has no root element, expecting <{0}>")]
    MissingRoot(String),
    #[error("the report ends before <{0}> is closed")]
    UnexpectedEof(String),
    #[error("I/O error on file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl From<quick_xml::Error> for XmlResultsError {
    fn from(error: quick_xml::Error) -> Self {
        Self {
            kind: XmlResultsErrorKind::Xml(error),
        }
    }
}
