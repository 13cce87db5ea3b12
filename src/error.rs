use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by [`crate::generate`] and the components it drives.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render {path:?}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// A marker could not be evaluated against the data context.
///
/// The file the content came from is not known here; the materializer wraps
/// this into [`Error::Render`] together with the template path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    pub message: String,
    pub line: Option<usize>,
    pub source_line: Option<String>,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(line) = self.line {
            write!(f, " (line {}", line)?;
            if let Some(text) = &self.source_line {
                write!(f, ": {}", text.trim())?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl std::error::Error for RenderError {}
