use thiserror::Error;

/// Boundary and builder failures. Transport problems mean "no data";
/// everything else means the input cannot be trusted and must fail loudly.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no data at {0}")]
    NotFound(String),

    #[error("transport failure reading {what}: {source}")]
    Transport {
        what: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document {what}: {source}")]
    Malformed {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{op} is not supported by this backend")]
    Unsupported { op: &'static str },

    #[error("no index named {0} in the catalog")]
    UnknownIndex(String),

    #[error(transparent)]
    UnknownFile(#[from] UnknownFileError),
}

impl Error {
    /// Wrap an io failure, keeping NotFound distinct from real transport
    /// trouble.
    pub fn io(what: impl Into<String>, source: std::io::Error) -> Self {
        let what = what.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(what)
        } else {
            Self::Transport { what, source }
        }
    }

    /// Transport-class failures are surfaced as absence of data, not as
    /// corruption of it.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Transport { .. })
    }
}

/// A commit referenced a file name absent from the directory listing. This
/// signals inconsistent backend data and is never silently skipped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("segment {segment} references unknown file {file:?}")]
pub struct UnknownFileError {
    pub file: String,
    pub segment: String,
}
