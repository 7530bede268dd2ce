//! Error types for recipe graph loading

use std::path::PathBuf;

/// Recipe source could not be turned into a graph
#[derive(Debug, thiserror::Error)]
pub enum GraphLoadError {
    /// Source file could not be read
    #[error("failed to read recipe source {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Source was not a JSON array of recipe records
    #[error("malformed recipe source: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GraphLoadError {
    /// Check if the failure came from the filesystem rather than the content
    #[inline]
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let err: GraphLoadError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(err.to_string().contains("malformed recipe source"));
        assert!(!err.is_io());
    }

    #[test]
    fn io_error_display() {
        let err = GraphLoadError::Io {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("missing.json"));
        assert!(err.is_io());
    }
}
