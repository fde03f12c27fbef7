use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MountError {
    #[error("not a valid line of mount info (expected 6 fields, got {fields}): {line:?}")]
    FieldCount { line: String, fields: usize },

    #[error("invalid value of fs_freq: {0:?}")]
    InvalidFreq(String),

    #[error("invalid value of fs_passno: {0:?}")]
    InvalidPassno(String),

    #[error("invalid process id: {0:?}")]
    InvalidPid(String),

    #[error("mount table unavailable at {path:?}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MountError {
    /// True for errors caused by a mount table line that could not be parsed.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            MountError::FieldCount { .. } | MountError::InvalidFreq(_) | MountError::InvalidPassno(_)
        )
    }
}
