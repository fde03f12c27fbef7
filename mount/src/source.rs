use crate::error::MountError;
use nix::unistd::Pid;
use std::path::PathBuf;

const PROC_MOUNTS: &str = "/proc/mounts";

/// Where the mount table text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TableSource {
    /// The mount table of the current process.
    #[default]
    Current,
    /// The mount table of another process, `/proc/<pid>/mounts`.
    Process(Pid),
    /// Any file in mount table syntax.
    File(PathBuf),
}

impl TableSource {
    /// Mount table of the process `pid`. Only positive identifiers are accepted.
    pub fn process(pid: i32) -> Result<Self, MountError> {
        if pid <= 0 {
            return Err(MountError::InvalidPid(pid.to_string()));
        }
        Ok(TableSource::Process(Pid::from_raw(pid)))
    }

    pub fn path(&self) -> PathBuf {
        match self {
            TableSource::Current => PathBuf::from(PROC_MOUNTS),
            TableSource::Process(pid) => PathBuf::from(format!("/proc/{}/mounts", pid)),
            TableSource::File(path) => path.clone(),
        }
    }

    /// Reads the whole mount table in one go.
    pub fn read(&self) -> Result<Vec<u8>, MountError> {
        let path = self.path();
        let content = std::fs::read(&path).map_err(|source| MountError::SourceUnavailable {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Read {} bytes of mount table from {:?}", content.len(), path);
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(TableSource::Current.path(), PathBuf::from("/proc/mounts"));
        assert_eq!(
            TableSource::process(42).unwrap().path(),
            PathBuf::from("/proc/42/mounts")
        );
        assert_eq!(
            TableSource::File(PathBuf::from("/tmp/mounts")).path(),
            PathBuf::from("/tmp/mounts")
        );
    }

    #[test]
    fn test_rejects_non_positive_pid() {
        assert!(matches!(TableSource::process(0), Err(MountError::InvalidPid(_))));
        assert!(matches!(TableSource::process(-7), Err(MountError::InvalidPid(_))));
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let source = TableSource::File(PathBuf::from("/nonexistent-mntfinder/mounts"));
        let err = source.read().unwrap_err();
        assert!(matches!(err, MountError::SourceUnavailable { .. }));
        assert!(!err.is_malformed());
    }
}
