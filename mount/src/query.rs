use crate::entry::MountEntry;
use crate::path::resolve_path;
use crate::record::MountRecord;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Either a path to look up in the mount table or a record that was already
/// read from it.
#[derive(Debug, Clone)]
pub enum MountTarget<'a> {
    Path(Cow<'a, Path>),
    Record(&'a MountRecord),
}

impl MountTarget<'_> {
    /// The path this target names. For a record, its canonical target.
    pub fn path(&self) -> &Path {
        match self {
            MountTarget::Path(path) => path,
            MountTarget::Record(record) => record.target(),
        }
    }
}

impl<'a> From<&'a MountRecord> for MountTarget<'a> {
    fn from(record: &'a MountRecord) -> Self {
        MountTarget::Record(record)
    }
}

impl<'a> From<&'a Path> for MountTarget<'a> {
    fn from(path: &'a Path) -> Self {
        MountTarget::Path(Cow::Borrowed(path))
    }
}

impl<'a> From<&'a PathBuf> for MountTarget<'a> {
    fn from(path: &'a PathBuf) -> Self {
        MountTarget::Path(Cow::Borrowed(path.as_path()))
    }
}

impl From<PathBuf> for MountTarget<'_> {
    fn from(path: PathBuf) -> Self {
        MountTarget::Path(Cow::Owned(path))
    }
}

impl<'a> From<&'a str> for MountTarget<'a> {
    fn from(path: &'a str) -> Self {
        MountTarget::Path(Cow::Borrowed(Path::new(path)))
    }
}

impl From<String> for MountTarget<'_> {
    fn from(path: String) -> Self {
        MountTarget::Path(Cow::Owned(PathBuf::from(path)))
    }
}

/// Restricts queries to entries whose fields match every value that is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountFilter {
    pub source: Option<String>,
    pub target: Option<PathBuf>,
    pub fstype: Option<String>,
}

impl MountFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The target is resolved to its canonical form before matching.
    pub fn target(mut self, target: impl AsRef<Path>) -> Self {
        self.target = Some(resolve_path(target));
        self
    }

    pub fn fstype(mut self, fstype: impl Into<String>) -> Self {
        self.fstype = Some(fstype.into());
        self
    }

    pub fn matches(&self, entry: &MountEntry) -> bool {
        if self.source.as_ref().is_some_and(|source| *source != entry.source) {
            return false;
        }
        if self.target.as_ref().is_some_and(|target| *target != entry.target) {
            return false;
        }
        if self.fstype.as_ref().is_some_and(|fstype| *fstype != entry.fstype) {
            return false;
        }
        true
    }
}
