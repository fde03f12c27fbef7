use crate::entry::MountEntry;
use crate::error::MountError;
use crate::source::TableSource;
use crate::table::parse_table;

/// Answers whether a previously parsed mount is currently mounted.
pub trait LivenessProbe: Send + Sync {
    fn is_mounted(&self, entry: &MountEntry) -> Result<bool, MountError>;
}

impl<F> LivenessProbe for F
where
    F: Fn(&MountEntry) -> Result<bool, MountError> + Send + Sync,
{
    fn is_mounted(&self, entry: &MountEntry) -> Result<bool, MountError> {
        self(entry)
    }
}

/// Re-reads the mount table and looks for an entry identical to the one
/// being checked: same target, source, fstype, options, freq and passno.
#[derive(Debug, Clone)]
pub struct TableProbe {
    source: TableSource,
}

impl TableProbe {
    pub fn new(source: TableSource) -> Self {
        Self { source }
    }
}

impl LivenessProbe for TableProbe {
    fn is_mounted(&self, entry: &MountEntry) -> Result<bool, MountError> {
        let content = self.source.read()?;
        let current = parse_table(&content)?;
        Ok(current.iter().any(|e| e == entry))
    }
}
