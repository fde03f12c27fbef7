use crate::entry::MountEntry;
use crate::error::MountError;
use crate::path::resolve_path;
use crate::probe::{LivenessProbe, TableProbe};
use crate::query::{MountFilter, MountTarget};
use crate::record::MountRecord;
use crate::source::TableSource;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Parses the full text of a mount table, one entry per non-empty line.
///
/// Entries keep file order. The first malformed line fails the whole parse.
pub fn parse_table(content: &[u8]) -> Result<Vec<MountEntry>, MountError> {
    let mut entries = Vec::new();

    for (index, line) in content.split(|&b| b == b'\n').enumerate() {
        if line.is_empty() {
            continue;
        }
        let entry = MountEntry::parse_line(line)
            .inspect_err(|e| tracing::debug!("Malformed mount table line {}: {}", index + 1, e))?;
        entries.push(entry);
    }

    Ok(entries)
}

/// Reader over a mount table.
///
/// Every query reads and parses the table afresh; nothing is cached between
/// calls.
#[derive(Clone)]
pub struct MountTable {
    source: TableSource,
    probe: Arc<dyn LivenessProbe>,
}

impl MountTable {
    /// Reader for the current process's mount table.
    pub fn new() -> Self {
        Self::with_source(TableSource::default())
    }

    /// Reader for `source`. Liveness checks re-read the same source.
    pub fn with_source(source: TableSource) -> Self {
        let probe = Arc::new(TableProbe::new(source.clone()));
        Self { source, probe }
    }

    /// Replaces the probe handed to every record this reader produces.
    pub fn with_probe(mut self, probe: Arc<dyn LivenessProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn source(&self) -> &TableSource {
        &self.source
    }

    pub fn parse_all(&self) -> Result<Vec<MountRecord>, MountError> {
        let content = self.source.read()?;
        let entries = parse_table(&content)?;
        tracing::debug!("Parsed {} mount entries from {:?}", entries.len(), self.source.path());

        Ok(entries
            .into_iter()
            .map(|entry| MountRecord::new(entry, self.probe.clone()))
            .collect())
    }

    pub fn get_all_mount_points(&self) -> Result<Vec<MountRecord>, MountError> {
        self.parse_all()
    }

    pub fn list_mount_points(&self, filter: &MountFilter) -> Result<Vec<MountRecord>, MountError> {
        Ok(self
            .parse_all()?
            .into_iter()
            .filter(|record| filter.matches(record.entry()))
            .collect())
    }

    /// First record mounted exactly at `target`, after resolving it.
    pub fn get_mount_point(&self, target: impl AsRef<Path>) -> Result<Option<MountRecord>, MountError> {
        let target = resolve_path(target);
        Ok(self.parse_all()?.into_iter().find(|record| record.target() == target))
    }

    pub fn is_a_mount_point<'a>(&self, target: impl Into<MountTarget<'a>>) -> Result<bool, MountError> {
        self.is_a_mount_point_matching(target, &MountFilter::default())
    }

    /// Whether `target` is a live mount point matching `filter`.
    ///
    /// A record is checked with [`MountRecord::is_alive`] directly. A path is
    /// looked up first and the record found is then confirmed alive, so a
    /// mount that disappears between the two steps reports `false`. The
    /// filter only applies once liveness is confirmed.
    pub fn is_a_mount_point_matching<'a>(
        &self,
        target: impl Into<MountTarget<'a>>,
        filter: &MountFilter,
    ) -> Result<bool, MountError> {
        match target.into() {
            MountTarget::Record(record) => Ok(record.is_alive()? && filter.matches(record.entry())),
            MountTarget::Path(path) => match self.get_mount_point(&path)? {
                Some(record) => Ok(record.is_alive()? && filter.matches(record.entry())),
                None => Ok(false),
            },
        }
    }
}

impl Default for MountTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MountTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountTable")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
