use crate::entry::MountEntry;
use crate::error::MountError;
use crate::probe::LivenessProbe;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{self, AtomicU8};

/// What is known about whether a record's mount is still active.
///
/// Variants are ordered so that the state only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Liveness {
    Unknown = 0,
    Alive = 1,
    Dead = 2,
}

impl Liveness {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Liveness::Unknown,
            1 => Liveness::Alive,
            _ => Liveness::Dead,
        }
    }
}

impl fmt::Display for Liveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Liveness::Unknown => write!(f, "unknown"),
            Liveness::Alive => write!(f, "alive"),
            Liveness::Dead => write!(f, "dead"),
        }
    }
}

/// One mount event observed in the mount table.
///
/// A record remembers when its mount has gone away: once [`is_alive`]
/// has reported `false`, the record stays dead even if an identical
/// filesystem is mounted at the same place later. A dead record compares
/// unequal to everything, itself included.
///
/// Records order by target path only. Because that is not a total order,
/// `<=` and `>=` always evaluate to `false`; use [`cmp_target`] to sort.
///
/// [`is_alive`]: MountRecord::is_alive
/// [`cmp_target`]: MountRecord::cmp_target
pub struct MountRecord {
    entry: MountEntry,
    liveness: AtomicU8,
    probe: Arc<dyn LivenessProbe>,
}

impl MountRecord {
    pub(crate) fn new(entry: MountEntry, probe: Arc<dyn LivenessProbe>) -> Self {
        Self {
            entry,
            liveness: AtomicU8::new(Liveness::Unknown as u8),
            probe,
        }
    }

    pub fn entry(&self) -> &MountEntry {
        &self.entry
    }

    pub fn source(&self) -> &str {
        &self.entry.source
    }

    pub fn target(&self) -> &Path {
        &self.entry.target
    }

    pub fn fstype(&self) -> &str {
        &self.entry.fstype
    }

    pub fn options(&self) -> &[String] {
        &self.entry.options
    }

    pub fn freq(&self) -> u64 {
        self.entry.freq
    }

    pub fn passno(&self) -> u64 {
        self.entry.passno
    }

    /// Last observed liveness, without probing.
    pub fn liveness(&self) -> Liveness {
        Liveness::from_u8(self.liveness.load(atomic::Ordering::Acquire))
    }

    /// Checks whether this mount is still active.
    ///
    /// Probes the system on every call until the mount is first seen gone;
    /// from then on returns `false` without probing. A probe that fails
    /// because the current mount table is malformed counts as "gone".
    pub fn is_alive(&self) -> Result<bool, MountError> {
        if self.liveness() == Liveness::Dead {
            return Ok(false);
        }

        let mounted = match self.probe.is_mounted(&self.entry) {
            Ok(mounted) => mounted,
            Err(e) if e.is_malformed() => {
                tracing::debug!("Liveness probe for {:?} failed: {}", self.target(), e);
                false
            }
            Err(e) => return Err(e),
        };

        let observed = if mounted { Liveness::Alive } else { Liveness::Dead };
        let previous = Liveness::from_u8(self.liveness.fetch_max(observed as u8, atomic::Ordering::AcqRel));
        let current = previous.max(observed);

        if current == Liveness::Dead && previous != Liveness::Dead {
            tracing::debug!("Mount of {} at {:?} is gone", self.source(), self.target());
        }

        Ok(current == Liveness::Alive)
    }

    /// Old name of [`is_alive`](MountRecord::is_alive).
    #[deprecated(note = "use `is_alive` instead")]
    pub fn is_mounted(&self) -> Result<bool, MountError> {
        tracing::warn!("MountRecord::is_mounted is deprecated, use MountRecord::is_alive");
        self.is_alive()
    }

    /// Total order by target path, for sorting.
    pub fn cmp_target(&self, other: &Self) -> Ordering {
        self.target().cmp(other.target())
    }
}

impl AsRef<Path> for MountRecord {
    fn as_ref(&self) -> &Path {
        self.target()
    }
}

impl Clone for MountRecord {
    fn clone(&self) -> Self {
        Self {
            entry: self.entry.clone(),
            liveness: AtomicU8::new(self.liveness.load(atomic::Ordering::Acquire)),
            probe: self.probe.clone(),
        }
    }
}

impl fmt::Debug for MountRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountRecord")
            .field("source", &self.entry.source)
            .field("target", &self.entry.target)
            .field("fstype", &self.entry.fstype)
            .field("options", &self.entry.options)
            .field("freq", &self.entry.freq)
            .field("passno", &self.entry.passno)
            .field("liveness", &self.liveness())
            .finish()
    }
}

impl PartialEq for MountRecord {
    fn eq(&self, other: &Self) -> bool {
        if self.liveness() == Liveness::Dead || other.liveness() == Liveness::Dead {
            return false;
        }
        self.entry == other.entry
    }
}

impl PartialOrd for MountRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.cmp_target(other) {
            Ordering::Equal => None,
            ordering => Some(ordering),
        }
    }

    fn le(&self, _other: &Self) -> bool {
        false
    }

    fn ge(&self, _other: &Self) -> bool {
        false
    }
}

#[derive(Serialize)]
struct RecordView<'a> {
    #[serde(flatten)]
    entry: &'a MountEntry,
    liveness: Liveness,
}

impl Serialize for MountRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RecordView {
            entry: &self.entry,
            liveness: self.liveness(),
        }
        .serialize(serializer)
    }
}
