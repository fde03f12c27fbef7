//! Reading the mount table and tracking whether observed mounts are still active.

mod entry;
mod error;
mod path;
mod probe;
mod query;
mod record;
mod source;
mod table;

pub use entry::MountEntry;
pub use error::MountError;
pub use path::resolve_path;
pub use probe::{LivenessProbe, TableProbe};
pub use query::{MountFilter, MountTarget};
pub use record::{Liveness, MountRecord};
pub use source::TableSource;
pub use table::{MountTable, parse_table};

use std::path::Path;

/// Looks up `target` in the current process's mount table.
pub fn get_mount_point(target: impl AsRef<Path>) -> Result<Option<MountRecord>, MountError> {
    MountTable::new().get_mount_point(target)
}

/// All entries of the current process's mount table, in file order.
pub fn get_all_mount_points() -> Result<Vec<MountRecord>, MountError> {
    MountTable::new().get_all_mount_points()
}

/// Whether `target` is currently a mount point of the current process.
pub fn is_a_mount_point<'a>(target: impl Into<MountTarget<'a>>) -> Result<bool, MountError> {
    MountTable::new().is_a_mount_point(target)
}
