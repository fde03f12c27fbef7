use mntfinder_mount::{MountFilter, MountTable};
use std::io::Write;
use std::path::Path;

pub fn check_mount_point(
    table: &MountTable,
    target: &Path,
    filter: &MountFilter,
    out: &mut impl Write,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mounted = table
        .is_a_mount_point_matching(target, filter)
        .map_err(|e| format!("Failed to check {}: {}", target.display(), e))?;

    writeln!(out, "{}", if mounted { "yes" } else { "no" })?;
    Ok(mounted)
}
