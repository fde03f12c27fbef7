use mntfinder_mount::MountTable;
use std::io::Write;
use std::path::Path;

use crate::utils::print_record;

pub fn find_mount_point(
    table: &MountTable,
    target: &Path,
    json: bool,
    out: &mut impl Write,
) -> Result<bool, Box<dyn std::error::Error>> {
    let record = table
        .get_mount_point(target)
        .map_err(|e| format!("Failed to look up {}: {}", target.display(), e))?;

    let Some(record) = record else {
        tracing::info!("{:?} is not a mount point", target);
        if json {
            writeln!(out, "null")?;
        } else {
            writeln!(out, "Not a mount point: {}", target.display())?;
        }
        return Ok(false);
    };

    if json {
        serde_json::to_writer_pretty(&mut *out, &record)?;
        writeln!(out)?;
    } else {
        print_record(out, &record)?;
    }

    Ok(true)
}
