use mntfinder_mount::{MountFilter, MountTable};
use std::io::Write;

use crate::utils::format_options;

pub fn list_mount_points(
    table: &MountTable,
    filter: &MountFilter,
    json: bool,
    out: &mut impl Write,
) -> Result<bool, Box<dyn std::error::Error>> {
    let records = table
        .list_mount_points(filter)
        .map_err(|e| format!("Failed to list mount points: {}", e))?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &records)?;
        writeln!(out)?;
        return Ok(true);
    }

    if records.is_empty() {
        writeln!(out, "No mount points found")?;
        return Ok(true);
    }

    writeln!(
        out,
        "{:<24} {:<32} {:<12} {:<40} {:>4} {:>6}",
        "SOURCE", "TARGET", "FSTYPE", "OPTIONS", "FREQ", "PASSNO"
    )?;

    for record in &records {
        writeln!(
            out,
            "{:<24} {:<32} {:<12} {:<40} {:>4} {:>6}",
            record.source(),
            record.target().display(),
            record.fstype(),
            format_options(record.options(), 40),
            record.freq(),
            record.passno()
        )?;
    }

    Ok(true)
}
