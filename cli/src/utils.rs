use mntfinder_mount::MountRecord;

pub fn format_options(options: &[String], width: usize) -> String {
    let joined = options.join(",");
    if joined.chars().count() > width && width > 3 {
        let truncated: String = joined.chars().take(width - 3).collect();
        format!("{}...", truncated)
    } else {
        joined
    }
}

pub fn print_record(out: &mut impl std::io::Write, record: &MountRecord) -> std::io::Result<()> {
    writeln!(out, "Mount Point: {}", record.target().display())?;
    writeln!(out, "  Source:  {}", record.source())?;
    writeln!(out, "  Type:    {}", record.fstype())?;
    writeln!(out, "  Options: {}", record.options().join(","))?;
    writeln!(out, "  Freq:    {}", record.freq())?;
    writeln!(out, "  Passno:  {}", record.passno())?;
    Ok(())
}
