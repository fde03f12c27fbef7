mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{check_mount_point, find_mount_point, list_mount_points};
use mntfinder_mount::{MountError, MountFilter, MountTable, TableSource};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mntfinder")]
#[command(about = "Inspect the mount table and check whether paths are mount points")]
struct Cli {
    /// Read the mount table of this process instead of the current one
    #[arg(long, global = true, conflicts_with = "mounts_file")]
    pid: Option<i32>,

    /// Read mount entries from this file instead of /proc/mounts
    #[arg(long, global = true)]
    mounts_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List mount points
    #[command(visible_alias = "ls")]
    List {
        /// Only entries with this source
        #[arg(long)]
        source: Option<String>,

        /// Only entries mounted at this path
        #[arg(long)]
        target: Option<PathBuf>,

        /// Only entries with this filesystem type
        #[arg(long, short = 't')]
        fstype: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the mount entry for a path
    Find {
        /// Mount point to look up
        target: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Exit successfully if a path is a live mount point
    Check {
        /// Path to check
        target: PathBuf,

        /// Require this source
        #[arg(long)]
        source: Option<String>,

        /// Require this filesystem type
        #[arg(long, short = 't')]
        fstype: Option<String>,
    },
}

impl Cli {
    fn table_source(&self) -> Result<TableSource, MountError> {
        match (self.pid, &self.mounts_file) {
            (Some(pid), _) => TableSource::process(pid),
            (None, Some(path)) => Ok(TableSource::File(path.clone())),
            (None, None) => Ok(TableSource::Current),
        }
    }
}

fn build_filter(source: Option<String>, target: Option<PathBuf>, fstype: Option<String>) -> MountFilter {
    let mut filter = MountFilter::new();
    if let Some(source) = source {
        filter = filter.source(source);
    }
    if let Some(target) = target {
        filter = filter.target(target);
    }
    if let Some(fstype) = fstype {
        filter = filter.fstype(fstype);
    }
    filter
}

fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let source = cli.table_source()?;
    tracing::debug!("Using mount table {:?}", source.path());
    let table = MountTable::with_source(source);
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::List {
            source,
            target,
            fstype,
            json,
        } => list_mount_points(&table, &build_filter(source, target, fstype), json, &mut out),
        Commands::Find { target, json } => find_mount_point(&table, &target, json, &mut out),
        Commands::Check {
            target,
            source,
            fstype,
        } => check_mount_point(&table, &target, &build_filter(source, None, fstype), &mut out),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("mntfinder: {}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from(["mntfinder", "list", "--source", "/dev/sda1", "-t", "ext4", "--json"]).unwrap();
        match cli.command {
            Commands::List {
                source,
                target,
                fstype,
                json,
            } => {
                assert_eq!(source.as_deref(), Some("/dev/sda1"));
                assert_eq!(target, None);
                assert_eq!(fstype.as_deref(), Some("ext4"));
                assert!(json);
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_default_source_is_current_process() {
        let cli = Cli::try_parse_from(["mntfinder", "find", "/home"]).unwrap();
        assert_eq!(cli.table_source().unwrap(), TableSource::Current);
    }

    #[test]
    fn test_pid_source() {
        let cli = Cli::try_parse_from(["mntfinder", "check", "/home", "--pid", "1"]).unwrap();
        assert_eq!(cli.table_source().unwrap(), TableSource::process(1).unwrap());

        let cli = Cli::try_parse_from(["mntfinder", "check", "/home", "--pid", "0"]).unwrap();
        assert!(matches!(cli.table_source(), Err(MountError::InvalidPid(_))));

        assert!(Cli::try_parse_from(["mntfinder", "check", "/home", "--pid", "abc"]).is_err());
    }

    #[test]
    fn test_pid_conflicts_with_mounts_file() {
        let result = Cli::try_parse_from(["mntfinder", "--pid", "1", "--mounts-file", "/tmp/m", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_against_mounts_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "/dev/sda2 /nonexistent-mntfinder/home ext4 rw 0 2\n").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["mntfinder", "--mounts-file", path, "check", "/nonexistent-mntfinder/home"]).unwrap();
        assert!(run(cli).unwrap());

        let cli = Cli::try_parse_from(["mntfinder", "--mounts-file", path, "check", "/nonexistent-mntfinder/var"]).unwrap();
        assert!(!run(cli).unwrap());
    }

    #[test]
    fn test_filter_builder() {
        let filter = build_filter(Some("tmpfs".to_string()), None, Some("tmpfs".to_string()));
        assert_eq!(filter.source.as_deref(), Some("tmpfs"));
        assert_eq!(filter.target, None);
        assert_eq!(filter.fstype.as_deref(), Some("tmpfs"));
    }
}
