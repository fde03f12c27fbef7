use crate::error::MountError;
use crate::path::resolve_path;
use serde::Serialize;
use std::ffi::OsStr;
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

const FIELD_COUNT: usize = 6;

/// The six fields of one mount table line.
///
/// Equality is purely structural. See [`crate::MountRecord`] for the
/// identity-aware view that also tracks whether the mount is still active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountEntry {
    pub source: String,
    pub target: PathBuf,
    pub fstype: String,
    pub options: Vec<String>,
    pub freq: u64,
    pub passno: u64,
}

impl MountEntry {
    /// Parses a single line in `/proc/mounts` syntax:
    /// `source target fstype options freq passno`.
    ///
    /// The target is resolved to its canonical absolute form.
    pub fn parse_line(line: impl AsRef<[u8]>) -> Result<Self, MountError> {
        let line = line.as_ref().trim_ascii();
        let fields: Vec<Vec<u8>> = line.split(|&b| b == b' ').map(unescape_field).collect();

        if fields.len() != FIELD_COUNT {
            return Err(MountError::FieldCount {
                line: String::from_utf8_lossy(line).into_owned(),
                fields: fields.len(),
            });
        }

        let source = String::from_utf8_lossy(&fields[0]).into_owned();
        let raw_target = decode_escapes(&fields[1]);
        let fstype = String::from_utf8_lossy(&fields[2]).into_owned();
        let options = String::from_utf8_lossy(&fields[3])
            .split(',')
            .map(String::from)
            .collect();

        let raw_freq = String::from_utf8_lossy(&fields[4]);
        let freq = parse_count(&raw_freq).ok_or_else(|| MountError::InvalidFreq(raw_freq.to_string()))?;
        let raw_passno = String::from_utf8_lossy(&fields[5]);
        let passno =
            parse_count(&raw_passno).ok_or_else(|| MountError::InvalidPassno(raw_passno.to_string()))?;

        let target = resolve_path(Path::new(OsStr::from_bytes(&raw_target)));

        Ok(Self {
            source,
            target,
            fstype,
            options,
            freq,
            passno,
        })
    }
}

/// Renders the entry back into mount table syntax.
impl fmt::Display for MountEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            escape_field(&self.source),
            escape_target(&self.target),
            escape_field(&self.fstype),
            escape_field(&self.options.join(",")),
            self.freq,
            self.passno
        )
    }
}

/// Undoes the `\040` (space) and `\012` (newline) escapes the kernel applies
/// to every field.
fn unescape_field(field: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(field.len());
    let mut rest = field;
    loop {
        rest = match rest {
            [b'\\', b'0', b'4', b'0', tail @ ..] => {
                out.push(b' ');
                tail
            }
            [b'\\', b'0', b'1', b'2', tail @ ..] => {
                out.push(b'\n');
                tail
            }
            [b, tail @ ..] => {
                out.push(*b);
                tail
            }
            [] => break,
        };
    }
    out
}

/// Decodes the remaining backslash escapes of a target path into raw bytes:
/// octal triplets (`\011`, `\134`, bytes of non-UTF-8 names) and `\\`.
/// Anything else is kept verbatim.
fn decode_escapes(field: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(field.len());
    let mut rest = field;
    loop {
        rest = match rest {
            [b'\\', b'\\', tail @ ..] => {
                out.push(b'\\');
                tail
            }
            [b'\\', a @ b'0'..=b'3', b @ b'0'..=b'7', c @ b'0'..=b'7', tail @ ..] => {
                out.push(((a - b'0') << 6) | ((b - b'0') << 3) | (c - b'0'));
                tail
            }
            [b, tail @ ..] => {
                out.push(*b);
                tail
            }
            [] => break,
        };
    }
    out
}

fn parse_count(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn escape_field(value: &str) -> String {
    value.replace(' ', "\\040").replace('\n', "\\012")
}

fn escape_target(target: &Path) -> String {
    let mut out = String::new();
    for chunk in target.as_os_str().as_bytes().utf8_chunks() {
        for c in chunk.valid().chars() {
            match c {
                ' ' => out.push_str("\\040"),
                '\t' => out.push_str("\\011"),
                '\n' => out.push_str("\\012"),
                '\\' => out.push_str("\\134"),
                c => out.push(c),
            }
        }
        for b in chunk.invalid() {
            out.push_str(&format!("\\{:03o}", b));
        }
    }
    out
}
