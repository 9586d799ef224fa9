//! Version directory-name primitives
//!
//! Export versions live on disk as zero-padded decimal directory names
//! (`0001`, `0002`, ...). Parsing is deliberately numeric rather than
//! lexicographic so unpadded or non-contiguous names can never roll a
//! version counter backwards.

/// Width of a zero-padded version directory name
pub const VERSION_PAD: usize = 4;

/// Format a version number as a directory name (`3` -> `"0003"`)
pub fn version_dir_name(version: u32) -> String {
    format!("{:0width$}", version, width = VERSION_PAD)
}

/// Parse a directory name as a version number, if it is purely decimal.
///
/// Accepts any padding (`"3"`, `"0003"`, `"00003"` all parse to 3);
/// rejects empty names and anything with a non-digit character.
pub fn parse_version_dir(name: &str) -> Option<u32> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

/// Extract the numeric suffix from a file name of the form
/// `<prefix><N><suffix>` (e.g. run logs named `fur_export_7.log`).
pub fn parse_numbered_name(name: &str, prefix: &str, suffix: &str) -> Option<u32> {
    let middle = name.strip_prefix(prefix)?.strip_suffix(suffix)?;
    parse_version_dir(middle)
}
