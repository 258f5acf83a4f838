//! SWORD module `.conf` descriptor files
//!
//! A conf file is line-oriented INI text:
//!
//! ```text
//! [KJV]
//! DataPath=./modules/texts/ztext/kjv/
//! ModDrv=zText
//! About=The King James Version \
//!     of 1769
//! # comment
//! ```
//!
//! The first `[Section]` names the module. `Key=Value` lines fill both the
//! typed fields of [`ConfRecord`] and its raw property map. A trailing
//! backslash continues a value onto the following lines.

mod error;
mod kind;
mod record;

pub use error::{ConfError, ConfResult};
pub use kind::{ModuleKind, TextEncoding};
pub use record::ConfRecord;

use std::path::Path;

/// Parse a conf file from disk
pub fn parse_conf(path: impl AsRef<Path>) -> ConfResult<ConfRecord> {
    ConfRecord::from_path(path)
}

/// Split a `Key=Value` line
///
/// Only the first `=` separates; values may contain further `=` signs.
pub(crate) fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || !is_valid_key(key) {
        return None;
    }
    Some((key, value.trim()))
}

/// Conf keys are plain identifiers, sometimes with a locale suffix (`About_de`)
pub(crate) fn is_valid_key(key: &str) -> bool {
    key.chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("ModDrv=zText"), Some(("ModDrv", "zText")));
        assert_eq!(parse_line("  Lang = en "), Some(("Lang", "en")));
        assert_eq!(parse_line("About=a=b"), Some(("About", "a=b")));
        assert_eq!(parse_line("no separator"), None);
        assert_eq!(parse_line("=value"), None);
        assert_eq!(parse_line("bad key=value"), None);
    }
}
