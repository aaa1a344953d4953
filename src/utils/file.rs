//! File reading utilities

use crate::error::{EzfetchError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read first line of a file, trimmed
/// Suited to single-line files like /proc/sys/kernel/hostname
pub fn read_first_line<P: AsRef<Path>>(path: P) -> Result<String> {
    let file = File::open(path)?;
    let mut line = String::with_capacity(128);
    BufReader::new(file).read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Look up `KEY=value` in an os-release style document, stripping quotes
pub fn read_key_value(content: &str, key: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let (k, v) = line.split_once('=')?;
        (k.trim() == key).then(|| v.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
    })
}

/// Count subdirectories of `path`
pub fn count_dirs<P: AsRef<Path>>(path: P) -> Result<usize> {
    let path = path.as_ref();
    let count = std::fs::read_dir(path)
        .map_err(|e| EzfetchError::detection(format!("{}: {}", path.display(), e)))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map_or(false, |ft| ft.is_dir()))
        .count();
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OS_RELEASE: &str = "NAME=\"Arch Linux\"\nPRETTY_NAME=\"Arch Linux\"\nID=arch\nBUILD_ID=rolling\n";

    #[test]
    fn key_value_strips_quotes() {
        assert_eq!(read_key_value(OS_RELEASE, "PRETTY_NAME").as_deref(), Some("Arch Linux"));
        assert_eq!(read_key_value(OS_RELEASE, "ID").as_deref(), Some("arch"));
        assert_eq!(read_key_value(OS_RELEASE, "VERSION_ID"), None);
    }

    #[test]
    fn key_value_does_not_match_prefixes() {
        assert_eq!(read_key_value("ID_LIKE=debian\nID=ubuntu\n", "ID").as_deref(), Some("ubuntu"));
    }

    #[test]
    fn first_line_and_dir_count() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hostname"), "box\nsecond\n").unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();
        std::fs::create_dir(dir.path().join("b")).unwrap();

        assert_eq!(read_first_line(dir.path().join("hostname")).unwrap(), "box");
        assert_eq!(count_dirs(dir.path()).unwrap(), 2);
        assert!(read_first_line(dir.path().join("missing")).is_err());
    }
}
