//! Directory scan: every `*.<ext>` file holds one `KEY=VALUE` line.

use super::AddressMap;
use crate::address::{parse_key_value, AddressRecord};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// List files in `dir` with the given extension, sorted by file name.
///
/// Failing to read the directory itself is an error; entries that cannot be
/// inspected are skipped.
pub fn list_address_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let listing = fs::read_dir(dir)
        .wrap_err_with(|| format!("Failed to read addresses directory '{}'", dir.display()))?;

    let mut files: Vec<PathBuf> = listing
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some(extension))
        .collect();
    files.sort();

    Ok(files)
}

/// Read every address file in `dir`, keyed by file stem.
pub fn scan_directory(dir: &Path, extension: &str) -> Result<AddressMap> {
    let mut entries = AddressMap::new();

    for path in list_address_files(dir, extension)? {
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            warn!("Skipping {}: file name is not valid UTF-8", path.display());
            continue;
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        match parse_key_value(&content) {
            Some((key, address)) => {
                info!("  {}: {} ({})", name, address, key);
                entries.insert(
                    name.to_string(),
                    AddressRecord::with_key(name, address, key),
                );
            }
            None => warn!("Skipping {}: expected KEY=<address>", path.display()),
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_reads_key_value_files() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("pool.txt"),
            "POOL_ADDR=0x1111111111111111111111111111111111111111\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("finder.txt"),
            "FINDER=0x2222222222222222222222222222222222222222",
        )
        .unwrap();

        let entries = scan_directory(dir.path(), "txt").unwrap();
        assert_eq!(entries.len(), 2);

        let pool = &entries["pool"];
        assert_eq!(pool.address.to_string(), "0x1111111111111111111111111111111111111111");
        assert_eq!(pool.source_key.as_deref(), Some("POOL_ADDR"));
        assert_eq!(entries["finder"].source_key.as_deref(), Some("FINDER"));
    }

    #[test]
    fn test_scan_skips_malformed_and_other_extensions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("empty.txt"), "").unwrap();
        fs::write(dir.path().join("nokey.txt"), "=0x1111111111111111111111111111111111111111").unwrap();
        fs::write(dir.path().join("bare.txt"), "0x1111111111111111111111111111111111111111").unwrap();
        fs::write(dir.path().join("junk.txt"), "POOL=pending").unwrap();
        fs::write(
            dir.path().join("notes.md"),
            "POOL=0x1111111111111111111111111111111111111111",
        )
        .unwrap();
        fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let entries = scan_directory(dir.path(), "txt").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, 0x3d, 0xc3, 0x28]).unwrap();
        fs::write(
            dir.path().join("pool.txt"),
            "POOL_ADDR=0x1111111111111111111111111111111111111111",
        )
        .unwrap();

        let entries = scan_directory(dir.path(), "txt").unwrap();
        let keys: Vec<_> = entries.keys().cloned().collect();
        assert_eq!(keys, vec!["pool".to_string()]);
    }

    #[test]
    fn test_listing_is_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["c.txt", "a.txt", "b.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let files = list_address_files(dir.path(), "txt").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = scan_directory(&dir.path().join("missing"), "txt").unwrap_err();
        assert!(err.to_string().contains("Failed to read addresses directory"));
    }
}
