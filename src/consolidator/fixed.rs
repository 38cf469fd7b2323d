//! Fixed-name lookup: each logical name maps to `<dir>/<name>.<ext>`.

use super::AddressMap;
use crate::address::{extract_address, Address, AddressRecord};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Read `path` and return the first address in it.
///
/// A missing or unreadable file is treated the same as one with no address.
pub fn extract_address_from_file(path: &Path) -> Option<Address> {
    match fs::read_to_string(path) {
        Ok(content) => extract_address(&content),
        Err(e) => {
            debug!("Could not read {}: {}", path.display(), e);
            None
        }
    }
}

/// Look up every name in `names` and collect the ones that resolve.
pub fn compile_fixed(dir: &Path, names: &[String], extension: &str) -> AddressMap {
    let mut entries = AddressMap::new();

    for name in names {
        let path = dir.join(format!("{}.{}", name, extension));
        match extract_address_from_file(&path) {
            Some(address) => {
                info!("✓ {}: {}", name, address);
                entries.insert(name.clone(), AddressRecord::new(name.clone(), address));
            }
            None => info!("✗ {}: not found or invalid", name),
        }
    }

    entries
}
