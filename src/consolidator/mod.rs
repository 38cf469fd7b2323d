//! Address consolidation.
//!
//! A run makes one linear pass over the candidate files, skipping any file
//! that is missing or has no usable address, and collects the survivors into
//! a [`ConsolidationResult`].
//!
//! - `fixed`: look up a known list of logical names (`compile` mode)
//! - `scan`: read every matching file in the directory (`consolidate` mode)

pub mod fixed;
pub mod scan;

pub use fixed::compile_fixed;
pub use scan::scan_directory;

use crate::address::AddressRecord;
use crate::config::{Config, Mode};
use chrono::{DateTime, Utc};
use color_eyre::Result;
use log::info;
use std::collections::BTreeMap;

/// Entries keyed by logical contract name
pub type AddressMap = BTreeMap<String, AddressRecord>;

/// Outcome of a single consolidation run
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidationResult {
    pub mode: Mode,
    pub entries: AddressMap,
    pub network: String,
    pub generated_at: DateTime<Utc>,
    pub chain_id: Option<u64>,
}

impl ConsolidationResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Run the pass described by `config`, stamped with the current time.
pub fn consolidate(config: &Config) -> Result<ConsolidationResult> {
    consolidate_at(config, Utc::now())
}

/// Run the pass described by `config` with an explicit timestamp.
pub fn consolidate_at(config: &Config, generated_at: DateTime<Utc>) -> Result<ConsolidationResult> {
    info!(
        "Reading address files from {:?} ({:?} mode)",
        config.addresses_dir, config.mode
    );

    let entries = match config.mode {
        Mode::Compile => compile_fixed(&config.addresses_dir, &config.names, &config.extension),
        Mode::Consolidate => scan_directory(&config.addresses_dir, &config.extension)?,
    };

    Ok(ConsolidationResult {
        mode: config.mode,
        entries,
        network: config.network.clone(),
        generated_at,
        chain_id: config.chain_id,
    })
}
