//! JSON summary generation.
//!
//! Two document layouts are produced, one per mode:
//!
//! ```json
//! { "deployedAddresses": { "finder": "0x..." }, "network": "anvil-fork",
//!   "timestamp": "2024-01-01T00:00:00.000Z", "compiledAt": 1704067200 }
//! ```
//!
//! ```json
//! { "network": "testnet", "chainId": null, "deployedAt": "2024-01-01T00:00:00.000Z",
//!   "contracts": { "pool": { "address": "0x...", "key": "POOL_ADDR" } } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::SecondsFormat;
use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use crate::address::Address;
use crate::config::Mode;
use crate::consolidator::ConsolidationResult;

/// Shape of the written document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Flat name to address map with `timestamp` and `compiledAt`
    Compiled,
    /// Name to `{address, key}` map with `deployedAt` and `chainId`
    Manifest,
}

impl From<Mode> for Layout {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Compile => Layout::Compiled,
            Mode::Consolidate => Layout::Manifest,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompiledReport<'a> {
    deployed_addresses: BTreeMap<&'a str, &'a Address>,
    network: &'a str,
    timestamp: String,
    compiled_at: i64,
}

#[derive(Debug, Serialize)]
struct ContractEntry<'a> {
    address: &'a Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ManifestReport<'a> {
    network: &'a str,
    chain_id: Option<u64>,
    deployed_at: String,
    contracts: BTreeMap<&'a str, ContractEntry<'a>>,
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`
fn iso_timestamp(result: &ConsolidationResult) -> String {
    result.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build the JSON document for `result` in the given layout.
pub fn render(result: &ConsolidationResult, layout: Layout) -> Result<serde_json::Value> {
    let value = match layout {
        Layout::Compiled => serde_json::to_value(CompiledReport {
            deployed_addresses: result
                .entries
                .iter()
                .map(|(name, record)| (name.as_str(), &record.address))
                .collect(),
            network: &result.network,
            timestamp: iso_timestamp(result),
            compiled_at: result.generated_at.timestamp(),
        }),
        Layout::Manifest => serde_json::to_value(ManifestReport {
            network: &result.network,
            chain_id: result.chain_id,
            deployed_at: iso_timestamp(result),
            contracts: result
                .entries
                .iter()
                .map(|(name, record)| {
                    (
                        name.as_str(),
                        ContractEntry {
                            address: &record.address,
                            key: record.source_key.as_deref(),
                        },
                    )
                })
                .collect(),
        }),
    };

    value.context("Failed to serialize address summary")
}

/// Write the JSON document to `output_path`, creating parent directories.
///
/// The layout follows the mode the result was produced in.
pub fn write_report(result: &ConsolidationResult, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&render(result, Layout::from(result.mode))?)
        .context("Failed to serialize address summary")?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory '{}'", parent.display())
            })?;
        }
    }

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write address summary to {}", output_path.display()))?;

    log::info!(
        "Wrote {} addresses to {}",
        result.len(),
        output_path.display()
    );
    Ok(())
}
