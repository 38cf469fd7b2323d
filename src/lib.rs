//! # deploy-addresses - consolidate deployment address files into JSON
//!
//! Deployment scripts typically drop one small text file per contract into a
//! directory. This crate collects those files into a single JSON summary that
//! front-ends and test harnesses can load.
//!
//! ## Modes
//!
//! - **compile**: look up `<name>.txt` for a fixed list of logical contract
//!   names and take the first `0x` + 40 hex address in each file.
//! - **consolidate**: read every `*.txt` file in the directory as a single
//!   `KEY=VALUE` line and key the entry by file stem.
//!
//! Files that are missing or hold no usable address are skipped. Only a
//! directory that cannot be listed (consolidate mode) or an output that cannot
//! be written aborts the run.
//!
//! ## Architecture
//!
//! - `address`: address parsing and extraction
//! - `config`: run settings, mode defaults and validation
//! - `config_loader`: YAML settings file and CLI override resolution
//! - `consolidator`: the single pass over the address files
//! - `report`: JSON document layouts and output writing
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use deploy_addresses::{config::{Config, Mode}, consolidator, report};
//!
//! let config = Config::for_mode(Mode::Consolidate);
//! let result = consolidator::consolidate(&config)?;
//! report::write_report(&result, &config.output)?;
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Typed errors (`AddressError`, `ValidationError`) use `thiserror`; the
//! orchestration functions return `color_eyre::Result` with context attached.

pub mod address;
pub mod config;
pub mod config_loader;
pub mod consolidator;
pub mod report;

pub use address::{extract_address, parse_key_value, Address, AddressError, AddressRecord};
pub use consolidator::{consolidate, consolidate_at, ConsolidationResult};
