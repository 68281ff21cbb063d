//! CBE init configuration loading and validation.
//!
//! This crate provides:
//! - The immutable [`Configuration`] value consumed by the volume initializer
//! - The all-or-nothing loader over any [`ConfigNode`] tree
//! - Per-field diagnostics for rejected input
//! - Document and file entry points with config path resolution
//! - JSON snapshots of a loaded configuration

pub mod configuration;
pub mod error;
pub mod field;
pub mod resolve;
pub mod snapshot;

pub use cbe_common::{ConfigNode, ParseError, XmlNode};
pub use configuration::{load, zero_fields, Configuration};
pub use error::{ConfigError, Invalid, Result};
pub use field::ConfigField;
pub use resolve::{resolve_config_path, ConfigPaths, ConfigSearch, ConfigSource};
pub use snapshot::ConfigSnapshot;

/// Schema version for configuration snapshots.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
