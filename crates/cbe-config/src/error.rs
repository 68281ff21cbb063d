//! Error types for configuration loading.

use std::path::PathBuf;

use cbe_common::ParseError;
use thiserror::Error;

/// Result type alias for configuration entry points.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The configuration failed the non-zero rule.
///
/// Carries no field detail. Use [`crate::zero_fields`] to find out which
/// values were missing or zero.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid configuration")]
pub struct Invalid;

/// Errors from the document and file entry points.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration")]
    Invalid(#[from] Invalid),

    #[error("malformed configuration document: {0}")]
    Parse(#[from] ParseError),

    #[error("no configuration file found")]
    NotFound,

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Stable numeric code for error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ConfigError::Invalid(_) => 10,
            ConfigError::Parse(_) => 11,
            ConfigError::NotFound => 12,
            ConfigError::Io { .. } => 60,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, ConfigError::Invalid(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbe_common::ParseErrorKind;

    #[test]
    fn codes_are_distinct() {
        let errors = [
            ConfigError::Invalid(Invalid),
            ConfigError::Parse(ParseError::new(0, ParseErrorKind::NoRootElement)),
            ConfigError::NotFound,
            ConfigError::Io {
                path: PathBuf::from("/nonexistent"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            },
        ];
        let mut codes: Vec<u32> = errors.iter().map(ConfigError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn io_error_names_the_path() {
        let err = ConfigError::Io {
            path: PathBuf::from("/etc/cbe-init/config.xml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/cbe-init/config.xml"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn invalid_converts() {
        let err: ConfigError = Invalid.into();
        assert!(err.is_invalid());
        assert_eq!(err.to_string(), "invalid configuration");
    }
}
