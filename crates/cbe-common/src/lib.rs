//! CBE init shared input model.
//!
//! This crate provides:
//! - The [`ConfigNode`] lookup trait consumed by the configuration loader
//! - An owned element tree ([`XmlNode`]) with builder helpers
//! - A parser for the simplified XML fragment used by init configurations

pub mod error;
pub mod node;
pub mod parse;

pub use error::{ParseError, ParseErrorKind, Result};
pub use node::{ConfigNode, XmlNode};
pub use parse::MAX_DEPTH;
