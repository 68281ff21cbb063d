//! The validated init configuration and its loader.
//!
//! A configuration document names the key and the shape of two trees:
//!
//! ```text
//! <config>
//!   <key id="5"/>
//!   <virtual-block-device nr_of_levels="3" nr_of_children="4" nr_of_leafs="64"/>
//!   <free-tree nr_of_levels="2" nr_of_children="4" nr_of_leafs="16"/>
//! </config>
//! ```
//!
//! Every value is required and must be non-zero. A missing element, a
//! missing attribute, an attribute that does not parse, and an explicit `0`
//! all count as zero, and any zero rejects the whole document.

use std::path::Path;

use cbe_common::{ConfigNode, XmlNode};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ConfigError, Invalid, Result};
use crate::field::{
    ConfigField, CHILDREN_ATTRIBUTE, FREE_TREE_ELEMENT, KEY_ELEMENT, KEY_ID_ATTRIBUTE,
    LEAFS_ATTRIBUTE, LEVELS_ATTRIBUTE, VBD_ELEMENT,
};
use crate::resolve::resolve_config_path;

/// Validated sizing parameters for a new CBE volume.
///
/// Every field is strictly positive. Values only come out of
/// [`Configuration::load`] and its wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Configuration {
    key_id: u32,
    vbd_levels: u64,
    vbd_children_per_node: u64,
    vbd_leaves: u64,
    ft_levels: u64,
    ft_children_per_node: u64,
    ft_leaves: u64,
}

/// Values as read from the tree, before the non-zero check.
#[derive(Debug, Clone, Copy)]
struct Extracted {
    key_id: u32,
    vbd: [u64; 3],
    ft: [u64; 3],
}

impl Extracted {
    fn from_node<N: ConfigNode>(root: &N) -> Self {
        let key_id = root
            .sub_node(KEY_ELEMENT)
            .and_then(|key| key.attribute_u32(KEY_ID_ATTRIBUTE))
            .unwrap_or(0);

        Self {
            key_id,
            vbd: tree_shape(root.sub_node(VBD_ELEMENT)),
            ft: tree_shape(root.sub_node(FREE_TREE_ELEMENT)),
        }
    }

    fn value(&self, field: ConfigField) -> u64 {
        match field {
            ConfigField::KeyId => u64::from(self.key_id),
            ConfigField::VbdLevels => self.vbd[0],
            ConfigField::VbdChildren => self.vbd[1],
            ConfigField::VbdLeaves => self.vbd[2],
            ConfigField::FtLevels => self.ft[0],
            ConfigField::FtChildren => self.ft[1],
            ConfigField::FtLeaves => self.ft[2],
        }
    }

    fn zero_fields(&self) -> Vec<ConfigField> {
        ConfigField::ALL
            .into_iter()
            .filter(|&field| self.value(field) == 0)
            .collect()
    }
}

/// Levels, children, and leaves of one tree element; 0 where absent.
fn tree_shape<N: ConfigNode>(node: Option<&N>) -> [u64; 3] {
    let read = |attribute: &str| {
        node.and_then(|n| n.attribute_u64(attribute))
            .unwrap_or(0)
    };
    [
        read(LEVELS_ATTRIBUTE),
        read(CHILDREN_ATTRIBUTE),
        read(LEAFS_ATTRIBUTE),
    ]
}

impl Configuration {
    /// Derive a configuration from the root element of a document.
    ///
    /// Fails with [`Invalid`] if any of the seven values is zero.
    pub fn load<N: ConfigNode>(root: &N) -> std::result::Result<Self, Invalid> {
        let extracted = Extracted::from_node(root);

        let zero = extracted.zero_fields();
        if !zero.is_empty() {
            let fields = zero
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            warn!(%fields, "rejecting init configuration: values missing or zero");
            return Err(Invalid);
        }

        let config = Self {
            key_id: extracted.key_id,
            vbd_levels: extracted.vbd[0],
            vbd_children_per_node: extracted.vbd[1],
            vbd_leaves: extracted.vbd[2],
            ft_levels: extracted.ft[0],
            ft_children_per_node: extracted.ft[1],
            ft_leaves: extracted.ft[2],
        };
        debug!(
            key_id = config.key_id,
            vbd_levels = config.vbd_levels,
            vbd_children = config.vbd_children_per_node,
            vbd_leaves = config.vbd_leaves,
            ft_levels = config.ft_levels,
            ft_children = config.ft_children_per_node,
            ft_leaves = config.ft_leaves,
            "loaded init configuration"
        );
        Ok(config)
    }

    /// Parse a document and load it.
    pub fn from_xml_str(text: &str) -> Result<Self> {
        let root = XmlNode::parse(text)?;
        Ok(Self::load(&root)?)
    }

    /// Read a document from disk and load it.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "read init configuration");
        Self::from_xml_str(&text)
    }

    /// Locate the configuration file (explicit path, `CBE_INIT_CONFIG`,
    /// user config dir, system path) and load it.
    pub fn load_resolved(explicit: Option<&Path>) -> Result<Self> {
        let found = resolve_config_path(explicit).ok_or(ConfigError::NotFound)?;
        Self::load_from_file(&found.path)
    }

    pub fn key_id(&self) -> u32 {
        self.key_id
    }

    pub fn vbd_levels(&self) -> u64 {
        self.vbd_levels
    }

    pub fn vbd_children_per_node(&self) -> u64 {
        self.vbd_children_per_node
    }

    pub fn vbd_leaves(&self) -> u64 {
        self.vbd_leaves
    }

    pub fn ft_levels(&self) -> u64 {
        self.ft_levels
    }

    pub fn ft_children_per_node(&self) -> u64 {
        self.ft_children_per_node
    }

    pub fn ft_leaves(&self) -> u64 {
        self.ft_leaves
    }
}

/// Free-function form of [`Configuration::load`].
pub fn load<N: ConfigNode>(root: &N) -> std::result::Result<Configuration, Invalid> {
    Configuration::load(root)
}

/// Fields whose value would be zero when loading `root`, in document order.
///
/// Empty exactly when [`load`] succeeds.
pub fn zero_fields<N: ConfigNode>(root: &N) -> Vec<ConfigField> {
    Extracted::from_node(root).zero_fields()
}
