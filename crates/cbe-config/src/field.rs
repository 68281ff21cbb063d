//! Names of the seven required configuration values.

use std::fmt;

/// One required value of an init configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    KeyId,
    VbdLevels,
    VbdChildren,
    VbdLeaves,
    FtLevels,
    FtChildren,
    FtLeaves,
}

/// Element holding the key attributes.
pub const KEY_ELEMENT: &str = "key";
/// Element holding the virtual block device shape.
pub const VBD_ELEMENT: &str = "virtual-block-device";
/// Element holding the free tree shape.
pub const FREE_TREE_ELEMENT: &str = "free-tree";

pub const KEY_ID_ATTRIBUTE: &str = "id";
pub const LEVELS_ATTRIBUTE: &str = "nr_of_levels";
pub const CHILDREN_ATTRIBUTE: &str = "nr_of_children";
pub const LEAFS_ATTRIBUTE: &str = "nr_of_leafs";

impl ConfigField {
    /// All fields in document order.
    pub const ALL: [ConfigField; 7] = [
        ConfigField::KeyId,
        ConfigField::VbdLevels,
        ConfigField::VbdChildren,
        ConfigField::VbdLeaves,
        ConfigField::FtLevels,
        ConfigField::FtChildren,
        ConfigField::FtLeaves,
    ];

    /// Name of the child element that carries this field.
    pub fn element(self) -> &'static str {
        match self {
            ConfigField::KeyId => KEY_ELEMENT,
            ConfigField::VbdLevels | ConfigField::VbdChildren | ConfigField::VbdLeaves => {
                VBD_ELEMENT
            }
            ConfigField::FtLevels | ConfigField::FtChildren | ConfigField::FtLeaves => {
                FREE_TREE_ELEMENT
            }
        }
    }

    /// Name of the attribute that carries this field.
    pub fn attribute(self) -> &'static str {
        match self {
            ConfigField::KeyId => KEY_ID_ATTRIBUTE,
            ConfigField::VbdLevels | ConfigField::FtLevels => LEVELS_ATTRIBUTE,
            ConfigField::VbdChildren | ConfigField::FtChildren => CHILDREN_ATTRIBUTE,
            ConfigField::VbdLeaves | ConfigField::FtLeaves => LEAFS_ATTRIBUTE,
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.element(), self.attribute())
    }
}
