//! Element tree model and lookup trait.
//!
//! Lookups return `Option` and never substitute defaults. Callers decide
//! what an absent element or attribute means.

/// Read-only view of one element in a configuration document.
pub trait ConfigNode {
    /// First child element with the given name.
    fn sub_node(&self, name: &str) -> Option<&Self>;

    /// Raw text of the named attribute.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Attribute parsed as an unsigned integer.
    ///
    /// Accepts plain decimal digits or a `0x`/`0X` prefixed hexadecimal
    /// value. The whole attribute text must be consumed; signs, whitespace,
    /// and values wider than 64 bits yield `None`.
    fn attribute_u64(&self, name: &str) -> Option<u64> {
        self.attribute(name).and_then(parse_unsigned)
    }

    /// Attribute parsed as an unsigned 32-bit integer.
    ///
    /// Same rules as [`ConfigNode::attribute_u64`]; values that do not fit
    /// into 32 bits yield `None`.
    fn attribute_u32(&self, name: &str) -> Option<u32> {
        self.attribute_u64(name)
            .and_then(|value| u32::try_from(value).ok())
    }
}

/// Parse decimal or `0x` hexadecimal text into a `u64`.
pub fn parse_unsigned(text: &str) -> Option<u64> {
    let (digits, radix) = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (text, 10),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Owned element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create an element without attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: append an attribute.
    ///
    /// A later attribute with the same name does not replace an earlier one;
    /// lookups return the first match.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder: append a child element.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub(crate) fn push_attribute(&mut self, name: String, value: String) {
        self.attributes.push((name, value));
    }

    pub(crate) fn push_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    pub(crate) fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }
}

impl ConfigNode for XmlNode {
    fn sub_node(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == name)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }
}
