use super::{ImageBatch, MaskBatch};
use anyhow::{anyhow, Result};

/// A single value flowing through a node input or output slot
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    Image(ImageBatch),
    Mask(MaskBatch),
    Int(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

impl NodeValue {
    /// Host type tag for this value, as used in port declarations
    pub fn type_tag(&self) -> &'static str {
        match self {
            NodeValue::Image(_) => "IMAGE",
            NodeValue::Mask(_) => "MASK",
            NodeValue::Int(_) => "INT",
            NodeValue::Float(_) => "FLOAT",
            NodeValue::Boolean(_) => "BOOLEAN",
            NodeValue::Text(_) => "STRING",
        }
    }
}

/// Named slots passed into and returned from a node's entry point
///
/// Slots keep insertion order so outputs line up with the declared
/// output sequence of the node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeData {
    slots: Vec<(String, NodeValue)>,
}

impl NodeData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: NodeValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a slot, replacing an existing slot of the same name in place
    pub fn insert(&mut self, name: impl Into<String>, value: NodeValue) {
        let name = name.into();
        match self.slots.iter_mut().find(|(slot, _)| *slot == name) {
            Some((_, existing)) => *existing = value,
            None => self.slots.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&NodeValue> {
        self.slots
            .iter()
            .find(|(slot, _)| slot == name)
            .map(|(_, value)| value)
    }

    pub fn image(&self, name: &str) -> Result<&ImageBatch> {
        match self.get(name) {
            Some(NodeValue::Image(images)) => Ok(images),
            Some(other) => Err(anyhow!("slot '{}' holds {}, expected IMAGE", name, other.type_tag())),
            None => Err(anyhow!("missing required input '{}'", name)),
        }
    }

    pub fn mask(&self, name: &str) -> Result<&MaskBatch> {
        match self.get(name) {
            Some(NodeValue::Mask(mask)) => Ok(mask),
            Some(other) => Err(anyhow!("slot '{}' holds {}, expected MASK", name, other.type_tag())),
            None => Err(anyhow!("missing required input '{}'", name)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeValue)> {
        self.slots.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Type tags of all slots, in order
    pub fn type_tags(&self) -> Vec<&'static str> {
        self.slots.iter().map(|(_, value)| value.type_tag()).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut data = NodeData::new()
            .with("a", NodeValue::Int(1))
            .with("b", NodeValue::Boolean(true));
        data.insert("a", NodeValue::Float(2.5));

        let names: Vec<&str> = data.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(data.get("a"), Some(&NodeValue::Float(2.5)));
        assert_eq!(data.type_tags(), vec!["FLOAT", "BOOLEAN"]);
    }

    #[test]
    fn test_typed_accessors_report_mismatch() {
        let data = NodeData::new().with("images", NodeValue::Text("nope".into()));

        let err = data.image("images").unwrap_err();
        assert!(err.to_string().contains("expected IMAGE"));
        assert!(data.mask("mask").unwrap_err().to_string().contains("missing"));
    }
}
