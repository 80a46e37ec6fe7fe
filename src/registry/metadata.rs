use crate::core::ProcessingNode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Metadata describing a port (input or output)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortMetadata {
    pub id: String,
    pub name: String,
    pub data_type: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

/// Schema for a configurable widget parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub default: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Factory function type for creating node instances
pub type NodeFactory = fn() -> Box<dyn ProcessingNode>;

/// Registered schema and implementation for one node type
#[derive(Debug, Clone)]
pub struct NodeDescriptor {
    /// Unique node-type key the host refers to the node by
    pub key: String,
    pub name: String,
    pub category: String,
    /// Name of the entry-point operation
    pub function: String,
    pub inputs: Vec<PortMetadata>,
    pub outputs: Vec<PortMetadata>,
    pub parameters: Vec<ParameterSchema>,
    pub factory: NodeFactory,
}

impl NodeDescriptor {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        factory: NodeFactory,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            category: category.into(),
            function: "process".to_string(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            parameters: Vec::new(),
            factory,
        }
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = function.into();
        self
    }

    pub fn add_input(mut self, id: impl Into<String>, data_type: impl Into<String>) -> Self {
        let id = id.into();
        self.inputs.push(PortMetadata {
            name: id.clone(),
            id,
            data_type: data_type.into(),
            optional: false,
        });
        self
    }

    pub fn add_optional_input(mut self, id: impl Into<String>, data_type: impl Into<String>) -> Self {
        let id = id.into();
        self.inputs.push(PortMetadata {
            name: id.clone(),
            id,
            data_type: data_type.into(),
            optional: true,
        });
        self
    }

    pub fn add_output(mut self, id: impl Into<String>, name: impl Into<String>, data_type: impl Into<String>) -> Self {
        self.outputs.push(PortMetadata {
            id: id.into(),
            name: name.into(),
            data_type: data_type.into(),
            optional: false,
        });
        self
    }

    pub fn add_parameter(mut self, param: ParameterSchema) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn required_inputs(&self) -> impl Iterator<Item = &PortMetadata> {
        self.inputs.iter().filter(|port| !port.optional)
    }

    pub fn optional_inputs(&self) -> impl Iterator<Item = &PortMetadata> {
        self.inputs.iter().filter(|port| port.optional)
    }

    /// Output type tags in declared order
    pub fn output_types(&self) -> Vec<&str> {
        self.outputs.iter().map(|port| port.data_type.as_str()).collect()
    }

    /// Create a new instance of this node type
    pub fn create_instance(&self) -> Box<dyn ProcessingNode> {
        (self.factory)()
    }

    /// Declaration in the shape the host's node catalogue expects:
    /// `input_types` split into required/optional, `return_types`,
    /// `function` and `category`
    pub fn to_host_json(&self) -> Value {
        let ports = |optional: bool| {
            let mut map = Map::new();
            for port in self.inputs.iter().filter(|port| port.optional == optional) {
                map.insert(port.id.clone(), json!([port.data_type]));
            }
            map
        };

        let mut required = ports(false);
        for param in &self.parameters {
            let mut options = Map::new();
            options.insert("default".to_string(), param.default.clone());
            if let Some(min) = param.min {
                options.insert("min".to_string(), json!(min));
            }
            if let Some(max) = param.max {
                options.insert("max".to_string(), json!(max));
            }
            required.insert(param.name.clone(), json!([param.param_type, options]));
        }

        json!({
            "display_name": self.name,
            "category": self.category,
            "function": self.function,
            "input_types": {
                "required": required,
                "optional": ports(true),
            },
            "return_types": self.output_types(),
            "return_names": self.outputs.iter().map(|port| port.name.as_str()).collect::<Vec<_>>(),
        })
    }
}

/// Implemented by node structs (usually via `#[derive(SwarmNode)]`) to
/// produce their descriptor
pub trait NodeClass {
    fn descriptor() -> NodeDescriptor;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NodeContext, NodeData};
    use anyhow::Result;
    use async_trait::async_trait;

    struct Noop;

    #[async_trait]
    impl ProcessingNode for Noop {
        async fn on_create(&mut self, _ctx: &NodeContext, _config: Value) -> Result<()> {
            Ok(())
        }

        async fn process(&self, inputs: NodeData) -> Result<NodeData> {
            Ok(inputs)
        }
    }

    fn descriptor() -> NodeDescriptor {
        NodeDescriptor::new("Blend", "Blend Images", "Images", || Box::new(Noop))
            .with_function("blend")
            .add_input("image_a", "IMAGE")
            .add_input("image_b", "IMAGE")
            .add_optional_input("mask", "MASK")
            .add_output("image", "IMAGE", "IMAGE")
            .add_parameter(ParameterSchema {
                name: "opacity".to_string(),
                param_type: "FLOAT".to_string(),
                default: json!(0.5),
                min: Some(0.0),
                max: Some(1.0),
            })
    }

    #[test]
    fn test_required_and_optional_split() {
        let desc = descriptor();
        let required: Vec<&str> = desc.required_inputs().map(|p| p.id.as_str()).collect();
        let optional: Vec<&str> = desc.optional_inputs().map(|p| p.id.as_str()).collect();

        assert_eq!(required, vec!["image_a", "image_b"]);
        assert_eq!(optional, vec!["mask"]);
        assert_eq!(desc.output_types(), vec!["IMAGE"]);
    }

    #[test]
    fn test_host_json_shape() {
        let host = descriptor().to_host_json();

        assert_eq!(host["function"], "blend");
        assert_eq!(host["category"], "Images");
        assert_eq!(host["input_types"]["required"]["image_a"], json!(["IMAGE"]));
        assert_eq!(host["input_types"]["optional"]["mask"], json!(["MASK"]));
        assert_eq!(
            host["input_types"]["required"]["opacity"],
            json!(["FLOAT", { "default": 0.5, "min": 0.0, "max": 1.0 }])
        );
        assert_eq!(host["return_types"], json!(["IMAGE"]));
    }
}
