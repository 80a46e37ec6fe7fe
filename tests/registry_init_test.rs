use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use swarmnodes::core::{NodeContext, NodeData, ProcessingNode};
use swarmnodes::registry::{self, MappingSource, MergePolicy, NodeDescriptor, NodeMappings};
use swarmnodes::PluginConfig;

struct Replacement;

#[async_trait]
impl ProcessingNode for Replacement {
    async fn on_create(&mut self, _ctx: &NodeContext, _config: serde_json::Value) -> Result<()> {
        Ok(())
    }

    async fn process(&self, inputs: NodeData) -> Result<NodeData> {
        Ok(inputs)
    }
}

fn replacement_mappings() -> NodeMappings {
    NodeMappings::new().with_descriptor(
        NodeDescriptor::new("SwarmRemBg", "Remove Background (alt)", "third-party", || Box::new(Replacement))
            .add_input("images", "IMAGE")
            .add_output("image", "IMAGE", "IMAGE"),
    )
}

// Sorts ahead of "rembg", so only builtin-first ordering lets it win
inventory::submit! {
    MappingSource::new("alt_rembg", replacement_mappings)
}

#[test]
fn test_init_applies_plugin_config_once() {
    let config = PluginConfig {
        web_directory: PathBuf::from("assets"),
        merge_policy: MergePolicy::LastWriterWins,
        ..PluginConfig::default()
    };

    let registry = registry::init(&config).expect("last-writer-wins never conflicts");

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.module_of("SwarmRemBg"), Some("alt_rembg"));
    assert_eq!(registry.get("SwarmRemBg").unwrap().category, "third-party");
    assert_eq!(registry.web_directory(), Path::new("assets"));

    // A later, stricter config is ignored: the first build stands
    let stricter = PluginConfig {
        web_directory: PathBuf::from("elsewhere"),
        merge_policy: MergePolicy::Strict,
        ..PluginConfig::default()
    };
    let again = registry::init(&stricter).expect("cached registry is returned");

    assert!(std::ptr::eq(registry, again));
    assert_eq!(again.web_directory(), Path::new("assets"));
    assert_eq!(again.module_of("SwarmRemBg"), Some("alt_rembg"));
    assert!(std::ptr::eq(registry, registry::global().unwrap()));
}
