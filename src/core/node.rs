use super::NodeData;
use crate::config::PluginConfig;
use crate::matting::MattingBackend;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Services the host hands to a node when it is instantiated
#[derive(Clone, Default)]
pub struct NodeContext {
    config: PluginConfig,
    matting: Option<Arc<dyn MattingBackend>>,
}

impl NodeContext {
    pub fn new(config: PluginConfig) -> Self {
        Self {
            config,
            matting: None,
        }
    }

    pub fn with_matting(mut self, backend: Arc<dyn MattingBackend>) -> Self {
        self.matting = Some(backend);
        self
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn matting(&self) -> Option<Arc<dyn MattingBackend>> {
        self.matting.clone()
    }
}

impl std::fmt::Debug for NodeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeContext")
            .field("config", &self.config)
            .field("matting", &self.matting.as_ref().map(|m| m.name().to_string()))
            .finish()
    }
}

/// Base trait for every node the host can place in a graph
#[async_trait]
pub trait ProcessingNode: Send + Sync {
    /// Called once after the registry factory creates the node, with the
    /// node's widget values as JSON
    async fn on_create(&mut self, ctx: &NodeContext, config: Value) -> Result<()>;

    /// The node's entry point: consumes named inputs, returns outputs in
    /// declared order
    async fn process(&self, inputs: NodeData) -> Result<NodeData>;
}
