use crate::core::{NodeContext, NodeData, NodeValue, ProcessingNode};
use crate::imaging::{remove_background, RemBgOptions};
use crate::matting::MattingBackend;
use crate::registry::{MappingSource, NodeMappings};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use swarmnodes_macros::SwarmNode;

/// Removes the background of the first image in a batch, returning the
/// cut-out image and a mask where 1.0 marks removed pixels
#[derive(SwarmNode)]
#[node_meta(name = "Remove Background (rembg)", category = "StableSwarmUI", function = "rem")]
pub struct SwarmRemBg {
    #[input(name = "images", data_type = "IMAGE")]
    _images: (),

    #[output(name = "IMAGE", data_type = "IMAGE")]
    _image: (),

    #[output(name = "MASK", data_type = "MASK")]
    _mask: (),

    #[param(default = "true")]
    pub post_process_mask: bool,

    options: RemBgOptions,
    matting: Option<Arc<dyn MattingBackend>>,
}

impl Default for SwarmRemBg {
    fn default() -> Self {
        Self {
            _images: (),
            _image: (),
            _mask: (),
            post_process_mask: true,
            options: RemBgOptions::default(),
            matting: None,
        }
    }
}

#[async_trait]
impl ProcessingNode for SwarmRemBg {
    async fn on_create(&mut self, ctx: &NodeContext, config: Value) -> Result<()> {
        let defaults = &ctx.config().rembg;

        self.post_process_mask = config
            .get("post_process_mask")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.post_process_mask);

        self.options = RemBgOptions {
            post_process_mask: self.post_process_mask,
            fallback_mask: defaults.fallback_mask,
        };

        self.matting = Some(
            ctx.matting()
                .ok_or_else(|| anyhow!("SwarmRemBg needs a matting backend, none was provided"))?,
        );

        Ok(())
    }

    async fn process(&self, inputs: NodeData) -> Result<NodeData> {
        let images = inputs.image("images")?.clone();
        let matting = self
            .matting
            .clone()
            .ok_or_else(|| anyhow!("SwarmRemBg was not initialised with on_create"))?;
        let options = self.options.clone();

        let (image, mask) = tokio::task::spawn_blocking(move || {
            remove_background(&images, matting.as_ref(), &options)
        })
        .await
        .context("background removal worker did not complete")??;

        Ok(NodeData::new()
            .with("image", NodeValue::Image(image))
            .with("mask", NodeValue::Mask(mask)))
    }
}

pub fn node_class_mappings() -> NodeMappings {
    NodeMappings::new().with::<SwarmRemBg>()
}

pub const SOURCE: MappingSource = MappingSource::new("rembg", node_class_mappings);
