use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ndarray::Array3;
use std::sync::Arc;
use swarmnodes::core::{MaskBatch, NodeContext, NodeData, NodeValue, ProcessingNode};

struct ScaleMask {
    factor: f32,
}

#[async_trait]
impl ProcessingNode for ScaleMask {
    async fn on_create(&mut self, _ctx: &NodeContext, config: serde_json::Value) -> Result<()> {
        self.factor = config["factor"].as_f64().unwrap_or(1.0) as f32;
        Ok(())
    }

    async fn process(&self, inputs: NodeData) -> Result<NodeData> {
        let mask = inputs.mask("mask")?;
        if mask.is_empty() {
            return Err(anyhow!("empty mask batch"));
        }
        let scaled = mask.as_array().mapv(|v| (v * self.factor).clamp(0.0, 1.0));
        Ok(NodeData::new().with("mask", NodeValue::Mask(MaskBatch::from_array(scaled))))
    }
}

fn mask_input(value: f32) -> NodeData {
    NodeData::new().with(
        "mask",
        NodeValue::Mask(MaskBatch::from_array(Array3::from_elem((1, 2, 2), value))),
    )
}

#[tokio::test]
async fn test_node_process() {
    let mut node = ScaleMask { factor: 1.0 };
    node.on_create(&NodeContext::default(), serde_json::json!({"factor": 2.0}))
        .await
        .unwrap();

    let result = node.process(mask_input(0.25)).await.unwrap();
    let mask = result.mask("mask").unwrap();
    assert!(mask.as_array().iter().all(|&v| v == 0.5));
}

#[tokio::test]
async fn test_node_rejects_wrong_slot_type() {
    let node = ScaleMask { factor: 1.0 };
    let inputs = NodeData::new().with("mask", NodeValue::Float(0.5));

    let err = node.process(inputs).await.unwrap_err();
    assert!(err.to_string().contains("expected MASK"));
}

#[tokio::test]
async fn test_node_shared_across_tasks() {
    let mut node = ScaleMask { factor: 1.0 };
    node.on_create(&NodeContext::default(), serde_json::json!({"factor": 4.0}))
        .await
        .unwrap();
    let node: Arc<dyn ProcessingNode> = Arc::new(node);

    let handles: Vec<_> = [0.0f32, 0.1, 0.2, 0.5]
        .into_iter()
        .map(|value| {
            let node = node.clone();
            tokio::spawn(async move { (value, node.process(mask_input(value)).await) })
        })
        .collect();

    for handle in handles {
        let (value, result) = handle.await.unwrap();
        let out = result.unwrap();
        let expected = (value * 4.0).clamp(0.0, 1.0);
        assert!(out.mask("mask").unwrap().as_array().iter().all(|&v| v == expected));
    }
}
