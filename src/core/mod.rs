pub mod data;
pub mod node;
pub mod tensor;

pub use data::{NodeData, NodeValue};
pub use node::{NodeContext, ProcessingNode};
pub use tensor::{ImageBatch, MaskBatch};
