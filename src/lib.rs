//! Extra nodes for an image-generation host.
//!
//! The host discovers nodes through [`registry::global`], which merges every
//! module's node mappings into one read-only table, then instantiates them
//! by key and drives them through [`core::ProcessingNode`].

pub mod config;
pub mod core;
pub mod error;
pub mod imaging;
pub mod matting;
pub mod nodes;
pub mod registry;

pub use config::PluginConfig;
pub use error::{RegistryError, ShapeError};
