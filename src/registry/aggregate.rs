use super::{NodeClass, NodeDescriptor};
use crate::core::ProcessingNode;
use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What happens when two sources declare the same node key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Duplicate keys fail the build with [`RegistryError::DuplicateNode`]
    #[default]
    Strict,

    /// The later-merged source replaces the earlier descriptor
    LastWriterWins,
}

/// One module's node-type key -> descriptor table
#[derive(Debug, Clone, Default)]
pub struct NodeMappings {
    entries: BTreeMap<String, NodeDescriptor>,
}

impl NodeMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the node type `T` under its descriptor key
    pub fn with<T: NodeClass>(self) -> Self {
        self.with_descriptor(T::descriptor())
    }

    pub fn with_descriptor(mut self, descriptor: NodeDescriptor) -> Self {
        self.entries.insert(descriptor.key.clone(), descriptor);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for NodeMappings {
    type Item = (String, NodeDescriptor);
    type IntoIter = std::collections::btree_map::IntoIter<String, NodeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A module's mapping declaration, submitted through `inventory`
#[derive(Debug, Clone, Copy)]
pub struct MappingSource {
    pub module: &'static str,
    pub mappings: fn() -> NodeMappings,
}

impl MappingSource {
    pub const fn new(module: &'static str, mappings: fn() -> NodeMappings) -> Self {
        Self { module, mappings }
    }
}

inventory::collect!(MappingSource);

/// A registered node together with the module that declared it
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub module: String,
    pub descriptor: NodeDescriptor,
}

/// Composes mapping sources into a [`Registry`]
#[derive(Debug)]
pub struct RegistryBuilder {
    policy: MergePolicy,
    web_directory: PathBuf,
    entries: BTreeMap<String, RegistryEntry>,
}

impl RegistryBuilder {
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            policy,
            web_directory: PathBuf::from("./web"),
            entries: BTreeMap::new(),
        }
    }

    pub fn web_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.web_directory = path.into();
        self
    }

    /// Merge one module's mappings into the table
    pub fn merge(mut self, module: &str, mappings: NodeMappings) -> Result<Self, RegistryError> {
        let count = mappings.len();

        for (key, descriptor) in mappings {
            if let Some(existing) = self.entries.get(&key) {
                match self.policy {
                    MergePolicy::Strict => {
                        return Err(RegistryError::DuplicateNode {
                            key,
                            first: existing.module.clone(),
                            second: module.to_string(),
                        });
                    }
                    MergePolicy::LastWriterWins => {
                        warn!(
                            key = %key,
                            previous = %existing.module,
                            replacement = module,
                            "node type declared twice, keeping the later declaration"
                        );
                    }
                }
            }

            self.entries.insert(
                key,
                RegistryEntry {
                    module: module.to_string(),
                    descriptor,
                },
            );
        }

        debug!(module, count, "merged node mappings");
        Ok(self)
    }

    pub fn merge_source(self, source: &MappingSource) -> Result<Self, RegistryError> {
        self.merge(source.module, (source.mappings)())
    }

    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
            web_directory: self.web_directory,
        }
    }
}

/// Read-only, process-wide table of every node type the host can create
#[derive(Debug, Clone)]
pub struct Registry {
    entries: BTreeMap<String, RegistryEntry>,
    web_directory: PathBuf,
}

impl Registry {
    /// Merge `sources` in order under `policy`
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = &'a MappingSource>,
        policy: MergePolicy,
    ) -> Result<Self, RegistryError> {
        sources
            .into_iter()
            .try_fold(RegistryBuilder::new(policy), |builder, source| builder.merge_source(source))
            .map(RegistryBuilder::build)
    }

    pub fn get(&self, key: &str) -> Option<&NodeDescriptor> {
        self.entries.get(key).map(|entry| &entry.descriptor)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Module that declared `key`
    pub fn module_of(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|entry| entry.module.as_str())
    }

    /// All node keys, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All descriptors, sorted by key
    pub fn descriptors(&self) -> impl Iterator<Item = &NodeDescriptor> {
        self.entries.values().map(|entry| &entry.descriptor)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegistryEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn instantiate(&self, key: &str) -> Result<Box<dyn ProcessingNode>, RegistryError> {
        self.get(key)
            .map(NodeDescriptor::create_instance)
            .ok_or_else(|| RegistryError::UnknownNode(key.to_string()))
    }

    /// Directory of auxiliary web assets for the host's UI
    pub fn web_directory(&self) -> &Path {
        &self.web_directory
    }
}
