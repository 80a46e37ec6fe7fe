pub mod aggregate;
pub mod global;
pub mod metadata;

pub use aggregate::{MappingSource, MergePolicy, NodeMappings, Registry, RegistryBuilder, RegistryEntry};
pub use global::{global, init};
pub use metadata::{NodeClass, NodeDescriptor, NodeFactory, ParameterSchema, PortMetadata};
