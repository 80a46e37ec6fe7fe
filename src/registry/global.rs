use super::{MappingSource, Registry, RegistryBuilder};
use crate::config::PluginConfig;
use crate::error::RegistryError;
use std::sync::OnceLock;
use tracing::{debug, info};

static GLOBAL: OnceLock<Result<Registry, RegistryError>> = OnceLock::new();

/// Build the process-wide registry from `config`, or return the one built
/// by an earlier call. Only the first call's config takes effect.
///
/// Built-in modules merge first, then sources submitted through
/// `inventory` by other crates, ordered by module name.
pub fn init(config: &PluginConfig) -> Result<&'static Registry, RegistryError> {
    if GLOBAL.get().is_some() {
        debug!("node registry already built, ignoring new configuration");
    }
    GLOBAL
        .get_or_init(|| build(config))
        .as_ref()
        .map_err(Clone::clone)
}

/// The process-wide registry, built with the default configuration if
/// nothing called [`init`] first
pub fn global() -> Result<&'static Registry, RegistryError> {
    init(&PluginConfig::default())
}

fn build(config: &PluginConfig) -> Result<Registry, RegistryError> {
    let mut extensions: Vec<&MappingSource> = inventory::iter::<MappingSource>.into_iter().collect();
    extensions.sort_by_key(|source| source.module);

    let builtin = crate::nodes::builtin_sources();

    let registry = builtin
        .iter()
        .chain(extensions)
        .try_fold(
            RegistryBuilder::new(config.merge_policy).web_directory(&config.web_directory),
            |builder, source| builder.merge_source(source),
        )?
        .build();

    info!(
        nodes = registry.len(),
        policy = ?config.merge_policy,
        "node registry ready"
    );
    Ok(registry)
}
