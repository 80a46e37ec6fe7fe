pub mod rembg;

pub use rembg::SwarmRemBg;

use crate::registry::MappingSource;

/// Mapping sources compiled into this crate, in merge order
pub fn builtin_sources() -> Vec<MappingSource> {
    vec![rembg::SOURCE]
}
