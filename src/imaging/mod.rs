pub mod convert;
pub mod rembg;

pub use rembg::{remove_background, FallbackMask, RemBgOptions};
