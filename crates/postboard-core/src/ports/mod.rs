//! Ports - trait definitions for everything outside the core.
//! These are the "interfaces" that infrastructure must implement.

mod image;
mod storage;
mod surface;

pub use image::ImageReader;
pub use storage::KeyValueStore;
pub use surface::{Region, Surface};
