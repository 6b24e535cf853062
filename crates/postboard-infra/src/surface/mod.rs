//! Display surfaces.

mod headless;

pub use headless::{HeadlessSurface, SurfaceSnapshot};
