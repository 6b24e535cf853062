//! # Postboard Infrastructure
//!
//! Concrete implementations of the ports defined in `postboard-core`, plus
//! the event loop that owns a controller and runs its effects.

pub mod image;
pub mod runtime;
pub mod storage;
pub mod surface;

pub use image::FsImageReader;
pub use runtime::EventLoop;
pub use storage::{FileStorage, InMemoryStorage};
pub use surface::{HeadlessSurface, SurfaceSnapshot};
