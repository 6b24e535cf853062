//! Image ingestion.

mod fs;

pub use fs::FsImageReader;
