//! # Postboard Core
//!
//! The domain layer of Postboard, a client-side post manager.
//! This crate owns post state, validation, rendering and navigation, and talks
//! to storage, the display surface and image ingestion only through ports.

pub mod command;
pub mod controller;
pub mod domain;
pub mod error;
pub mod ports;
pub mod render;
pub mod store;
pub mod validation;

pub use command::{Action, Command, Effect};
pub use controller::{ControllerConfig, ViewController};
pub use error::ControllerError;
pub use store::PostStore;
