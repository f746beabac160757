//! # storage-adapters
//!
//! Concrete implementations of the `domains` repository ports.

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "memory")]
pub use memory::{InMemoryAccountRepo, InMemoryCommentRepo, InMemoryVideoRepo};
