//! # In-memory repositories
//!
//! `DashMap`-backed implementations of the account, video and comment ports.
//! Nothing survives the process; each instance is an independent store, so
//! tests build fresh ones instead of sharing global state.

mod accounts;
mod comments;
mod table;
mod videos;

pub use accounts::InMemoryAccountRepo;
pub use comments::InMemoryCommentRepo;
pub use videos::InMemoryVideoRepo;
