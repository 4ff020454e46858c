//! Storage layer
//!
//! Typed errors for the category files. The read/append logic itself lives
//! in [`crate::store`].

pub mod error;

pub use error::{StorageError, StorageResult};
