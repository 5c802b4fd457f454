//! Storage abstraction and implementations for Questline.
//!
//! This crate provides a trait-based persistence port with a JSON-file
//! reference implementation and an in-memory backend for tests.

#![warn(missing_docs)]

pub mod json_storage;
pub mod memory;
pub mod trait_;

pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
pub use trait_::{Result, Storage, StorageError};
