//! # Storage Module
//!
//! Storage abstraction for the care notebook. The domain layer talks to
//! the narrow traits in [`traits`]; two interchangeable implementations
//! are provided:
//!
//! - [`memory::MemoryStore`]: everything behind a mutex, for tests and
//!   local single-process use.
//! - [`document::DocumentStore`]: YAML documents under a per-notebook
//!   directory, written atomically.

pub mod document;
pub mod memory;
pub mod traits;

pub use document::DocumentStore;
pub use memory::MemoryStore;
