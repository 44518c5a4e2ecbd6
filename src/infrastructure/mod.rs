//! Adapters implementing the catalog source port.

pub mod file;
pub mod in_memory;
