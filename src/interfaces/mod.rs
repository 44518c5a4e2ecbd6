//! Output adapters for projection results.

pub mod csv;
