//! Application layer containing the projection engine.
//!
//! `projector` simulates a single configuration, `matcher` suggests the nearest
//! available panel counts, and `advisor` composes the two for a caller that
//! explores panel counts against one site.

pub mod advisor;
pub mod matcher;
pub mod projector;
