//! Domain layer: the site catalog contract, run parameters and projection
//! values, plus the port through which catalogs are obtained.

pub mod catalog;
pub mod money;
pub mod parameters;
pub mod ports;
pub mod projection;
