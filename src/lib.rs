//! Season statistics pipeline behind the diamond-dash dashboard.
//!
//! `data` holds the pure pipeline and the file loader, `config` the external
//! settings, and `view` maps each dashboard view to its pipeline call.

pub mod config;
pub mod data;
pub mod view;
