//! Probes the Offcloud API to find out which request shape actually
//! deletes a cloud download. Exposed as a library so the client and the
//! bootstrap helper can be reused from other tools.

pub mod cli;
pub mod config;
pub mod error;
pub mod offcloud;
pub mod probe;
