//! CLI command handlers
//!
//! # Modules
//!
//! - `cluster`: run the `cluster` operation on request documents
//! - `features`: inspect the attribute schema of a request
//! - `config`: print the effective configuration

pub mod cluster;
pub mod config;
pub mod features;

mod input;
