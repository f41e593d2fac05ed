//! core
//!
//! Core domain types, schemas, and data for edgectl.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ServiceId, VersionNumber, VersionSpecifier
//! - [`optional`] - Values that remember whether they were supplied
//! - [`resource`] - Logging endpoint kinds, field descriptors, resources
//! - [`config`] - User configuration schema and loading
//! - [`manifest`] - Project manifest (`edge.toml`)
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Nothing here talks to the network

pub mod config;
pub mod manifest;
pub mod optional;
pub mod resource;
pub mod types;
