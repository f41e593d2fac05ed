//! edgectl - manage logging endpoints on edge service versions
//!
//! Every logging endpoint belongs to a numbered service version. Versions
//! that are active or locked cannot be changed in place, so each command
//! first works out which service and version it targets, decides whether
//! it may touch that version (or must clone it), and only then calls the
//! platform API.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Validate → Identity → Version → Guard → Payload pipeline
//! - [`core`] - Domain types, resource catalog, config and manifest
//! - [`api`] - The platform API trait, its HTTP client and a mock
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! 1. Nothing touches the network before flags and the service id are valid
//! 2. Active or locked versions are never mutated in place
//! 3. Updates change only the fields the user set

pub mod api;
pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
