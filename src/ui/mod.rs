//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-facing output goes through this module so quiet, verbose and
//! JSON modes behave the same in every command. Diagnostic logging uses
//! `tracing` instead.

pub mod output;
