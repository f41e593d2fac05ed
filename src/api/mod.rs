//! api
//!
//! The platform API seam.
//!
//! # Architecture
//!
//! The `Api` trait defines every platform operation the engine uses. The
//! engine only ever sees `&dyn Api`; commands build an [`http::HttpApi`],
//! tests use [`mock::MockApi`].
//!
//! # Modules
//!
//! - `traits`: Core `Api` trait, `ApiError` and `UpdatePayload`
//! - [`http`]: REST implementation using `reqwest`
//! - [`mock`]: In-memory implementation for deterministic testing

pub mod http;
pub mod mock;
mod traits;

pub use traits::*;
