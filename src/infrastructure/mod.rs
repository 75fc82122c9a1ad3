//! Infrastructure layer providing external service integrations.
//!
//! HTTP access to the computation service, local file export/import and
//! the system clipboard.

pub mod client;
pub mod clipboard;
pub mod persistence;

pub use client::*;
pub use clipboard::*;
pub use persistence::*;
