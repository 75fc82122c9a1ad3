//! plantdesk - Plant Layout Runner Library
//!
//! A terminal front-end that submits YAML plant models to a layout service
//! and renders the returned station grid.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;
pub mod config;

pub use domain::*;
pub use application::*;
