//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the document buffer, request dispatch, and the result lifecycle.

pub mod dispatcher;
pub mod editor;
pub mod state;

pub use dispatcher::*;
pub use editor::*;
pub use state::*;
