//! Presentation layer handling terminal UI, user input and grid output.
//!
//! The terminal UI uses ratatui; the HTML and plain-text renderers consume
//! the same grid view model for headless output.

pub mod html;
pub mod input;
pub mod text;
pub mod ui;

pub use html::*;
pub use input::*;
pub use text::*;
pub use ui::*;
