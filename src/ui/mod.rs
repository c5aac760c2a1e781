//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* models and the app state and turns them into
//! cells on the terminal.  No cart or catalog I/O happens here.

pub mod layout;
pub mod page;
pub mod popup;
pub mod slide;
pub mod spinner;
pub mod status;
pub mod sticky_bar;
pub mod theme;
pub mod upsell;
