//! Application orchestration: state management, event loop plumbing, and input handling.

pub mod alerts;
pub mod cart_runtime;
pub mod event;
pub mod handler;
pub mod settings;
pub mod shop;
pub mod state;
