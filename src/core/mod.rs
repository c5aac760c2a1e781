//! Storefront behaviour: scroll observation, sticky-bar visibility, cart
//! membership and add-to-cart orchestration.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod add_to_cart;
pub mod alert;
pub mod cart;
pub mod catalog;
pub mod observe;
pub mod pricing;
pub mod scroll;
pub mod selection;
pub mod sticky_bar;
pub mod visibility;
