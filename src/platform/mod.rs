//! Platform abstraction layer
//!
//! Handles browser/headless differences for:
//! - Frame scheduling (requestAnimationFrame on web, manual pumping elsewhere)
//! - Input event listeners with scoped registration
//! - Presentation (DOM on web)

mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::ManualScheduler;
