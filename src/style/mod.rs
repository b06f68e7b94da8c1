//! Clock style selection and theming
//!
//! This module contains the style enumeration, its durable store, and the
//! style-to-visual-attribute resolver.

pub mod clock_style;
pub mod store;
pub mod theme;

// Re-export main types
pub use clock_style::ClockStyle;
pub use store::StyleStore;
pub use theme::{resolve, Theme};
