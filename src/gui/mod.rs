//! GUI Module
//!
//! Screens, theme, and the remote image texture cache.

pub mod image_cache;
pub mod screens;
pub mod theme;

pub use image_cache::{ImageCache, ImageState};
