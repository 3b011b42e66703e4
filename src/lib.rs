//! Meme Studio Library
//!
//! Core components for the Imgflip template browser and caption generator.

pub mod api;
pub mod app;
pub mod config;
pub mod gui;
pub mod history;

pub use app::{App, AppState};
