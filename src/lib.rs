//! Campaign TUI - A terminal client for the Marketing Campaign AI backend
//!
//! This library exposes modules for use in integration tests.

pub mod api;
pub mod app;
pub mod config;
pub mod models;
pub mod stream;
pub mod ui;
