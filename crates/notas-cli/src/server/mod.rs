//! Web server for the grade lookup page.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
