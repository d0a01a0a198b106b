//! SitePilot daemon library - exposes modules for testing.

pub mod answer;
pub mod config;
pub mod error;
pub mod llm;
pub mod routes;
pub mod server;
pub mod session;
pub mod store;
