//! HTTP API: server, routing, CSV source access and response mapping.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
pub mod source;
