//! HTTP API: server, routing, and request/response mapping around the pricing core.

pub mod app;
pub mod config;
pub mod middleware;
