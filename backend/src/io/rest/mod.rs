//! # REST API Interface Layer
//!
//! HTTP endpoints of the widget, one module per concern. Each module exposes
//! a `router()` that `create_router` mounts under its prefix.

pub mod dashboard_apis;
pub mod data_apis;
pub mod logging_apis;
