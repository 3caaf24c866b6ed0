//! # IO Module
//!
//! Interface layer between the browser and the domain logic.
//!
//! ## Supported Operations
//!
//! - **GET /graph-widget/v1/data?period=...**: records inside a trailing window
//! - **POST /graph-widget/v1/logs**: log lines forwarded from the widget
//! - **GET /wp-admin/{page}**: admin page shell with the widget container on the dashboard
//!
//! Handlers translate query strings and JSON into domain calls and map
//! domain errors to HTTP status codes; they hold no business rules.

pub mod rest;

pub use rest::*;
