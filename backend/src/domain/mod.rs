//! # Domain Module
//!
//! Business logic of the graph widget, independent of HTTP and SQLite.
//!
//! ## Module Organization
//!
//! - **activation**: the seed dataset and the activation hook that stores it
//! - **record_source**: where records are read from (startup snapshot or live option)
//! - **data_window**: trailing-window selection behind the data endpoint
//! - **plugin**: widget registration, script asset metadata, admin page gating
//!
//! ## Rules
//!
//! - A window contains every record dated on or after its cutoff, in source order
//! - The seed option is rewritten in full on every activation
//! - The widget and its script only appear on the dashboard page (`index.php`)

pub mod activation;
pub mod data_window;
pub mod plugin;
pub mod record_source;

pub use activation::*;
pub use data_window::*;
pub use plugin::*;
pub use record_source::*;
