//! # Storage Module
//!
//! Persistence for the widget: a single key/value option table, the same
//! shape as the host's generic option storage. The seed records live in one
//! option as a JSON document; nothing else is stored.
//!
//! - **connection**: SQLite pool setup and schema
//! - **traits**: `OptionStorage`, the abstraction the domain layer depends on
//! - **option_repository**: SQLite implementation of `OptionStorage`

pub mod connection;
pub mod option_repository;
pub mod traits;

pub use connection::DbConnection;
pub use option_repository::SqliteOptionRepository;
pub use traits::OptionStorage;
