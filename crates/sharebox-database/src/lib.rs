//! # sharebox-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all Sharebox entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::{connect, ping};
