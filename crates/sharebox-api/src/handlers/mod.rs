//! HTTP request handlers.

pub mod auth;
pub mod collab;
pub mod file;
pub mod folder;
pub mod health;
pub mod public;
pub mod share;
