//! # sharebox-entity
//!
//! Domain entity models for Sharebox: users, folders, files, and shares.

pub mod file;
pub mod folder;
pub mod share;
pub mod user;
