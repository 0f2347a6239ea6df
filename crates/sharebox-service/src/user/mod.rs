//! User provisioning and login.

pub mod service;

pub use service::{LoginResult, UserService};
