//! Sharing and permission engine.

pub mod access;
pub mod link;
pub mod service;

pub use access::{AccessDecision, AccessService};
pub use link::LinkService;
pub use service::ShareService;
