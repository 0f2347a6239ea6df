//! Share entity and permission level.

pub mod model;
pub mod permission;

pub use model::{CreateShare, Share};
pub use permission::SharePermission;
