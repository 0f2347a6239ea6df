//! Folder entity and tree helpers.

pub mod model;
pub mod tree;

pub use model::{CreateFolder, Folder};
pub use tree::{Breadcrumb, MAX_TREE_DEPTH};
