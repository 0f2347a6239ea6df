//! Document collaboration protocol against the external editing server.

pub mod callback;
pub mod config;
pub mod doctype;

pub use callback::{CallbackPayload, CallbackService, CallbackStatus};
pub use config::EditorConfigService;
pub use doctype::DocumentType;
