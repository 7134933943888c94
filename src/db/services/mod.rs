//! Data access for the chat tables. Each sub-module covers one entity; the
//! public functions are re-exported so callers can use `crate::db::services::*`.

pub mod conversation_service;
pub mod message_service;
pub mod tag_service;
pub mod user_service;

pub use conversation_service::*;
pub use message_service::*;
pub use tag_service::*;
pub use user_service::*;
