//! SeaORM entities mapping the chat tables.

pub mod conversation;
pub mod message;
pub mod tag;
pub mod user;
