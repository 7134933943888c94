pub mod conversation_routes;
pub mod message_routes;
pub mod tag_routes;
