//! Chat Gateway Module
//! Mission: WebSocket endpoint for the (stub) chat surface

pub mod gateway;

pub use gateway::chat_handler;
