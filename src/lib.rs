// HTTP Server modules
pub mod auth;
pub mod chat;
pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod telemetry;

// Thread persistence
pub mod chat_store;

// LLM abstraction layer
pub mod llm;
