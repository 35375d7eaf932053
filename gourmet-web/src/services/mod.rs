//! External service clients

pub mod draft_client;
