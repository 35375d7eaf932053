//! HTTP API handlers for gourmet-web

pub mod auth;
pub mod detail;
pub mod generate;
pub mod health;
pub mod items;
pub mod login;
