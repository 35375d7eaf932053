//! # GourmetGuide Common Library
//!
//! Shared code for the GourmetGuide content service including:
//! - Database initialization and query layer
//! - Content item model (recipe / restaurant review sum type)
//! - Slug derivation and uniqueness resolution
//! - Bearer token and password primitives
//! - Configuration loading

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod slug;

pub use error::{Error, Result};
