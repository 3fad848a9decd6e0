//! Configuration and submission models shared by the handlers.

pub mod config;
pub mod models;
