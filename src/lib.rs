//! Marketplace backend API
//!
//! Users sign up, sign in and log out with cookie-bound stateless session
//! tokens; authenticated users create products, anyone can fetch and list
//! them. Backed by PostgreSQL.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
