//! Storage infrastructure: PostgreSQL pool and migrations

pub mod migrations;
mod postgres;

pub use migrations::PostgresMigrator;
pub use postgres::{
    PRODUCTS_ID_SEQ, PostgresConfig, USERS_ID_SEQ, connect, last_sequence_value,
};
