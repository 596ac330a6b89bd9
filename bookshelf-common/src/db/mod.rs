//! Database layer: schema initialization and data models

pub mod init;
pub mod models;

pub use init::init_database;
