//! Infrastructure adapters: config
//! loading, logging setup, text file
//! sink, Postgres repo, time,
//! randomness.
pub mod config;
pub mod logging;
pub mod postgres_repo;
pub mod random;
pub mod system_clock;
pub mod text_file;
pub mod time;
