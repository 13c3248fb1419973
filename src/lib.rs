pub mod access;
pub mod app;
pub mod authz;
pub mod catalog;
pub mod config;
pub mod db;
pub mod docs;
pub mod errors;
pub mod jwt;
pub mod models;
pub mod routes;
pub mod storage;
pub mod utils;

// Re-export commonly used items for tests
pub use app::{create_app, router, AppState};
