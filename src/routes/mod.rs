pub mod auth;
pub mod health;
pub mod lessons;
pub mod storage;
