// src/lib.rs

pub mod client;
pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod scoring;
pub mod smoke;
pub mod state;

pub use routes::create_router;
