// src/handlers/mod.rs

pub mod admin;
pub mod health;
pub mod quiz;
pub mod result;
