// src/presentation/mod.rs
pub mod http;
pub mod templates;
