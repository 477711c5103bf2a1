// src/presentation/http/mod.rs
pub mod controllers;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod urls;
pub mod views;
