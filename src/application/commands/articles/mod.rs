// src/application/commands/articles/mod.rs
mod create;
mod delete;
mod service;
mod update;

pub use create::{SaveArticleCommand, SaveArticleCommandBuilder};
pub use service::ArticleCommandService;
