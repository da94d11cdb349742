pub mod api;
pub mod app_state;
pub mod assessment;
pub mod cache;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod llm;
pub mod prompt;
pub mod service;
