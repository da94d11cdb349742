pub mod client;
pub mod errors;

pub use client::{ChatCompletionClient, CompletionClient, CompletionRequest};
pub use errors::LlmError;

#[cfg(test)]
pub use client::MockCompletionClient;
