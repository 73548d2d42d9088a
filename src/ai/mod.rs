//! All AI/LLM functionality

pub mod client;
pub mod prompt_builder;

// Re-export main types for convenience
pub use client::{OllamaClient, Summarizer, clean_response};
pub use prompt_builder::build_prompt;
