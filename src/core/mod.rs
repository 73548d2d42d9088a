//! Settings and the value types shared by formatters, the AI client and commands.

pub mod config;
pub mod models;
