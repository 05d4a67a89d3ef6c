// Core analysis gateway functionality:
// - HTTP client for the completion service
// - Request/response wire structures
// - Meal analysis domain model and prompt construction
// - Configuration loading
// - Shared error types

// Export client module - completion service client
pub mod client;
pub use client::*;

// Export types module - wire request/response structures
pub mod types;
pub use types::*;

// Export analysis module - domain model and prompts
pub mod analysis;
pub use analysis::*;

// Export config module - configuration loading
pub mod config;
pub use config::*;

// Export errors module - shared error types
pub mod errors;
pub use errors::*;
