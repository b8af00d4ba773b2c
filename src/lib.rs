// Social Trends - in-memory social interaction graph with trending, importance and corpus analytics

// Core types and primitives
pub mod types;

// Graph store, caching and logging setup
pub mod infrastructure;

// Trending ranker, importance scorer, corpus extractor
pub mod analytics;

// Snapshots for rendering collaborators
pub mod models;

// Common utilities
pub mod config;
pub mod error;

// Re-exports for convenience
pub use error::{AppError, AppResult};
pub use infrastructure::{initialize_tracing, SocialGraph};
