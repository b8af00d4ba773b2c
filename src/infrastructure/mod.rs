// Core infrastructure modules
pub mod cache;          // Bounded LRU caching
pub mod monitoring;     // Tracing subscriber setup
pub mod social_graph;   // In-memory graph store

// Re-export core infrastructure components
pub use cache::Cache;
pub use monitoring::initialize_tracing;
pub use social_graph::{Comment, Post, Relationship, SocialGraph, User, View};
