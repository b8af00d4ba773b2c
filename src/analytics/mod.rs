// Analytic engines over the social graph

pub mod censor;      // Profanity censoring collaborator
pub mod corpus;      // Word-frequency corpus extraction
pub mod filters;     // Shared post selection
pub mod importance;  // Post importance scoring
pub mod trending;    // Time-windowed trending ranker

pub use censor::{CachedCensor, Censor, WordListCensor};
pub use corpus::{extract_top_words, CorpusOptions, WordCorpus};
pub use filters::PostFilter;
pub use importance::{rank_by_importance, score, score_named, Criterion, ScoredPost};
pub use trending::{trending, trending_at, TrendingPost, TrendingQuery};
