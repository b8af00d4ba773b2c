// Corpus Extractor - builds the bounded word corpus handed to a word-cloud renderer
//
// select -> censor -> join -> normalize -> tokenize -> top-K -> rebuild

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{info, instrument};

use super::censor::Censor;
use super::filters::PostFilter;
use crate::config::CorpusConfig;
use crate::infrastructure::SocialGraph;

static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{Alphabetic}\p{N}\s]").expect("static pattern is valid"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusOptions {
    pub filter: PostFilter,
    pub censor: bool,
    /// Tokens must be strictly longer than this many characters
    pub min_word_length: usize,
    pub top_k: usize,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            filter: PostFilter::default(),
            censor: true,
            min_word_length: 3,
            top_k: 25,
        }
    }
}

impl CorpusOptions {
    pub fn from_config(config: &CorpusConfig) -> Self {
        Self {
            filter: PostFilter::default(),
            censor: config.censor,
            min_word_length: config.min_word_length,
            top_k: config.top_k,
        }
    }

    pub fn with_filter(mut self, filter: PostFilter) -> Self {
        self.filter = filter;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordCorpus {
    /// Most frequent words, highest count first
    pub top_words: Vec<String>,
    /// Corpus reduced to top words, original order and repetition kept
    pub text: String,
}

#[instrument(skip(graph, censor), fields(top_k = options.top_k))]
pub fn extract_top_words(graph: &SocialGraph, options: &CorpusOptions, censor: &dyn Censor) -> WordCorpus {
    let contents: Vec<String> = options
        .filter
        .select(graph)
        .into_iter()
        .map(|(_, post)| {
            if options.censor {
                censor.censor(&post.content)
            } else {
                post.content.clone()
            }
        })
        .collect();

    let normalized = normalize(&contents.join(" "));
    let tokens = tokenize(&normalized, options.min_word_length);
    let top = top_words(&tokens, options.top_k);
    let text = filter_corpus(&tokens, &top);

    info!(posts = contents.len(), tokens = tokens.len(), words = top.len(), "word corpus extracted");
    WordCorpus { top_words: top, text }
}

/// Drop every character that is neither alphanumeric nor whitespace
pub fn normalize(text: &str) -> String {
    NON_WORD.replace_all(text, "").into_owned()
}

/// Whitespace tokens strictly longer than `min_word_length` characters
pub fn tokenize(text: &str, min_word_length: usize) -> Vec<&str> {
    text.split_whitespace()
        .filter(|token| token.chars().count() > min_word_length)
        .collect()
}

/// The `top_k` most frequent tokens, ties in first-occurrence order
pub fn top_words(tokens: &[&str], top_k: usize) -> Vec<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, token) in tokens.iter().enumerate() {
        counts.entry(*token).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(token, (count, first))| (token, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(top_k)
        .map(|(token, _, _)| token.to_string())
        .collect()
}

/// Keep only tokens in `top`, in their original order, joined by single spaces
pub fn filter_corpus(tokens: &[&str], top: &[String]) -> String {
    let keep: HashSet<&str> = top.iter().map(String::as_str).collect();
    tokens
        .iter()
        .copied()
        .filter(|token| keep.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}
