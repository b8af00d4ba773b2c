// Importance scoring over a post's engagement counters

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, AppResult};
use crate::infrastructure::{Post, SocialGraph};

/// Weight of a single view in the blended score
pub const VIEW_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Comments,
    Views,
    Blend,
}

impl Criterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Comments => "comments",
            Criterion::Views => "views",
            Criterion::Blend => "blend",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comments" => Ok(Criterion::Comments),
            "views" => Ok(Criterion::Views),
            "blend" => Ok(Criterion::Blend),
            other => Err(AppError::InvalidCriterion(other.to_string())),
        }
    }
}

/// Score a post. Views count every record in the view log, not distinct viewers.
pub fn score(post: &Post, criterion: Criterion) -> f64 {
    let comments = post.comment_count() as f64;
    let views = post.view_count() as f64;
    match criterion {
        Criterion::Comments => comments,
        Criterion::Views => views,
        Criterion::Blend => comments + VIEW_WEIGHT * views,
    }
}

pub fn score_named(post: &Post, criterion: &str) -> AppResult<f64> {
    Ok(score(post, criterion.parse()?))
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredPost<'g> {
    pub post: &'g Post,
    pub score: f64,
}

/// Every post, highest score first; equal scores keep creation order
pub fn rank_by_importance(graph: &SocialGraph, criterion: Criterion) -> Vec<ScoredPost<'_>> {
    let mut ranked: Vec<ScoredPost<'_>> = graph
        .posts()
        .map(|post| ScoredPost {
            post,
            score: score(post, criterion),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
