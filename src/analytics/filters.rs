// Post selection shared by the trending ranker and the corpus extractor

use serde::{Deserialize, Serialize};

use crate::infrastructure::{Post, SocialGraph, User};
use crate::types::{AttributeValue, Attributes};

/// Author-attribute and keyword filters. Every filter is optional and an
/// absent filter admits everything.
///
/// Keyword matching is plain case-sensitive substring containment, so
/// `"island"` also matches `"islanders"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostFilter {
    pub include_keywords: Option<Vec<String>>,
    pub exclude_keywords: Option<Vec<String>>,
    pub user_attributes: Option<Attributes>,
}

impl PostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only posts containing at least one of `keywords`
    pub fn include<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_keywords
            .get_or_insert_with(Vec::new)
            .extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Drop posts containing any of `keywords`
    pub fn exclude<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_keywords
            .get_or_insert_with(Vec::new)
            .extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Require the author to carry `key` with exactly `value`
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.user_attributes
            .get_or_insert_with(Attributes::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.user_attributes
            .get_or_insert_with(Attributes::new)
            .extend(attributes);
        self
    }

    pub fn admits_user(&self, user: &User) -> bool {
        match &self.user_attributes {
            Some(required) => required
                .iter()
                .all(|(key, value)| user.attributes.get(key) == Some(value)),
            None => true,
        }
    }

    pub fn admits_content(&self, content: &str) -> bool {
        if let Some(include) = self.include_keywords.as_deref() {
            if !include.is_empty() && !include.iter().any(|k| content.contains(k.as_str())) {
                return false;
            }
        }
        if let Some(exclude) = self.exclude_keywords.as_deref() {
            if exclude.iter().any(|k| content.contains(k.as_str())) {
                return false;
            }
        }
        true
    }

    /// Admitted posts with their authors: users in insertion order, then
    /// each user's posts in creation order
    pub fn select<'g>(&self, graph: &'g SocialGraph) -> Vec<(&'g User, &'g Post)> {
        graph
            .users()
            .filter(|user| self.admits_user(user))
            .flat_map(move |user| {
                user.posts
                    .iter()
                    .filter_map(move |&id| graph.post(id))
                    .filter(move |post| self.admits_content(&post.content))
                    .map(move |post| (user, post))
            })
            .collect()
    }
}
