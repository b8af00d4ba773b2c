// Social Graph - In-memory store of users, relationships, posts, comments and views
// Single writer; analytics engines borrow it immutably

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::types::{Attributes, Clock, CommentId, PostId, SystemClock};

/// A user node and everything it authored or saw
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub attributes: Attributes,
    /// Authored posts in creation order
    pub posts: Vec<PostId>,
    /// Posts viewed at least once, in first-view order
    pub seen_posts: Vec<PostId>,
    /// Authored comments in creation order
    pub comments: Vec<CommentId>,
    #[serde(skip)]
    seen_index: HashSet<PostId>,
}

impl User {
    fn new(id: String, attributes: Attributes) -> Self {
        Self {
            id,
            attributes,
            posts: Vec::new(),
            seen_posts: Vec::new(),
            comments: Vec::new(),
            seen_index: HashSet::new(),
        }
    }

    pub fn has_seen(&self, post: PostId) -> bool {
        self.seen_index.contains(&post)
    }
}

/// A post owned by its author
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: PostId,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<CommentId>,
    /// View log: one record per view call, repeats included
    pub views: Vec<View>,
}

impl Post {
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub viewer: String,
    pub viewed_at: DateTime<Utc>,
}

/// A comment, stored once and referenced by id from both the post and the author
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub post: PostId,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Directed edge between two users; repeated connections accumulate labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub labels: Vec<String>,
}

impl Relationship {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

#[derive(Debug)]
pub struct SocialGraph {
    clock: Arc<dyn Clock>,
    users: Vec<User>,
    user_index: HashMap<String, usize>,
    // PostId(n) lives at index n - 1, same for comments
    posts: Vec<Post>,
    comments: Vec<Comment>,
    relationships: Vec<Relationship>,
    relationship_index: HashMap<(usize, usize), usize>,
}

impl Default for SocialGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            users: Vec::new(),
            user_index: HashMap::new(),
            posts: Vec::new(),
            comments: Vec::new(),
            relationships: Vec::new(),
            relationship_index: HashMap::new(),
        }
    }

    /// Current instant according to the store's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // Mutations

    /// Register a new user. Re-adding an existing id is rejected and leaves the
    /// existing user (posts, edges, comments) untouched.
    pub fn add_user(&mut self, id: impl Into<String>, attributes: Attributes) -> AppResult<&User> {
        let id = id.into();
        if self.user_index.contains_key(&id) {
            warn!(user = %id, "rejecting duplicate user");
            return Err(AppError::DuplicateUser(id));
        }

        let index = self.users.len();
        debug!(user = %id, attributes = attributes.len(), "user added");
        self.user_index.insert(id.clone(), index);
        self.users.push(User::new(id, attributes));
        Ok(&self.users[index])
    }

    /// Connect `from` to `to` with `label`, creating the edge on first use
    pub fn add_relationship(&mut self, from: &str, to: &str, label: impl Into<String>) -> AppResult<()> {
        let from_index = self.user_slot(from)?;
        let to_index = self.user_slot(to)?;
        let label = label.into();

        match self.relationship_index.get(&(from_index, to_index)) {
            Some(&edge) => self.relationships[edge].labels.push(label.clone()),
            None => {
                self.relationship_index
                    .insert((from_index, to_index), self.relationships.len());
                self.relationships.push(Relationship {
                    from: from.to_string(),
                    to: to.to_string(),
                    labels: vec![label.clone()],
                });
            }
        }
        debug!(from, to, label = %label, "relationship recorded");
        Ok(())
    }

    pub fn create_post(&mut self, user_id: &str, content: impl Into<String>) -> AppResult<PostId> {
        let author = self.user_slot(user_id)?;
        let id = PostId::new(self.posts.len() as u64 + 1);
        let created_at = self.clock.now();

        self.posts.push(Post {
            id,
            author: user_id.to_string(),
            content: content.into(),
            created_at,
            comments: Vec::new(),
            views: Vec::new(),
        });
        self.users[author].posts.push(id);
        debug!(user = user_id, post = %id, "post created");
        Ok(id)
    }

    /// Log a view. The post's view log always grows; the viewer's seen set
    /// only gains the post the first time.
    pub fn view_post(&mut self, user_id: &str, post_id: PostId) -> AppResult<()> {
        let viewer = self.user_slot(user_id)?;
        let post = self.post_slot(post_id)?;
        let viewed_at = self.clock.now();

        self.posts[post].views.push(View {
            viewer: user_id.to_string(),
            viewed_at,
        });
        let user = &mut self.users[viewer];
        if user.seen_index.insert(post_id) {
            user.seen_posts.push(post_id);
        }
        debug!(user = user_id, post = %post_id, "post viewed");
        Ok(())
    }

    pub fn comment_on_post(
        &mut self,
        user_id: &str,
        post_id: PostId,
        content: impl Into<String>,
    ) -> AppResult<CommentId> {
        let author = self.user_slot(user_id)?;
        let post = self.post_slot(post_id)?;
        let id = CommentId::new(self.comments.len() as u64 + 1);

        self.comments.push(Comment {
            id,
            post: post_id,
            author: user_id.to_string(),
            content: content.into(),
            created_at: self.clock.now(),
        });
        self.posts[post].comments.push(id);
        self.users[author].comments.push(id);
        debug!(user = user_id, post = %post_id, comment = %id, "comment added");
        Ok(id)
    }

    // Lookups

    pub fn user(&self, id: &str) -> Option<&User> {
        self.user_index.get(id).map(|&index| &self.users[index])
    }

    pub fn contains_user(&self, id: &str) -> bool {
        self.user_index.contains_key(id)
    }

    /// Users in insertion order
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        let index = usize::try_from(id.value()).ok()?.checked_sub(1)?;
        self.posts.get(index)
    }

    /// Posts in creation order
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter()
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        let index = usize::try_from(id.value()).ok()?.checked_sub(1)?;
        self.comments.get(index)
    }

    pub fn posts_of(&self, user_id: &str) -> AppResult<Vec<&Post>> {
        let user = self.require_user(user_id)?;
        Ok(user.posts.iter().filter_map(|&id| self.post(id)).collect())
    }

    pub fn comments_of(&self, user_id: &str) -> AppResult<Vec<&Comment>> {
        let user = self.require_user(user_id)?;
        Ok(user.comments.iter().filter_map(|&id| self.comment(id)).collect())
    }

    pub fn seen_posts_of(&self, user_id: &str) -> AppResult<Vec<&Post>> {
        let user = self.require_user(user_id)?;
        Ok(user.seen_posts.iter().filter_map(|&id| self.post(id)).collect())
    }

    pub fn post_comments(&self, post_id: PostId) -> AppResult<Vec<&Comment>> {
        let post = self.require_post(post_id)?;
        Ok(post.comments.iter().filter_map(|&id| self.comment(id)).collect())
    }

    pub fn post_views(&self, post_id: PostId) -> AppResult<&[View]> {
        Ok(&self.require_post(post_id)?.views)
    }

    // Traversal

    pub fn relationship(&self, from: &str, to: &str) -> Option<&Relationship> {
        let key = (*self.user_index.get(from)?, *self.user_index.get(to)?);
        self.relationship_index
            .get(&key)
            .map(|&edge| &self.relationships[edge])
    }

    /// Edges in creation order
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter()
    }

    /// Number of distinct users with an edge into `user_id`
    pub fn in_degree(&self, user_id: &str) -> AppResult<usize> {
        self.require_user(user_id)?;
        Ok(self.relationships.iter().filter(|r| r.to == user_id).count())
    }

    /// Number of distinct users `user_id` has an edge to
    pub fn out_degree(&self, user_id: &str) -> AppResult<usize> {
        self.require_user(user_id)?;
        Ok(self.relationships.iter().filter(|r| r.from == user_id).count())
    }

    /// Targets of outgoing edges, optionally only those carrying `label`
    pub fn neighbors(&self, user_id: &str, label: Option<&str>) -> AppResult<Vec<&str>> {
        self.require_user(user_id)?;
        Ok(self
            .relationships
            .iter()
            .filter(|r| r.from == user_id && label.map_or(true, |l| r.has_label(l)))
            .map(|r| r.to.as_str())
            .collect())
    }

    /// Sources of incoming edges, optionally only those carrying `label`
    pub fn followers(&self, user_id: &str, label: Option<&str>) -> AppResult<Vec<&str>> {
        self.require_user(user_id)?;
        Ok(self
            .relationships
            .iter()
            .filter(|r| r.to == user_id && label.map_or(true, |l| r.has_label(l)))
            .map(|r| r.from.as_str())
            .collect())
    }

    fn require_user(&self, id: &str) -> AppResult<&User> {
        self.user(id)
            .ok_or_else(|| AppError::UnknownUser(id.to_string()))
    }

    fn require_post(&self, id: PostId) -> AppResult<&Post> {
        self.post(id).ok_or(AppError::UnknownPost(id))
    }

    fn user_slot(&self, id: &str) -> AppResult<usize> {
        match self.user_index.get(id) {
            Some(&index) => Ok(index),
            None => {
                warn!(user = id, "unknown user");
                Err(AppError::UnknownUser(id.to_string()))
            }
        }
    }

    fn post_slot(&self, id: PostId) -> AppResult<usize> {
        match self.post(id) {
            Some(_) => Ok(id.value() as usize - 1),
            None => {
                warn!(post = %id, "unknown post");
                Err(AppError::UnknownPost(id))
            }
        }
    }
}
