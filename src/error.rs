use crate::types::PostId;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    UnknownUser(String),
    UnknownPost(PostId),
    DuplicateUser(String),
    InvalidCriterion(String),
    Configuration(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::UnknownUser(id) => write!(f, "Unknown user: {}", id),
            AppError::UnknownPost(id) => write!(f, "Unknown post: {}", id),
            AppError::DuplicateUser(id) => write!(f, "Duplicate user: {}", id),
            AppError::InvalidCriterion(name) => {
                write!(f, "Invalid criterion: {} (expected comments, views or blend)", name)
            }
            AppError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;
