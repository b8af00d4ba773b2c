// Core types and primitives

pub mod clock;
pub mod strong_types;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use strong_types::{AttributeValue, Attributes, CommentId, PostId};
