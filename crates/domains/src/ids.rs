//! Entity id generation.
//!
//! Ids are `<kind>-<suffix>`. The suffix source is injected into every
//! storage backend so tests can pin ids such as `thread-123`.

use std::sync::Arc;

use uuid::Uuid;

/// Produces the suffix of a new entity id.
pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

pub const THREAD_PREFIX: &str = "thread";
pub const COMMENT_PREFIX: &str = "comment";
pub const REPLY_PREFIX: &str = "reply";
pub const LIKE_PREFIX: &str = "like";

/// Random suffixes (UUID v4, simple form).
pub fn random_ids() -> IdGenerator {
    Arc::new(|| Uuid::new_v4().simple().to_string())
}

/// Always yields `suffix`.
pub fn fixed_ids(suffix: impl Into<String>) -> IdGenerator {
    let suffix = suffix.into();
    Arc::new(move || suffix.clone())
}

pub fn new_id(prefix: &str, generator: &IdGenerator) -> String {
    format!("{}-{}", prefix, generator())
}
