//! Blog admin API.
//!
//! The editor talks to the post collection service through [`PostService`]
//! so sessions can run against a fake in tests. [`HttpPostService`] is the
//! real client.

mod http;

pub use http::HttpPostService;

use serde::{Deserialize, Serialize};

use crate::draft::Draft;

/// Excerpt length taken from the body when no excerpt was written.
pub const AUTO_EXCERPT_CHARS: usize = 150;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not authorized by the admin API")]
    Unauthorized,
    #[error("admin API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("admin API request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A blog a post can be published under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// A post as returned by the admin API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: i64,
    pub blog_id: i64,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    /// Comma-joined tag list.
    pub tags: String,
    pub published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Body of a create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPayload {
    pub blog_id: i64,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub tags: String,
    pub published: bool,
}

impl PostPayload {
    /// Build the submission body from the editor's draft.
    ///
    /// Title and content are trimmed. A blank excerpt is replaced by the
    /// first 150 characters of the body followed by `...`.
    pub fn from_draft(draft: &Draft) -> Self {
        let excerpt = match draft.excerpt.trim() {
            "" => {
                let head: String = draft.content.chars().take(AUTO_EXCERPT_CHARS).collect();
                format!("{head}...")
            }
            written => written.to_string(),
        };
        Self {
            blog_id: draft.blog_id,
            title: draft.title.trim().to_string(),
            content: draft.content.trim().to_string(),
            excerpt,
            tags: draft.tags.joined(),
            published: draft.published,
        }
    }
}

/// Operations the editor needs from the post collection service.
///
/// Failures are reported as-is; callers never retry.
pub trait PostService {
    /// # Errors
    /// Returns an error if the request fails or is rejected.
    fn create_post(&self, payload: &PostPayload) -> Result<Post, ApiError>;

    /// # Errors
    /// Returns an error if the request fails or is rejected.
    fn update_post(&self, id: i64, payload: &PostPayload) -> Result<Post, ApiError>;

    /// # Errors
    /// Returns an error if the request fails or is rejected.
    fn get_post(&self, id: i64) -> Result<Post, ApiError>;

    /// # Errors
    /// Returns an error if the request fails or is rejected.
    fn get_blogs(&self) -> Result<Vec<Blog>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with(excerpt: &str, content: &str) -> Draft {
        Draft {
            title: "  Hello  ".to_string(),
            content: content.to_string(),
            excerpt: excerpt.to_string(),
            tags: ["rust", "tui"].into_iter().collect(),
            published: true,
            blog_id: 3,
            timestamp: None,
        }
    }

    #[test]
    fn test_payload_trims_and_joins_tags() {
        let payload = PostPayload::from_draft(&draft_with("Short", "\n body \n"));
        assert_eq!(payload.title, "Hello");
        assert_eq!(payload.content, "body");
        assert_eq!(payload.excerpt, "Short");
        assert_eq!(payload.tags, "rust, tui");
        assert_eq!(payload.blog_id, 3);
        assert!(payload.published);
    }

    #[test]
    fn test_blank_excerpt_falls_back_to_body_head() {
        let body = "x".repeat(200);
        let payload = PostPayload::from_draft(&draft_with("   ", &body));
        assert_eq!(payload.excerpt.chars().count(), AUTO_EXCERPT_CHARS + 3);
        assert!(payload.excerpt.ends_with("..."));
    }

    #[test]
    fn test_short_body_excerpt_keeps_whole_body() {
        let payload = PostPayload::from_draft(&draft_with("", "ことば"));
        assert_eq!(payload.excerpt, "ことば...");
    }

    #[test]
    fn test_payload_serializes_snake_case() {
        let payload = PostPayload::from_draft(&draft_with("e", "c"));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["blog_id"], 3);
        assert_eq!(json["tags"], "rust, tui");
    }

    #[test]
    fn test_post_decodes_with_missing_fields() {
        let post: Post = serde_json::from_str(r#"{"id":9,"title":"T","content":"C"}"#).unwrap();
        assert_eq!(post.id, 9);
        assert!(post.tags.is_empty());
        assert!(!post.published);
    }
}
