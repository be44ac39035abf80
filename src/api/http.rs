use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{ApiError, Blog, Post, PostPayload, PostService};

#[derive(Debug, Deserialize)]
struct BlogsEnvelope {
    blogs: Vec<Blog>,
}

#[derive(Debug, Deserialize)]
struct PostEnvelope {
    post: Post,
}

/// Admin API client over HTTP with bearer-token auth.
pub struct HttpPostService {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl HttpPostService {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send()?;
        let status = response.status();
        tracing::debug!(%status, url = %response.url(), "admin API response");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json()?)
    }
}

impl PostService for HttpPostService {
    fn create_post(&self, payload: &PostPayload) -> Result<Post, ApiError> {
        let request = self.client.post(self.url("admin/posts")).json(payload);
        self.send::<PostEnvelope>(request).map(|env| env.post)
    }

    fn update_post(&self, id: i64, payload: &PostPayload) -> Result<Post, ApiError> {
        let request = self
            .client
            .put(self.url(&format!("admin/posts/{id}")))
            .json(payload);
        self.send::<PostEnvelope>(request).map(|env| env.post)
    }

    fn get_post(&self, id: i64) -> Result<Post, ApiError> {
        let request = self.client.get(self.url(&format!("admin/posts/{id}")));
        self.send::<PostEnvelope>(request).map(|env| env.post)
    }

    fn get_blogs(&self) -> Result<Vec<Blog>, ApiError> {
        let request = self.client.get(self.url("admin/blogs"));
        self.send::<BlogsEnvelope>(request).map(|env| env.blogs)
    }
}

impl std::fmt::Debug for HttpPostService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPostService")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let service = HttpPostService::new("http://localhost:8080/api/", None);
        assert_eq!(
            service.url("/admin/posts"),
            "http://localhost:8080/api/admin/posts"
        );
        let service = HttpPostService::new("http://localhost:8080/api", None);
        assert_eq!(
            service.url("admin/blogs"),
            "http://localhost:8080/api/admin/blogs"
        );
    }

    #[test]
    fn test_envelopes_decode() {
        let blogs: BlogsEnvelope = serde_json::from_str(
            r#"{"blogs":[{"id":1,"name":"Tech","slug":"tech"},{"id":2,"name":"Life","slug":"life"}]}"#,
        )
        .unwrap();
        assert_eq!(blogs.blogs.len(), 2);
        assert_eq!(blogs.blogs[1].slug, "life");

        let post: PostEnvelope =
            serde_json::from_str(r#"{"post":{"id":4,"blog_id":2,"title":"T","tags":"a, b"}}"#)
                .unwrap();
        assert_eq!(post.post.id, 4);
        assert_eq!(post.post.blog_id, 2);
    }

    #[test]
    fn test_debug_redacts_token() {
        let service = HttpPostService::new("http://x", Some("secret".to_string()));
        let debug = format!("{service:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
