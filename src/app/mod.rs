//! Editor session state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete editor state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`Session`]: Runs the side effects a transition asks for
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod session;
mod update;

pub use input::{message_for_event, message_for_key};
pub use model::{AutosaveStatus, FALLBACK_BLOG_ID, Field, Model, Phase, SessionKind, ToastLevel};
pub use session::Session;
pub use update::{Message, update};

use crate::api::{ApiError, Blog, Post, PostService};
use crate::draft::{DraftSlot, Storage};

/// Main application struct that owns the services and runs the event loop.
pub struct App<S, P> {
    post: Option<Post>,
    blogs: Vec<Blog>,
    slot: DraftSlot<S>,
    service: P,
    help_visible: bool,
}

impl<S: Storage, P: PostService> App<S, P> {
    /// Editor for a new post.
    pub fn new_post(blogs: Vec<Blog>, storage: S, service: P) -> Self {
        Self {
            post: None,
            blogs,
            slot: DraftSlot::new(storage),
            service,
            help_visible: false,
        }
    }

    /// Editor for an existing post. Stored drafts are not offered.
    pub fn edit_post(post: Post, blogs: Vec<Blog>, storage: S, service: P) -> Self {
        Self {
            post: Some(post),
            ..Self::new_post(blogs, storage, service)
        }
    }

    /// Fetch the blog list and open a new-post editor. Any failure aborts
    /// startup; the editor never opens against a blog list it could not load.
    pub fn load_new_post(storage: S, service: P) -> Result<Self, ApiError> {
        let blogs = service.get_blogs()?;
        Ok(Self::new_post(blogs, storage, service))
    }

    /// Fetch post `post_id` and the blog list, then open an editor for it.
    pub fn load_edit_post(post_id: i64, storage: S, service: P) -> Result<Self, ApiError> {
        let post = service.get_post(post_id)?;
        let blogs = service.get_blogs()?;
        Ok(Self::edit_post(post, blogs, storage, service))
    }

    /// Show the key reference when the editor opens.
    pub const fn with_help_visible(mut self, visible: bool) -> Self {
        self.help_visible = visible;
        self
    }

    /// Initial model for a terminal of `size`.
    pub fn build_model(&self, size: (u16, u16)) -> Model {
        let blogs = self.blogs.clone();
        let mut model = match &self.post {
            Some(post) => Model::for_post(post, blogs, size),
            None => Model::new(blogs, size),
        };
        model.help_visible = self.help_visible;
        model
    }
}
