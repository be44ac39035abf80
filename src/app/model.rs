use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::api::{Blog, Post};
use crate::draft::{Draft, TagList};
use crate::editor::{BodyBuffer, LineInput};

/// Blog id used when the blog list is empty.
pub const FALLBACK_BLOG_ID: i64 = 1;

/// Whether the session creates a post or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionKind {
    #[default]
    New,
    Edit {
        post_id: i64,
    },
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Mounted, nothing typed yet.
    #[default]
    Empty,
    Editing,
    /// Waiting on the admin API. Further saves are ignored.
    Submitting,
    /// The post was accepted and the draft slot cleared.
    Submitted,
}

/// Input field receiving keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    Title,
    #[default]
    Body,
    Excerpt,
    TagInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Autosave indicator shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutosaveStatus {
    #[default]
    Idle,
    Pending,
    Saved(DateTime<Utc>),
}

/// The complete editor state.
#[derive(Debug, Clone)]
pub struct Model {
    pub kind: SessionKind,
    pub phase: Phase,
    pub title: LineInput,
    pub body: BodyBuffer,
    pub excerpt: LineInput,
    pub tags: TagList,
    pub tag_input: LineInput,
    pub published: bool,
    pub blog_id: i64,
    /// Blogs the post can be published under
    pub blogs: Vec<Blog>,
    pub focus: Field,
    pub preview_mode: bool,
    pub settings_visible: bool,
    pub help_visible: bool,
    /// Stored draft awaiting the restore/decline answer
    pub restore_prompt: Option<Draft>,
    /// First visible body line in the editor pane
    pub body_scroll_offset: usize,
    /// First visible line in the preview pane
    pub preview_scroll_offset: usize,
    pub autosave: AutosaveStatus,
    /// Post returned by the admin API after a successful save
    pub saved_post: Option<Post>,
    /// Terminal size (width, height)
    pub size: (u16, u16),
    pub should_quit: bool,
    /// Bumped on every change to a draft field
    revision: u64,
    toast: Option<Toast>,
}

impl Model {
    /// Empty editor for a new post.
    pub fn new(blogs: Vec<Blog>, size: (u16, u16)) -> Self {
        Self {
            kind: SessionKind::New,
            phase: Phase::Empty,
            title: LineInput::default(),
            body: BodyBuffer::empty(),
            excerpt: LineInput::default(),
            tags: TagList::new(),
            tag_input: LineInput::default(),
            published: false,
            blog_id: default_blog_id(&blogs),
            blogs,
            focus: Field::Title,
            preview_mode: false,
            settings_visible: false,
            help_visible: false,
            restore_prompt: None,
            body_scroll_offset: 0,
            preview_scroll_offset: 0,
            autosave: AutosaveStatus::Idle,
            saved_post: None,
            size,
            should_quit: false,
            revision: 0,
            toast: None,
        }
    }

    /// Editor seeded from an existing post.
    pub fn for_post(post: &Post, blogs: Vec<Blog>, size: (u16, u16)) -> Self {
        let mut model = Self::new(blogs, size);
        model.kind = SessionKind::Edit { post_id: post.id };
        model.title = LineInput::new(&post.title);
        model.body = BodyBuffer::from_text(&post.content);
        model.excerpt = LineInput::new(&post.excerpt);
        model.tags = TagList::parse_joined(&post.tags);
        model.published = post.published;
        if post.blog_id != 0 {
            model.blog_id = post.blog_id;
        }
        model.focus = Field::Body;
        model
    }

    /// Snapshot of the draft fields. The timestamp is left unset.
    pub fn draft(&self) -> Draft {
        Draft {
            title: self.title.as_str().to_string(),
            content: self.body.text(),
            excerpt: self.excerpt.as_str().to_string(),
            tags: self.tags.clone(),
            published: self.published,
            blog_id: self.blog_id,
            timestamp: None,
        }
    }

    /// Copy a recovered draft into the editor fields.
    pub fn apply_draft(&mut self, draft: &Draft) {
        self.title = LineInput::new(&draft.title);
        self.body.set_text(&draft.content);
        self.excerpt = LineInput::new(&draft.excerpt);
        self.tags = draft.tags.clone();
        self.published = draft.published;
        self.blog_id = draft.blog_id_or(default_blog_id(&self.blogs));
        self.body_scroll_offset = 0;
        self.preview_scroll_offset = 0;
        self.mark_edited();
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub(super) const fn mark_edited(&mut self) {
        self.revision += 1;
        if matches!(self.phase, Phase::Empty) {
            self.phase = Phase::Editing;
        }
    }

    pub fn selected_blog(&self) -> Option<&Blog> {
        self.blogs.iter().find(|blog| blog.id == self.blog_id)
    }

    /// Select the next or previous blog in the list, wrapping around.
    pub(super) fn cycle_blog(&mut self, forward: bool) -> bool {
        let len = self.blogs.len();
        if len == 0 {
            return false;
        }
        let next = match self.blogs.iter().position(|b| b.id == self.blog_id) {
            Some(idx) if forward => (idx + 1) % len,
            Some(idx) => (idx + len - 1) % len,
            None => 0,
        };
        let id = self.blogs[next].id;
        if id == self.blog_id {
            return false;
        }
        self.blog_id = id;
        true
    }

    pub const fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting)
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Rows available to the body editor or preview.
    pub fn content_height(&self) -> usize {
        crate::ui::content_area_height(self) as usize
    }

    /// Keep the body cursor inside the visible editor rows.
    pub(super) fn scroll_to_cursor(&mut self) {
        let height = self.content_height().max(1);
        let line = self.body.cursor().line;
        if line < self.body_scroll_offset {
            self.body_scroll_offset = line;
        } else if line >= self.body_scroll_offset + height {
            self.body_scroll_offset = line + 1 - height;
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Vec::new(), (80, 24))
    }
}

fn default_blog_id(blogs: &[Blog]) -> i64 {
    blogs.first().map_or(FALLBACK_BLOG_ID, |blog| blog.id)
}
