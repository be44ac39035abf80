// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. draft::DraftSlot)
    clippy::module_name_repetitions
)]

//! # Postdesk
//!
//! A terminal editor for blog posts backed by a blog admin API.
//!
//! Postdesk gives an author:
//! - A markdown body editor with an HTML preview
//! - Debounced autosave of the draft to local storage
//! - Recovery of an unsaved draft when a new post is started
//! - Submission to the admin API as a create or an update
//!
//! ## Architecture
//!
//! Postdesk uses The Elm Architecture (TEA) pattern:
//! - **Model**: Editor state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **Session**: Storage writes and API calls requested by a transition
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Editor session and main loop
//! - [`markdown`]: Markdown to HTML preview rendering
//! - [`draft`]: Draft slot persistence
//! - [`autosave`]: Debounced autosave timer
//! - [`api`]: Admin API client
//! - [`editor`]: Text buffers for the input fields
//! - [`ui`]: Terminal UI components
//! - [`config`]: Flag files and effective settings

pub mod api;
pub mod app;
pub mod autosave;
pub mod config;
pub mod draft;
pub mod editor;
pub mod error;
pub mod markdown;
pub mod ui;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{HttpPostService, Post, PostService};
    pub use crate::app::{App, Message, Model, Session};
    pub use crate::draft::{Draft, DraftSlot, FileStorage, MemoryStorage, Storage};
}
