//! Draft slot behaviour across editor sessions, on real files.

use std::cell::RefCell;

use postdesk::api::{ApiError, Blog, Post, PostPayload, PostService};
use postdesk::app::{Message, Model, Phase, Session};
use postdesk::draft::{DRAFT_KEY, DraftSlot, FileStorage, Storage};

#[derive(Default)]
struct RecordingService {
    created: RefCell<Vec<PostPayload>>,
}

impl PostService for RecordingService {
    fn create_post(&self, payload: &PostPayload) -> Result<Post, ApiError> {
        self.created.borrow_mut().push(payload.clone());
        Ok(Post {
            id: 1,
            title: payload.title.clone(),
            ..Post::default()
        })
    }

    fn update_post(&self, _id: i64, _payload: &PostPayload) -> Result<Post, ApiError> {
        Err(ApiError::Unauthorized)
    }

    fn get_post(&self, _id: i64) -> Result<Post, ApiError> {
        Err(ApiError::Unauthorized)
    }

    fn get_blogs(&self) -> Result<Vec<Blog>, ApiError> {
        Ok(Vec::new())
    }
}

fn start(dir: &std::path::Path) -> Session<FileStorage, RecordingService> {
    Session::start(
        Model::new(Vec::new(), (80, 24)),
        DraftSlot::new(FileStorage::new(dir)),
        RecordingService::default(),
        0,
    )
}

fn type_text(session: &mut Session<FileStorage, RecordingService>, text: &str, now_ms: u64) {
    for ch in text.chars() {
        session.dispatch(Message::InsertChar(ch), now_ms);
    }
}

#[test]
fn test_draft_survives_restart_and_is_cleared_after_submit() {
    let dir = tempfile::tempdir().unwrap();

    // First session: type, let autosave fire, quit without saving.
    let mut first = start(dir.path());
    assert!(first.model().restore_prompt.is_none());
    type_text(&mut first, "Unfinished", 0);
    first.dispatch(Message::FocusNext, 0);
    type_text(&mut first, "Half a thought", 0);
    assert!(first.tick(2_000));
    first.dispatch(Message::Quit, 2_100);
    drop(first);

    assert!(dir.path().join(format!("{DRAFT_KEY}.json")).exists());

    // Second session: the draft is offered and restored.
    let mut second = start(dir.path());
    let offered = second.model().restore_prompt.clone().unwrap();
    assert_eq!(offered.title, "Unfinished");
    assert!(offered.timestamp.is_some());
    second.dispatch(Message::ConfirmRestore, 0);
    assert_eq!(second.model().body.text(), "Half a thought");

    second.dispatch(Message::Save, 10);
    assert_eq!(second.model().phase, Phase::Submitted);
    assert_eq!(second.service().created.borrow().len(), 1);
    assert!(second.slot().storage().get(DRAFT_KEY).unwrap().is_none());

    // Third session: nothing left to offer.
    let third = start(dir.path());
    assert!(third.model().restore_prompt.is_none());
}

#[test]
fn test_corrupt_draft_file_is_ignored_but_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("{DRAFT_KEY}.json"));
    std::fs::write(&path, "{\"title\": ").unwrap();

    let session = start(dir.path());
    assert!(session.model().restore_prompt.is_none());
    assert!(session.slot().try_load().is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"title\": ");
}

#[test]
fn test_partial_draft_file_fills_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(format!("{DRAFT_KEY}.json")),
        r#"{"title":"Only title","tags":["a","b"],"blogId":5}"#,
    )
    .unwrap();

    let session = start(dir.path());
    let draft = session.model().restore_prompt.clone().unwrap();
    assert_eq!(draft.title, "Only title");
    assert_eq!(draft.content, "");
    assert_eq!(draft.tags.joined(), "a, b");
    assert_eq!(draft.blog_id, 5);
    assert!(!draft.published);
}
