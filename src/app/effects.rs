use chrono::Utc;
use tracing::{debug, info, warn};

use crate::api::{PostPayload, PostService};
use crate::app::Session;
use crate::app::model::{AutosaveStatus, Phase, SessionKind, ToastLevel};
use crate::draft::{Draft, Storage};

impl<S: Storage, P: PostService> Session<S, P> {
    pub(super) fn offer_recovery(&mut self) {
        if let Some(draft) = self.slot.load() {
            info!(title = %draft.title, "found stored draft");
            self.model.restore_prompt = Some(draft);
        }
    }

    pub(super) fn write_autosave(&mut self, draft: &Draft) {
        if !draft.is_autosave_eligible() {
            debug!("autosave skipped, title or body empty");
            self.model.autosave = AutosaveStatus::Idle;
            return;
        }
        let now = Utc::now();
        match self.slot.save(draft, now) {
            Ok(_) => self.model.autosave = AutosaveStatus::Saved(now),
            Err(err) => {
                warn!(%err, "autosave failed");
                self.model.autosave = AutosaveStatus::Idle;
                self.model
                    .show_toast(ToastLevel::Warning, format!("Autosave failed: {err}"));
            }
        }
    }

    pub(super) fn submit(&mut self) {
        let payload = PostPayload::from_draft(&self.model.draft());
        let kind = self.model.kind;
        info!(?kind, title = %payload.title, blog_id = payload.blog_id, "submitting post");

        let result = match kind {
            SessionKind::New => self.service.create_post(&payload),
            SessionKind::Edit { post_id } => self.service.update_post(post_id, &payload),
        };

        match result {
            Ok(post) => {
                info!(id = post.id, "post accepted");
                self.autosave.cancel();
                if let Err(err) = self.slot.clear() {
                    warn!(%err, "failed to clear draft slot after save");
                }
                self.model.phase = Phase::Submitted;
                self.model.autosave = AutosaveStatus::Idle;
                let message = match kind {
                    SessionKind::New => "Post saved",
                    SessionKind::Edit { .. } => "Post updated",
                };
                self.model.show_toast(ToastLevel::Info, message);
                self.model.saved_post = Some(post);
                self.model.should_quit = true;
            }
            Err(err) => {
                warn!(%err, "post submission failed");
                self.model.phase = Phase::Editing;
                let message = match kind {
                    SessionKind::New => "Save failed",
                    SessionKind::Edit { .. } => "Update failed",
                };
                self.model.show_toast(ToastLevel::Error, message);
            }
        }
    }
}
