use crate::api::PostService;
use crate::app::model::{AutosaveStatus, SessionKind};
use crate::app::{Message, Model, update};
use crate::autosave::AutosaveTimer;
use crate::draft::{DraftSlot, Storage};

/// One editing session: the model plus everything it talks to.
///
/// Messages go through the pure [`update`] first; the session then does the
/// storage writes and remote calls the transition asked for.
pub struct Session<S, P> {
    pub(super) model: Model,
    pub(super) slot: DraftSlot<S>,
    pub(super) service: P,
    pub(super) autosave: AutosaveTimer,
    submission_requested: bool,
}

impl<S: Storage, P: PostService> Session<S, P> {
    /// Mount the editor.
    ///
    /// A new-post session offers any stored draft for restoring. The current
    /// fields are scheduled for autosave right away.
    pub fn start(model: Model, slot: DraftSlot<S>, service: P, now_ms: u64) -> Self {
        let mut session = Self {
            model,
            slot,
            service,
            autosave: AutosaveTimer::default(),
            submission_requested: false,
        };
        if session.model.kind == SessionKind::New {
            session.offer_recovery();
        }
        session.schedule_autosave(now_ms);
        session
    }

    pub const fn model(&self) -> &Model {
        &self.model
    }

    pub(super) const fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub const fn slot(&self) -> &DraftSlot<S> {
        &self.slot
    }

    pub const fn service(&self) -> &P {
        &self.service
    }

    pub fn into_parts(self) -> (Model, DraftSlot<S>, P) {
        (self.model, self.slot, self.service)
    }

    /// Apply `msg` and run a submission it started.
    pub fn dispatch(&mut self, msg: Message, now_ms: u64) {
        self.apply(msg, now_ms);
        self.submit_pending();
    }

    /// Apply `msg` without running a submission.
    ///
    /// The event loop uses this so it can draw the submitting state before
    /// the blocking request goes out.
    pub fn apply(&mut self, msg: Message, now_ms: u64) {
        let revision = self.model.revision();
        let was_submitting = self.model.is_submitting();
        let quitting = msg == Message::Quit;

        self.model = update(std::mem::take(&mut self.model), msg);

        if self.model.revision() != revision {
            self.schedule_autosave(now_ms);
        }
        if !was_submitting && self.model.is_submitting() {
            self.submission_requested = true;
        }
        if quitting {
            self.flush_autosave();
        }
    }

    pub const fn submission_requested(&self) -> bool {
        self.submission_requested
    }

    /// Run the submission started by the last [`Session::apply`], if any.
    pub fn submit_pending(&mut self) -> bool {
        if !std::mem::take(&mut self.submission_requested) {
            return false;
        }
        self.submit();
        true
    }

    /// Write the pending autosave once its quiet window has passed.
    ///
    /// Returns `true` when the model changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.autosave.take_ready(now_ms) {
            Some(draft) => {
                self.write_autosave(&draft);
                true
            }
            None => false,
        }
    }

    pub const fn autosave_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    pub fn autosave_remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.autosave.remaining_ms(now_ms)
    }

    fn schedule_autosave(&mut self, now_ms: u64) {
        self.autosave.schedule(self.model.draft(), now_ms);
        self.model.autosave = AutosaveStatus::Pending;
    }

    /// Write the pending draft now instead of dropping it on exit.
    fn flush_autosave(&mut self) {
        if let Some(draft) = self.autosave.take_now() {
            self.write_autosave(&draft);
        }
    }
}
