use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::api::{Post, PostService};
use crate::app::input::message_for_event;
use crate::app::{App, Session};
use crate::draft::Storage;

const IDLE_POLL_MS: u64 = 250;

impl<S: Storage, P: PostService> App<S, P> {
    /// Run the editor until the post is saved or the user quits.
    ///
    /// Returns the post the admin API accepted, or `None` when the user quit
    /// without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop hits an
    /// I/O failure.
    pub fn run(self) -> Result<Option<Post>> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal, postdesk requires an interactive terminal")?;
        let size = terminal.size()?;
        let _ = execute!(stdout(), EnableBracketedPaste);

        let model = self.build_model((size.width, size.height));
        let start = Instant::now();
        let mut session = Session::start(model, self.slot, self.service, 0);

        let result = Self::event_loop(&mut terminal, &mut session, start);

        let _ = execute!(stdout(), DisableBracketedPaste);
        ratatui::restore();

        result?;
        let (model, _, _) = session.into_parts();
        Ok(model.saved_post)
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        session: &mut Session<S, P>,
        start: Instant,
    ) -> Result<()> {
        let mut needs_render = true;

        loop {
            let now_ms = elapsed_ms(start);
            if session.tick(now_ms) {
                needs_render = true;
            }
            if session.model_mut().expire_toast(Instant::now()) {
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(session.model(), frame))?;
                needs_render = false;
            }

            // The submitting state is on screen; now block on the request.
            if session.submit_pending() {
                needs_render = true;
                continue;
            }

            if session.model().should_quit {
                break;
            }

            let poll_ms = session
                .autosave_remaining_ms(now_ms)
                .map_or(IDLE_POLL_MS, |ms| ms.clamp(10, IDLE_POLL_MS));
            if event::poll(Duration::from_millis(poll_ms))? {
                let event_ms = elapsed_ms(start);
                if let Some(msg) = message_for_event(event::read()?, session.model()) {
                    tracing::trace!(?msg, "message");
                    session.apply(msg, event_ms);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while !session.submission_requested() && event::poll(Duration::ZERO)? {
                    let drain_ms = elapsed_ms(start);
                    if let Some(msg) = message_for_event(event::read()?, session.model()) {
                        session.apply(msg, drain_ms);
                        needs_render = true;
                    }
                }
            }
        }
        Ok(())
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
