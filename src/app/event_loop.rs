//! Main event loop

use anyhow::Result;
use crossterm::event;
use std::time::{Duration, Instant};

use crate::api::ApiEvent;
use crate::input::{InputResult, handle_input};

use super::App;
use super::render_thread::RenderThread;

impl App {
    pub(crate) async fn event_loop(&mut self, render_thread: &RenderThread) -> Result<()> {
        loop {
            // Process API events FIRST (non-blocking) - prioritize responsiveness
            if self.process_api_events() {
                self.dirty = true;
            }

            // Clear expired errors
            if self.state.clear_error_if_expired() {
                self.dirty = true;
            }

            // Dispatch a debounced search, or fall back to the listing
            if self.poll_search(Instant::now()) {
                self.dirty = true;
            }

            // Keep the spinner moving while requests are in flight
            if self.is_busy() {
                self.dirty = true;
            }

            // Render only when dirty (non-blocking - sends to render thread)
            if self.dirty {
                self.dirty = !render_thread.render(self.state.clone());
            }

            if self.quit_requested {
                break;
            }

            // Handle input (adaptive timeout: faster while anything is pending)
            let poll_timeout = if self.is_busy() { 50 } else { 150 };
            if event::poll(Duration::from_millis(poll_timeout))? {
                let evt = event::read()?;
                // Any input event (including resize) requires re-render
                self.dirty = true;
                match handle_input(evt, &self.state, &self.bindings) {
                    InputResult::Quit => break,
                    InputResult::Action(action) => {
                        self.state.acknowledge_error();
                        self.handle_action(action);
                    }
                    InputResult::Char(c) => {
                        self.state.acknowledge_error();
                        self.handle_char(c);
                    }
                    InputResult::Backspace => {
                        self.state.acknowledge_error();
                        self.handle_backspace();
                    }
                    InputResult::Continue => {}
                }
            }
        }

        Ok(())
    }

    /// Process events from the API actor (non-blocking). Returns true if any events were processed.
    pub(crate) fn process_api_events(&mut self) -> bool {
        let mut had_events = false;
        while let Ok(event) = self.api.event_rx.try_recv() {
            had_events = true;
            match event {
                ApiEvent::Stats(result) => self.handle_stats(result),
                ApiEvent::ContactsPage { request, result } => {
                    self.handle_contacts_page(request, result)
                }
                ApiEvent::SearchResults { ticket, result } => {
                    self.handle_search_results(ticket, result)
                }
                ApiEvent::ThreadMessages { thread_id, result } => {
                    self.handle_thread_messages(thread_id, result)
                }
                ApiEvent::ThreadSummary { thread_id, result } => {
                    self.handle_thread_summary(thread_id, result)
                }
                ApiEvent::IgnoreList(result) => self.handle_ignore_list(result),
                ApiEvent::IgnoreAdded {
                    entry,
                    origin,
                    result,
                } => self.handle_ignore_added(entry, origin, result),
                ApiEvent::IgnoreRemoved { id, result } => self.handle_ignore_removed(id, result),
                ApiEvent::IgnoreImported { items, result } => {
                    self.handle_ignore_imported(items, result)
                }
            }
        }
        had_events
    }
}
