//! Application core - owns state and the API actor, coordinates views

mod actions;
mod event_loop;
mod handlers;
pub mod render_thread;
pub mod state;

use anyhow::Result;
use std::path::PathBuf;

use render_thread::RenderThread;

use crate::actor::RetryConfig;
use crate::api::{ApiActorHandle, ApiClient, ApiCommand, spawn_api_actor};
use crate::config::Config;
use crate::input::KeyBindings;
use state::AppState;

pub struct App {
    pub(crate) config: Config,
    pub(crate) api: ApiActorHandle,
    pub(crate) state: AppState,
    pub(crate) bindings: KeyBindings,
    /// Export directory waiting on a fresh ignore list
    pub(crate) pending_export: Option<PathBuf>,
    pub(crate) quit_requested: bool,
    /// Dirty flag: when true, UI needs re-render. Skips renders when nothing changed.
    pub(crate) dirty: bool,
}

impl App {
    /// Must be called from within the tokio runtime (spawns the API actor)
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClient::new(&config.api)?;
        tracing::info!(base_url = client.base_url(), "Using API");

        let retry = RetryConfig {
            max_retries: config.api.max_retries,
            ..RetryConfig::default()
        };
        let api = spawn_api_actor(client, retry, config.listing.search_limit);

        let bindings = KeyBindings::new(&config.ui.keybinding_mode);
        let state = AppState::new(
            config.listing.page_size,
            config.listing.search_debounce(),
        );

        Ok(Self {
            config,
            api,
            state,
            bindings,
            pending_export: None,
            quit_requested: false,
            dirty: true, // Start dirty for initial render
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Spawn background render thread (owns terminal setup/teardown)
        let render_thread = RenderThread::spawn()?;

        self.reload_listing();
        self.refresh_stats();

        let result = self.event_loop(&render_thread).await;

        render_thread.shutdown();
        self.api.send(ApiCommand::Shutdown).ok();

        result
    }

    /// Queue a remote call. A full or closed channel is reported inline and
    /// the flags the command set are rolled back.
    pub(crate) fn dispatch(&mut self, cmd: ApiCommand) -> bool {
        let Err(cmd) = self.api.send(cmd) else {
            return true;
        };
        self.state.abandon(&cmd);
        if matches!(cmd, ApiCommand::ListIgnore) {
            self.pending_export = None;
        }
        self.state.set_error("Request queue unavailable");
        false
    }

    /// Anything in flight or pending that should keep the UI animating
    pub(crate) fn is_busy(&self) -> bool {
        let state = &self.state;
        state.listing.is_loading()
            || state.search.is_loading()
            || state.search.next_deadline().is_some()
            || state.detail.messages_loading()
            || state.detail.analysis_loading()
            || state.ignore.is_loading()
            || state.ignore.is_busy()
    }
}
