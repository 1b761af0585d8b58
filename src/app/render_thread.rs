//! Terminal drawing on a dedicated OS thread.
//!
//! The event loop hands over cloned `AppState` snapshots. A slow draw never
//! delays API event handling or key input.

use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::state::AppState;

type Term = Terminal<CrosstermBackend<Stdout>>;

enum Frame {
    Draw(Box<AppState>),
    Stop,
}

pub struct RenderThread {
    /// Holds at most one undrawn snapshot
    frames: SyncSender<Frame>,
    handle: Option<JoinHandle<()>>,
}

impl RenderThread {
    /// Start the thread. Raw mode and the alternate screen belong to it.
    pub fn spawn() -> io::Result<Self> {
        let (frames, rx) = mpsc::sync_channel::<Frame>(1);

        let handle = thread::Builder::new()
            .name("pastlead-render".to_string())
            .spawn(move || match open_terminal() {
                Ok(mut terminal) => {
                    draw_loop(&mut terminal, rx);
                    close_terminal(&mut terminal);
                }
                Err(e) => tracing::error!("Terminal setup failed: {}", e),
            })?;

        Ok(Self {
            frames,
            handle: Some(handle),
        })
    }

    /// Offer a snapshot without blocking.
    ///
    /// `false` means the previous frame is still pending and this one was
    /// discarded; the caller stays dirty and offers again later.
    pub fn render(&self, state: AppState) -> bool {
        match self.frames.try_send(Frame::Draw(Box::new(state))) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::trace!("Frame still pending, retrying next tick");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::error!("Render thread is gone");
                true
            }
        }
    }

    /// Stop drawing, restore the terminal and join the thread
    pub fn shutdown(mut self) {
        self.frames.send(Frame::Stop).ok();
        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}

fn open_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(e);
    }
    Terminal::new(CrosstermBackend::new(stdout)).inspect_err(|_| {
        disable_raw_mode().ok();
    })
}

fn draw_loop(terminal: &mut Term, rx: Receiver<Frame>) {
    while let Ok(Frame::Draw(state)) = rx.recv() {
        if let Err(e) = terminal.draw(|f| crate::ui::render(f, &state)) {
            tracing::error!("Draw failed: {}", e);
        }
    }
}

fn close_terminal(terminal: &mut Term) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
}
