//! Completion celebration with timed auto-dismiss.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

/// How long a celebration stays visible.
pub const CELEBRATION_WINDOW: Duration = Duration::from_millis(3000);

#[derive(Debug, Default)]
struct State {
    visible_until: Option<Instant>,
    triggered: u64,
}

/// Consumer of the completion signal.
///
/// Each [`trigger`](Self::trigger) shows the celebration until a deadline
/// one window away; a trigger while visible moves the deadline, which
/// restarts the window. No task is spawned, so triggering works with or
/// without a tokio runtime. Inside a runtime with paused time the deadline
/// follows the paused clock.
#[derive(Debug, Clone)]
pub struct Celebration {
    state: Arc<Mutex<State>>,
    window: Duration,
}

impl Celebration {
    pub fn new() -> Self {
        Self::with_window(CELEBRATION_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            window,
        }
    }

    pub fn trigger(&self) {
        let mut state = self.state.lock().expect("celebration lock poisoned");
        state.triggered += 1;
        state.visible_until = Some(Instant::now() + self.window);
        tracing::debug!("Celebration #{} shown", state.triggered);
    }

    pub fn is_visible(&self) -> bool {
        self.state
            .lock()
            .expect("celebration lock poisoned")
            .visible_until
            .is_some_and(|deadline| Instant::now() < deadline)
    }

    /// How many times the celebration has been triggered.
    pub fn times_triggered(&self) -> u64 {
        self.state.lock().expect("celebration lock poisoned").triggered
    }

    /// Hide immediately.
    pub fn dismiss(&self) {
        self.state
            .lock()
            .expect("celebration lock poisoned")
            .visible_until = None;
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}
