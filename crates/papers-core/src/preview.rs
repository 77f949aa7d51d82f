//! Loading handshake for the embedded PDF preview frame
//!
//! A frame that has been pointed at a new document can report `load`,
//! report `error`, or say nothing at all. An optional timer races the two
//! events. Whichever signal arrives first while the frame is loading decides
//! the outcome; every later signal is ignored. Each `open` starts a new
//! attempt, and signals carrying an older attempt number are ignored too, so
//! callbacks left over from a previous document can never touch the current
//! one.

use serde::Serialize;

/// Attempt number handed out by [`PreviewState::open`]
pub type Attempt = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PreviewPhase {
    Idle,
    Loading,
    Loaded,
    Errored,
    TimedOut,
}

/// Visibility of the preview elements for a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreviewDisplay {
    pub overlay: bool,
    pub spinner: bool,
    pub frame: bool,
    /// The invoking Preview button shows its busy state
    pub button_busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    phase: PreviewPhase,
    attempt: Attempt,
    source: Option<String>,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewState {
    pub fn new() -> Self {
        Self {
            phase: PreviewPhase::Idle,
            attempt: 0,
            source: None,
        }
    }

    pub fn phase(&self) -> PreviewPhase {
        self.phase
    }

    pub fn attempt(&self) -> Attempt {
        self.attempt
    }

    /// URL the frame is currently pointed at
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Start loading `url`; returns the attempt number to tag callbacks with
    pub fn open(&mut self, url: impl Into<String>) -> Attempt {
        self.attempt += 1;
        self.phase = PreviewPhase::Loading;
        self.source = Some(url.into());
        self.attempt
    }

    /// Frame reported `load`. Returns whether this signal decided the outcome.
    pub fn loaded(&mut self, attempt: Attempt) -> bool {
        self.settle(attempt, PreviewPhase::Loaded)
    }

    /// Frame reported `error`. Returns whether this signal decided the outcome.
    pub fn failed(&mut self, attempt: Attempt) -> bool {
        self.settle(attempt, PreviewPhase::Errored)
    }

    /// Reveal timer fired. Returns whether this signal decided the outcome.
    pub fn timed_out(&mut self, attempt: Attempt) -> bool {
        self.settle(attempt, PreviewPhase::TimedOut)
    }

    /// Blank the frame and hide everything
    pub fn close(&mut self) {
        self.phase = PreviewPhase::Idle;
        self.source = None;
    }

    fn settle(&mut self, attempt: Attempt, next: PreviewPhase) -> bool {
        if self.phase != PreviewPhase::Loading || attempt != self.attempt {
            return false;
        }
        self.phase = next;
        true
    }

    pub fn display(&self) -> PreviewDisplay {
        match self.phase {
            PreviewPhase::Idle => PreviewDisplay {
                overlay: false,
                spinner: false,
                frame: false,
                button_busy: false,
            },
            PreviewPhase::Loading => PreviewDisplay {
                overlay: true,
                spinner: true,
                frame: false,
                button_busy: true,
            },
            PreviewPhase::Loaded | PreviewPhase::TimedOut => PreviewDisplay {
                overlay: true,
                spinner: false,
                frame: true,
                button_busy: false,
            },
            PreviewPhase::Errored => PreviewDisplay {
                overlay: true,
                spinner: false,
                frame: false,
                button_busy: false,
            },
        }
    }
}
