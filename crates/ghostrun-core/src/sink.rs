//! Write-only sinks for presentation hints and audio/VFX cues.
//!
//! The simulation forwards each tick's [`Frame`](crate::output::Frame)
//! contents to the installed sinks after the Animation phase. Sinks never
//! feed anything back into the core.
//!
//! # Example
//!
//! ```
//! use ghostrun_core::sink::{AudioSink, RecordingSink};
//! use ghostrun_core::output::Cue;
//!
//! let sink = RecordingSink::new();
//! let mut audio = sink.clone();
//! audio.cue(1, &Cue::Explosion { position: glam::Vec2::ZERO });
//!
//! assert_eq!(sink.cue_count(), 1);
//! assert_eq!(sink.take_cues().len(), 1);
//! assert_eq!(sink.cue_count(), 0);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::output::{Cue, Presentation};

/// Receives animation tags and damage feedback hints.
pub trait PresentationSink: Send {
    /// Called once per hint, in frame order.
    fn present(&mut self, tick: u64, hint: &Presentation);
}

/// Receives fire-and-forget cues.
pub trait AudioSink: Send {
    /// Called once per cue, in frame order.
    fn cue(&mut self, tick: u64, cue: &Cue);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn present(&mut self, _tick: u64, _hint: &Presentation) {}
}

impl AudioSink for NullSink {
    fn cue(&mut self, _tick: u64, _cue: &Cue) {}
}

#[derive(Debug, Default)]
struct Recorded {
    presentations: Vec<(u64, Presentation)>,
    cues: Vec<(u64, Cue)>,
}

/// Keeps everything it receives. Clones share one log, so a test can hand
/// one clone to the simulation and inspect another.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<Recorded>>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Recorded> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drains recorded presentation hints.
    #[must_use]
    pub fn take_presentations(&self) -> Vec<(u64, Presentation)> {
        std::mem::take(&mut self.log().presentations)
    }

    /// Drains recorded cues.
    #[must_use]
    pub fn take_cues(&self) -> Vec<(u64, Cue)> {
        std::mem::take(&mut self.log().cues)
    }

    /// Number of recorded presentation hints.
    #[must_use]
    pub fn presentation_count(&self) -> usize {
        self.log().presentations.len()
    }

    /// Number of recorded cues.
    #[must_use]
    pub fn cue_count(&self) -> usize {
        self.log().cues.len()
    }

    /// Drops everything recorded so far.
    pub fn clear(&self) {
        let mut log = self.log();
        log.presentations.clear();
        log.cues.clear();
    }
}

impl PresentationSink for RecordingSink {
    fn present(&mut self, tick: u64, hint: &Presentation) {
        self.log().presentations.push((tick, *hint));
    }
}

impl AudioSink for RecordingSink {
    fn cue(&mut self, tick: u64, cue: &Cue) {
        self.log().cues.push((tick, *cue));
    }
}
