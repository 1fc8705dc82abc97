//! Playback status: transport intent, engine confirmations, progress timing

use std::time::Instant;

use crate::engine::{DEFAULT_VOLUME_PERCENT, EngineState};
use super::track::Track;

/// How close to the end of the last queued track the approaching-end notice
/// fires, in seconds.
pub const PREFETCH_WINDOW_SECS: f64 = 15.0;

/// User-facing transport state. Updated optimistically on every transport
/// command; "loading" is `Playing` with `buffering == true`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Idle,
    Playing,
    Paused,
    Ended,
}

/// Timing state for smooth progress display. Engine progress arrives at
/// roughly one-second granularity; between reports the position is
/// extrapolated from a monotonic clock while playback is running, so
/// consumers must treat it as approximate.
#[derive(Clone, Debug)]
pub struct ProgressTiming {
    position_secs: f64,
    duration_secs: f64,
    running: bool,
    last_update: Instant,
}

impl Default for ProgressTiming {
    fn default() -> Self {
        Self {
            position_secs: 0.0,
            duration_secs: 0.0,
            running: false,
            last_update: Instant::now(),
        }
    }
}

impl ProgressTiming {
    pub fn current_position_secs(&self) -> f64 {
        let pos = if self.running {
            self.position_secs + self.last_update.elapsed().as_secs_f64()
        } else {
            self.position_secs
        };
        if self.duration_secs > 0.0 {
            pos.min(self.duration_secs)
        } else {
            pos
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn update_position(&mut self, position_secs: f64, running: bool) {
        self.position_secs = position_secs.max(0.0);
        self.running = running;
        self.last_update = Instant::now();
    }

    fn set_running(&mut self, running: bool) {
        self.position_secs = self.current_position_secs();
        self.running = running;
        self.last_update = Instant::now();
    }

    fn reset(&mut self, duration_secs: f64) {
        self.position_secs = 0.0;
        self.duration_secs = duration_secs;
        self.running = false;
        self.last_update = Instant::now();
    }
}

/// Derived playback state. The split between `intended` (what the user
/// asked for, asserted immediately) and `confirmed` (what the engine last
/// reported) is deliberate: engine commands are fire-and-forget, so the two
/// can briefly disagree while a command is in flight.
#[derive(Clone, Debug)]
pub struct PlaybackStatus {
    pub intended: PlayState,
    pub confirmed: EngineState,
    pub buffering: bool,
    pub volume: u8,
    timing: ProgressTiming,
    prefetch_armed: bool,
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        Self {
            intended: PlayState::Idle,
            confirmed: EngineState::Unstarted,
            buffering: false,
            volume: DEFAULT_VOLUME_PERCENT,
            timing: ProgressTiming::default(),
            prefetch_armed: false,
        }
    }
}

impl PlaybackStatus {
    pub fn is_playing(&self) -> bool {
        self.intended == PlayState::Playing
    }

    pub fn progress_secs(&self) -> f64 {
        self.timing.current_position_secs()
    }

    pub fn duration_secs(&self) -> f64 {
        self.timing.duration_secs()
    }

    /// A new track was selected: optimistic play intent, buffering until the
    /// engine reports otherwise, prefetch re-armed.
    pub fn begin_track(&mut self, track: &Track) {
        self.intended = PlayState::Playing;
        self.buffering = true;
        self.prefetch_armed = true;
        self.timing.reset(track.duration_secs().unwrap_or(0.0));
    }

    /// Flip between playing and paused, returning the new intent.
    pub fn toggle(&mut self) -> PlayState {
        self.intended = if self.intended == PlayState::Playing {
            PlayState::Paused
        } else {
            PlayState::Playing
        };
        self.timing.set_running(self.intended == PlayState::Playing);
        self.intended
    }

    /// Record an engine state confirmation.
    pub fn confirm(&mut self, state: EngineState) {
        self.confirmed = state;
        match state {
            EngineState::Playing => {
                self.buffering = false;
                self.intended = PlayState::Playing;
                self.timing.set_running(true);
            }
            EngineState::Paused => {
                self.buffering = false;
                // Only reconcile intent when we were not mid-command; an
                // in-flight Play may still be confirmed after this event.
                if self.intended != PlayState::Playing {
                    self.intended = PlayState::Paused;
                }
                self.timing.set_running(false);
            }
            EngineState::Buffering => {
                self.buffering = true;
            }
            EngineState::Cued | EngineState::Unstarted | EngineState::Ended => {}
        }
    }

    /// Engine reported a duration we did not know up front.
    pub fn learn_duration(&mut self, duration_secs: f64) {
        if self.timing.duration_secs <= 0.0 && duration_secs > 0.0 {
            self.timing.duration_secs = duration_secs;
        }
    }

    pub fn update_progress(&mut self, played_secs: f64) {
        self.timing.update_position(played_secs, self.is_playing());
    }

    /// Optimistic position update issued alongside a seek command.
    pub fn seek_to(&mut self, seconds: f64) {
        let clamped = if self.timing.duration_secs > 0.0 {
            seconds.clamp(0.0, self.timing.duration_secs)
        } else {
            seconds.max(0.0)
        };
        self.timing.update_position(clamped, self.is_playing());
    }

    /// Seconds left in the current track, when the duration is known.
    pub fn remaining_secs(&self) -> Option<f64> {
        let duration = self.timing.duration_secs();
        if duration > 0.0 {
            Some(duration - self.timing.current_position_secs())
        } else {
            None
        }
    }

    /// Consume the one prefetch shot for the current track. Returns whether
    /// it was still armed.
    pub fn disarm_prefetch(&mut self) -> bool {
        std::mem::replace(&mut self.prefetch_armed, false)
    }

    pub fn mark_ended(&mut self) {
        self.intended = PlayState::Ended;
        self.buffering = false;
        let duration = self.timing.duration_secs();
        self.timing.update_position(duration, false);
    }

    /// Engine-reported playback error: stop local flags, nothing else.
    pub fn mark_engine_error(&mut self) {
        self.intended = PlayState::Paused;
        self.buffering = false;
        self.timing.set_running(false);
    }
}

/// Everything the transport bar needs for one render pass.
#[derive(Clone, Debug)]
pub struct PlaybackSnapshot {
    pub track: Option<Track>,
    pub is_playing: bool,
    pub buffering: bool,
    pub progress_secs: f64,
    pub duration_secs: f64,
    pub volume: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track::TrackKind;

    fn audio_track(duration_secs: f64) -> Track {
        Track {
            id: "t1".to_string(),
            title: "Title".to_string(),
            artist: "Artist".to_string(),
            cover: String::new(),
            source: "https://media.example/t1".to_string(),
            kind: TrackKind::Audio { duration_secs },
        }
    }

    #[test]
    fn begin_track_sets_optimistic_state() {
        let mut status = PlaybackStatus::default();
        status.begin_track(&audio_track(200.0));
        assert_eq!(status.intended, PlayState::Playing);
        assert!(status.buffering);
        assert_eq!(status.duration_secs(), 200.0);
        assert!(status.disarm_prefetch());
        assert!(!status.disarm_prefetch());
    }

    #[test]
    fn toggle_flips_and_restores() {
        let mut status = PlaybackStatus::default();
        status.begin_track(&audio_track(200.0));
        assert_eq!(status.toggle(), PlayState::Paused);
        assert_eq!(status.toggle(), PlayState::Playing);
        assert!(status.is_playing());
    }

    #[test]
    fn playing_confirmation_clears_buffering() {
        let mut status = PlaybackStatus::default();
        status.begin_track(&audio_track(200.0));
        status.confirm(EngineState::Playing);
        assert!(!status.buffering);
        assert_eq!(status.confirmed, EngineState::Playing);
        assert!(status.is_playing());
    }

    #[test]
    fn paused_confirmation_does_not_override_play_intent() {
        let mut status = PlaybackStatus::default();
        status.begin_track(&audio_track(200.0));
        // Stale Paused confirmation arriving while a Play is in flight.
        status.confirm(EngineState::Paused);
        assert!(status.is_playing());
        assert_eq!(status.confirmed, EngineState::Paused);
    }

    #[test]
    fn remaining_needs_a_known_duration() {
        let mut status = PlaybackStatus::default();
        status.begin_track(&audio_track(0.0));
        assert!(status.remaining_secs().is_none());
        status.learn_duration(120.0);
        status.update_progress(110.0);
        let remaining = status.remaining_secs().unwrap();
        assert!(remaining > 9.0 && remaining <= 10.0);
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut status = PlaybackStatus::default();
        status.begin_track(&audio_track(100.0));
        status.seek_to(500.0);
        assert_eq!(status.progress_secs(), 100.0);
        status.seek_to(-3.0);
        assert_eq!(status.progress_secs(), 0.0);
    }

    #[test]
    fn engine_error_stops_flags() {
        let mut status = PlaybackStatus::default();
        status.begin_track(&audio_track(100.0));
        status.mark_engine_error();
        assert!(!status.is_playing());
        assert!(!status.buffering);
    }
}
