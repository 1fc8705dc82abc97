//! Playback engine capability boundary.
//!
//! The actual media engine is an embedded, remote-controllable player that
//! this process only talks to through an out-of-band message channel:
//! commands go out fire-and-forget, state and progress notifications come
//! back asynchronously. Nothing here blocks on an acknowledgement.
//!
//! [`ClockEngine`] is the in-process stand-in used when no real embedded
//! player is attached: it confirms commands and ticks progress once per
//! second, which matches the timer-approximated progress the rest of the
//! system is built around.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::model::Track;

pub const DEFAULT_VOLUME_PERCENT: u8 = 80;

/// Outbound remote-control commands.
#[derive(Clone, Debug)]
pub enum EngineCommand {
    /// Cue a media source. Playback starts on the following `Play`.
    Load { track: Track },
    Play,
    Pause,
    SeekTo { seconds: f64 },
    SetVolume { percent: u8 },
}

/// States the engine reports for its current media item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EngineState {
    #[default]
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

/// Inbound notifications from the engine.
#[derive(Clone, Debug)]
pub enum EngineEvent {
    StateChanged { state: EngineState },
    /// Periodic position report. `duration_seconds` is `0.0` until the
    /// engine knows the media length.
    Progress { played_seconds: f64, duration_seconds: f64 },
    TrackError { message: String },
}

pub type EngineEventChannel = mpsc::UnboundedReceiver<EngineEvent>;

/// Cheap-to-clone sender half of the command channel.
#[derive(Clone)]
pub struct EngineHandle {
    commands: mpsc::UnboundedSender<EngineCommand>,
}

impl EngineHandle {
    /// Build a handle plus the receiver the engine side drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<EngineCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { commands: tx }, rx)
    }

    /// Fire-and-forget send. A closed channel means the engine is gone;
    /// that is logged and otherwise absorbed.
    pub fn send(&self, command: EngineCommand) {
        tracing::trace!(command = ?command, "engine command");
        if self.commands.send(command).is_err() {
            tracing::warn!("Engine command channel closed, command dropped");
        }
    }
}

/// Local simulation of the embedded player. Confirms load/play/pause/seek
/// immediately and advances a one-second progress clock while playing,
/// emitting `Ended` once the known duration is reached. Live feeds never
/// end and ignore seeks.
pub struct ClockEngine {
    commands: mpsc::UnboundedReceiver<EngineCommand>,
    events: mpsc::UnboundedSender<EngineEvent>,
    current: Option<Track>,
    position_secs: f64,
    playing: bool,
}

impl ClockEngine {
    /// Wire up a simulated engine. Returns the control handle and the event
    /// channel the controller listens on.
    pub fn spawn() -> (EngineHandle, EngineEventChannel) {
        let (handle, command_rx) = EngineHandle::channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let engine = ClockEngine {
            commands: command_rx,
            events: event_tx,
            current: None,
            position_secs: 0.0,
            playing: false,
        };
        tokio::spawn(engine.run());

        (handle, event_rx)
    }

    async fn run(mut self) {
        tracing::info!("Clock engine started");
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        None => {
                            tracing::info!("Clock engine shutting down");
                            break;
                        }
                    }
                }
                _ = ticker.tick() => self.tick(),
            }
        }
    }

    fn handle_command(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::Load { track } => {
                tracing::debug!(track_id = %track.id, "engine: load");
                self.current = Some(track);
                self.position_secs = 0.0;
                self.playing = false;
                self.emit(EngineEvent::StateChanged { state: EngineState::Buffering });
                self.emit(EngineEvent::StateChanged { state: EngineState::Cued });
            }
            EngineCommand::Play => {
                if self.current.is_some() {
                    self.playing = true;
                    self.emit(EngineEvent::StateChanged { state: EngineState::Playing });
                }
            }
            EngineCommand::Pause => {
                self.playing = false;
                self.emit(EngineEvent::StateChanged { state: EngineState::Paused });
            }
            EngineCommand::SeekTo { seconds } => {
                let seekable = self.current.as_ref().is_some_and(|t| t.is_seekable());
                if seekable {
                    self.position_secs = seconds.max(0.0);
                    self.emit(EngineEvent::Progress {
                        played_seconds: self.position_secs,
                        duration_seconds: self.current_duration(),
                    });
                }
            }
            EngineCommand::SetVolume { percent } => {
                tracing::trace!(percent, "engine: volume");
            }
        }
    }

    fn tick(&mut self) {
        if !self.playing {
            return;
        }
        let Some(track) = &self.current else { return };

        self.position_secs += 1.0;
        self.emit(EngineEvent::Progress {
            played_seconds: self.position_secs,
            duration_seconds: self.current_duration(),
        });

        if let Some(duration) = track.duration_secs()
            && self.position_secs >= duration
        {
            tracing::debug!(track_id = %track.id, "engine: end of track");
            self.playing = false;
            self.emit(EngineEvent::StateChanged { state: EngineState::Ended });
        }
    }

    fn current_duration(&self) -> f64 {
        self.current
            .as_ref()
            .and_then(|t| t.duration_secs())
            .unwrap_or(0.0)
    }

    fn emit(&self, event: EngineEvent) {
        // The listener hanging up is a normal shutdown path.
        let _ = self.events.send(event);
    }
}
