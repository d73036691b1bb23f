//! Audio cue boundary
//!
//! The simulation never plays sound. It reports `GameEvent`s; this module maps
//! them to named sound effects and hands those to whatever sink the host
//! provides.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Game start, restart, or take-off
    StartOrJump,
    /// Runner hit a hazard
    Crash,
    /// Score passed a multiple of 100
    Milestone,
    /// Bullet fired
    Shoot,
    /// First bullet hit on a target
    ShotHit,
    /// Second hit, target destroyed
    ShotKill,
}

impl SoundEffect {
    /// Asset file name the audio layer should play
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::StartOrJump => "start_or_jump.wav",
            SoundEffect::Crash => "crash.wav",
            SoundEffect::Milestone => "milestone.wav",
            SoundEffect::Shoot => "shoot.wav",
            SoundEffect::ShotHit => "shot_hit_1.wav",
            SoundEffect::ShotKill => "shot_hit_2.wav",
        }
    }

    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started | GameEvent::Restarted | GameEvent::Jumped => {
                Some(SoundEffect::StartOrJump)
            }
            GameEvent::Crashed => Some(SoundEffect::Crash),
            GameEvent::Milestone(_) => Some(SoundEffect::Milestone),
            GameEvent::Fired => Some(SoundEffect::Shoot),
            GameEvent::TargetDamaged(_) => Some(SoundEffect::ShotHit),
            GameEvent::TargetDestroyed(_) => Some(SoundEffect::ShotKill),
            GameEvent::NewHighScore(_) => None,
        }
    }
}

/// Something that can play sound effects
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Play the sound for every event that has one
    fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

/// Headless sink: logs each cue instead of playing it
#[derive(Debug, Default)]
pub struct LogAudio {
    muted: bool,
    played: u64,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Cues played since creation
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.played += 1;
        log::debug!("cue {:?} ({})", effect, effect.file_name());
    }
}
