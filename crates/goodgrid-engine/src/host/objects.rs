//! Read-only object state the host copies into each snapshot.

use crate::coords::Vec2;

/// Gameplay kind of an object, as far as the overlay cares.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ObjectKind {
    #[default]
    Other,
    CubePortal,
    ShipPortal,
    BallPortal,
    UfoPortal,
    WavePortal,
    RobotPortal,
    SpiderPortal,
    SwingPortal,
}

/// Editor visibility state of an object.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct ObjectFlags {
    /// The object's own "hide" toggle; only honoured in hide-invisible mode.
    pub hidden: bool,
    pub group_disabled: bool,
    pub invisible: bool,
    pub selected: bool,
}

/// Common state of every object in a snapshot.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ObjectState {
    /// Stable identity across frames; keys per-object caches.
    pub uid: u64,
    pub position: Vec2,
    pub kind: ObjectKind,
    pub flags: ObjectFlags,
}

impl ObjectState {
    #[inline]
    pub fn new(uid: u64, position: Vec2) -> Self {
        Self { uid, position, ..Default::default() }
    }

    #[inline]
    pub fn with_kind(mut self, kind: ObjectKind) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    pub fn with_flags(mut self, flags: ObjectFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// A trigger drawn by the effect-lines node.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct EffectTrigger {
    pub object: ObjectState,
    pub spawn_triggered: bool,
    pub touch_triggered: bool,
}

/// How long a trigger runs, in seconds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TriggerDuration {
    Plain(f32),
    /// Pulse triggers run for fade-in + hold + fade-out.
    Pulse { fade_in: f32, hold: f32, fade_out: f32 },
    /// Sound-effect triggers run for the length of their sound.
    Sound(f32),
}

impl TriggerDuration {
    pub fn total(self) -> f32 {
        match self {
            TriggerDuration::Plain(t) | TriggerDuration::Sound(t) => t,
            TriggerDuration::Pulse { fade_in, hold, fade_out } => fade_in + hold + fade_out,
        }
    }
}

impl Default for TriggerDuration {
    fn default() -> Self {
        TriggerDuration::Plain(0.0)
    }
}

/// A trigger with a duration line.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct DurationTrigger {
    pub object: ObjectState,
    pub duration: TriggerDuration,
    pub spawn_triggered: bool,
    /// Ordering value the timeline uses to disambiguate overlapping speed changes.
    pub ord: i32,
    pub channel: i32,
}

/// Speed class of an object, mapped to units per second by [`SpeedTable`](super::SpeedTable).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
    Faster,
    Fastest,
}

/// An audio line guide: a BPM grid starting at the object.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct AudioGuide {
    pub object: ObjectState,
    pub disabled: bool,
    pub speed: Speed,
    /// Length of the guide in seconds.
    pub duration: f32,
    pub bpm: f32,
    pub beats_per_bar: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_duration_sums_phases() {
        let d = TriggerDuration::Pulse { fade_in: 0.5, hold: 1.0, fade_out: 0.25 };
        assert_eq!(d.total(), 1.75);
        assert_eq!(TriggerDuration::Sound(2.0).total(), 2.0);
    }
}
