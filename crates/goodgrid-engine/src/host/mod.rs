//! Host-facing interfaces.
//!
//! The engine never reaches into the host editor. Instead the host hands it:
//! - an [`EditorSnapshot`] per frame (camera, playback flags, object state)
//! - a [`Timeline`] for time ↔ position conversion
//! - a [`DrawBackend`] that turns vertex batches into real draw calls

mod backend;
mod objects;
mod snapshot;
mod timeline;

pub use backend::{BlendMode, DrawBackend, Topology};
pub use objects::{
    AudioGuide, DurationTrigger, EffectTrigger, ObjectFlags, ObjectKind, ObjectState, Speed,
    TriggerDuration,
};
pub use snapshot::{AudioPlayback, Camera, EditorSnapshot, PlaybackMode, SpeedTable};
pub use timeline::{ConstantSpeedTimeline, PosSample, TimeSample, Timeline};
