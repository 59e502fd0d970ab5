use crate::coords::Vec2;

/// Result of mapping a position to level time.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct TimeSample {
    pub time: f32,
    /// Gameplay runs vertically at this point.
    pub rotated: bool,
}

/// Result of mapping level time to a position.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct PosSample {
    pub position: Vec2,
    /// Gameplay runs vertically at this point.
    pub rotated: bool,
}

/// Time ↔ position conversion supplied by the host.
///
/// Implementations are pure functions of their arguments and of the level state
/// they were built from (speed changes, start speed, platformer mode). Rotation is
/// reported in the result rather than through shared state.
pub trait Timeline {
    fn time_for_pos(&self, position: Vec2, ord: i32, channel: i32) -> TimeSample;

    fn pos_for_time(&self, time: f32, rotate_channel: i32) -> PosSample;
}

/// A level with a single speed and no rotation: `x = time * speed`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ConstantSpeedTimeline {
    pub speed: f32,
}

impl ConstantSpeedTimeline {
    #[inline]
    pub const fn new(speed: f32) -> Self {
        Self { speed }
    }
}

impl Timeline for ConstantSpeedTimeline {
    fn time_for_pos(&self, position: Vec2, _ord: i32, _channel: i32) -> TimeSample {
        TimeSample { time: position.x / self.speed, rotated: false }
    }

    fn pos_for_time(&self, time: f32, _rotate_channel: i32) -> PosSample {
        PosSample { position: Vec2::new(time * self.speed, 0.0), rotated: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_speed_round_trips_x() {
        let tl = ConstantSpeedTimeline::new(300.0);
        let t = tl.time_for_pos(Vec2::new(600.0, 45.0), 0, 0);
        assert_eq!(t.time, 2.0);
        assert_eq!(tl.pos_for_time(t.time, 0).position.x, 600.0);
    }
}
