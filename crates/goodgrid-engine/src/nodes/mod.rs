//! Built-in overlay nodes.
//!
//! Kinds with fixed lines expose one [`LineProps`] per line; kinds that draw one
//! line per host object expose a hook list instead, run in ascending priority for
//! every emitted line.

mod audio_line;
mod bounds;
mod bpm_triggers;
mod duration_lines;
mod effect_lines;
mod grid;
mod ground;
mod guide_objects;
mod guidelines;
mod position_lines;
mod preview_lock_line;

use crate::api::NodeRegistry;
use crate::node::LineStyle;
use crate::paint::LineColor;
use crate::priority::Prioritized;

pub use audio_line::{AudioLine, AudioLineCtx, AudioLineHook};
pub use bounds::Bounds;
pub use bpm_triggers::{BeatCtx, BeatHook, BpmTriggers};
pub use duration_lines::{DurationLineCtx, DurationLineHook, DurationLines};
pub use effect_lines::{EffectLineCtx, EffectLineHook, EffectLines};
pub use grid::{grid_index_range, Grid};
pub use ground::Ground;
pub use guide_objects::{GuideObjectCtx, GuideObjectHook, GuideObjects, GuideOverride};
pub use guidelines::{GuidelineCtx, GuidelineHook, Guidelines};
pub use position_lines::{crosshair_position, PositionLines};
pub use preview_lock_line::PreviewLockLine;

/// Registers the default nodes in draw order.
pub(crate) fn register_builtin(registry: &mut NodeRegistry) {
    registry.add("grid", Grid::new());
    registry.add("bounds", Bounds::new());
    registry.add("ground", Ground::new());
    registry.add("guide-objects", GuideObjects::new());
    registry.add("preview-lock-line", PreviewLockLine::new());
    registry.add("effect-lines", EffectLines::new());
    registry.add("duration-lines", DurationLines::new());
    registry.add("guidelines", Guidelines::new());
    registry.add("bpm-triggers", BpmTriggers::new());
    registry.add("audio-line", AudioLine::new());
    registry.add("position-lines", PositionLines::new());
}

/// Color and width of one fixed line, each owned by the highest-priority caller.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineProps {
    color: Prioritized<LineColor>,
    width: Prioritized<f32>,
}

impl LineProps {
    #[inline]
    pub const fn new(color: LineColor, width: f32) -> Self {
        Self {
            color: Prioritized::new(color),
            width: Prioritized::new(width),
        }
    }

    /// Returns `true` when the color was replaced.
    #[inline]
    pub fn set_color(&mut self, color: impl Into<LineColor>, priority: i32) -> bool {
        self.color.set(color.into(), priority)
    }

    #[inline]
    pub fn color(&self) -> LineColor {
        self.color.get()
    }

    #[inline]
    pub fn color_priority(&self) -> i32 {
        self.color.priority()
    }

    /// Returns `true` when the width was replaced.
    #[inline]
    pub fn set_width(&mut self, width: f32, priority: i32) -> bool {
        self.width.set(width, priority)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width.get()
    }

    #[inline]
    pub fn width_priority(&self) -> i32 {
        self.width.priority()
    }

    #[inline]
    pub fn style(&self) -> LineStyle {
        LineStyle::new(self.color(), self.width())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for node tests.

    use crate::api::recorder::{Call, RecordingBackend};
    use crate::api::{DrawGrid, FrameOutcome};
    use crate::config::DrawGridConfig;
    use crate::coords::{Vec2, Viewport};
    use crate::host::{BlendMode, Camera, ConstantSpeedTimeline, EditorSnapshot, Timeline, Topology};
    use crate::node::DrawNode;
    use crate::paint::Rgba8;

    /// One submitted line, with the state it was drawn under.
    #[derive(Debug, Copy, Clone, PartialEq)]
    pub struct Line {
        pub a: Vec2,
        pub b: Vec2,
        pub color_a: Rgba8,
        pub color_b: Rgba8,
        pub width: f32,
        pub blend: BlendMode,
    }

    /// 400x400 window centered on `center` at zoom 1.
    pub fn editor_at(center: Vec2) -> EditorSnapshot {
        EditorSnapshot {
            window: Viewport::new(400.0, 400.0),
            camera: Camera { layer_position: -center, zoom: 1.0, angle_degrees: 0.0 },
            ..Default::default()
        }
    }

    pub fn timeline() -> ConstantSpeedTimeline {
        ConstantSpeedTimeline::new(311.58)
    }

    /// Engine holding only `node`, initialized for `editor`.
    pub fn grid_with<T: DrawNode>(node: T, editor: &EditorSnapshot) -> DrawGrid {
        let mut grid = DrawGrid::empty(DrawGridConfig::default());
        grid.add_node("under-test", node);
        grid.init(editor);
        grid
    }

    /// Draws one frame and returns every submitted line.
    pub fn frame(grid: &mut DrawGrid, editor: &EditorSnapshot, timeline: &dyn Timeline) -> Vec<Line> {
        let mut backend = RecordingBackend::default();
        let outcome = grid.draw(editor, timeline, &mut backend);
        assert!(matches!(outcome, FrameOutcome::Drawn(_)), "frame not drawn: {outcome:?}");

        let mut lines = Vec::new();
        let mut batches = backend.vertices.iter();
        let (mut blend, mut width) = (BlendMode::Alpha, 0.0);
        for call in &backend.calls {
            match *call {
                Call::Blend(b) => blend = b,
                Call::LineWidth(w) => width = w,
                Call::Smoothing(_) => {}
                Call::Submit(topology, _) => {
                    let Some(batch) = batches.next() else { break };
                    if topology != Topology::Lines {
                        continue;
                    }
                    lines.extend(batch.chunks_exact(2).map(|p| Line {
                        a: p[0].pos(),
                        b: p[1].pos(),
                        color_a: p[0].color,
                        color_b: p[1].color,
                        width,
                        blend,
                    }));
                }
            }
        }
        lines
    }

    /// X of every vertical line, in submission order.
    pub fn vertical_xs(lines: &[Line]) -> Vec<f32> {
        lines.iter().filter(|l| l.a.x == l.b.x && l.a.y != l.b.y).map(|l| l.a.x).collect()
    }

    /// Y of every horizontal line, in submission order.
    pub fn horizontal_ys(lines: &[Line]) -> Vec<f32> {
        lines.iter().filter(|l| l.a.y == l.b.y && l.a.x != l.b.x).map(|l| l.a.y).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Rgba8;

    #[test]
    fn builtin_registration_order() {
        let mut reg = NodeRegistry::new();
        register_builtin(&mut reg);
        let ids: Vec<&str> = reg.iter().map(|n| n.id()).collect();
        assert_eq!(
            ids,
            [
                "grid",
                "bounds",
                "ground",
                "guide-objects",
                "preview-lock-line",
                "effect-lines",
                "duration-lines",
                "guidelines",
                "bpm-triggers",
                "audio-line",
                "position-lines",
            ]
        );
        assert!(reg.iter().all(|n| n.is_enabled() && n.z_order() == 0));
    }

    #[test]
    fn line_props_follow_priority_rule() {
        let mut props = LineProps::new(LineColor::rgba(0, 0, 0, 150), 1.0);
        assert!(props.set_color(Rgba8::white(), 2));
        assert!(!props.set_color(Rgba8::new(1, 1, 1, 1), 1));
        assert_eq!(props.color(), LineColor::solid(Rgba8::white()));
        assert_eq!(props.color_priority(), 2);

        assert!(props.set_width(3.0, 0));
        assert_eq!(props.style().width, 3.0);
    }
}
