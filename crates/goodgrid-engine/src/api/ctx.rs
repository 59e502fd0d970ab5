use crate::coords::{Rect, Vec2};
use crate::host::{BlendMode, EditorSnapshot, ObjectFlags, ObjectState, Timeline};
use crate::paint::{LineColor, Rgba8};

use super::batch::Batcher;
use super::markers::TimeMarkers;
use super::MAX_HEIGHT;

/// Rectangle the grid (and the visible region) is clamped to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridBounds {
    pub min: Vec2,
    pub max: Vec2,
}

/// Engine state nodes may read while drawing.
#[derive(Debug, Clone)]
pub(crate) struct GridState {
    pub bounds: GridBounds,
    pub hide_invisible: bool,
    pub markers: TimeMarkers,
}

/// Whether an object is drawn: hidden objects are skipped unless selected.
///
/// An object is hidden when it is group-disabled, invisible, or has its own hide
/// toggle set while hide-invisible mode is on.
#[inline]
pub fn object_visible(flags: ObjectFlags, hide_invisible: bool) -> bool {
    let hidden = (flags.hidden && hide_invisible) || flags.group_disabled || flags.invisible;
    !hidden || flags.selected
}

/// Per-frame drawing context handed to [`DrawNode::draw`](crate::node::DrawNode::draw).
///
/// Emission only buffers; draw calls are issued by the engine after every node ran.
pub struct DrawCtx<'a> {
    batch: &'a mut Batcher,
    state: &'a GridState,
    editor: &'a EditorSnapshot,
    timeline: &'a dyn Timeline,
}

impl<'a> DrawCtx<'a> {
    pub(crate) fn new(
        batch: &'a mut Batcher,
        state: &'a GridState,
        editor: &'a EditorSnapshot,
        timeline: &'a dyn Timeline,
    ) -> Self {
        Self { batch, state, editor, timeline }
    }

    // ── host state ────────────────────────────────────────────────────────

    #[inline]
    pub fn editor(&self) -> &'a EditorSnapshot {
        self.editor
    }

    #[inline]
    pub fn timeline(&self) -> &'a dyn Timeline {
        self.timeline
    }

    #[inline]
    pub fn grid_bounds(&self) -> GridBounds {
        self.state.bounds
    }

    /// Top of the level: the grid bound for dynamic-height levels, the fixed
    /// maximum otherwise.
    #[inline]
    pub fn level_height(&self) -> f32 {
        if self.editor.dynamic_level_height {
            self.state.bounds.max.y
        } else {
            MAX_HEIGHT
        }
    }

    #[inline]
    pub fn time_markers(&self) -> &'a TimeMarkers {
        &self.state.markers
    }

    #[inline]
    pub fn is_object_visible(&self, object: &ObjectState) -> bool {
        object_visible(object.flags, self.state.hide_invisible)
    }

    // ── emission ──────────────────────────────────────────────────────────

    #[inline]
    pub fn draw_line(&mut self, a: Vec2, b: Vec2, color: LineColor, width: f32, blend: BlendMode) {
        self.batch.push_line(a, b, color, width, blend);
    }

    #[inline]
    pub fn draw_rect(&mut self, rect: Rect, color: Rgba8, blend: BlendMode) {
        self.batch.push_rect(rect, color, blend);
    }

    #[inline]
    pub fn draw_rect_outline(&mut self, rect: Rect, color: Rgba8, width: f32, blend: BlendMode) {
        self.batch.push_rect_outline(rect, color, width, blend);
    }
}
