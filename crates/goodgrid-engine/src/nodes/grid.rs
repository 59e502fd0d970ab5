use std::ops::RangeInclusive;

use crate::api::{DrawCtx, GROUND_OFFSET};
use crate::coords::{Region, Vec2};
use crate::host::{BlendMode, PlaybackMode};
use crate::impl_node_base;
use crate::node::{DrawNode, NodeBase};
use crate::paint::LineColor;

use super::LineProps;

/// The editor grid: one line per cell edge inside the visible region.
#[derive(Debug, Clone)]
pub struct Grid {
    base: NodeBase,
    lines: LineProps,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub const DEFAULT_COLOR: LineColor = LineColor::rgba(0, 0, 0, 150);

    pub fn new() -> Self {
        Self {
            base: NodeBase::new(),
            lines: LineProps::new(Self::DEFAULT_COLOR, 1.0),
        }
    }

    #[inline]
    pub fn lines(&self) -> &LineProps {
        &self.lines
    }

    #[inline]
    pub fn lines_mut(&mut self) -> &mut LineProps {
        &mut self.lines
    }
}

/// Cell indices whose edges may fall in `[min, max]`, one cell of slack on each
/// side, clamped to `[lo, hi]`.
pub fn grid_index_range(min: f32, max: f32, cell: f32, lo: f32, hi: f32) -> RangeInclusive<i32> {
    let start = (min - cell).max(lo);
    let end = (max + cell).min(hi);
    ((start / cell).floor() as i32)..=((end / cell).ceil() as i32)
}

impl DrawNode for Grid {
    impl_node_base!();

    fn draw(&mut self, cx: &mut DrawCtx<'_>, region: Region) {
        let editor = cx.editor();
        if !editor.show_grid
            || (editor.hide_grid_on_play && editor.playback_mode == PlaybackMode::Playing)
        {
            return;
        }

        let cell = editor.grid_size;
        if cell <= 0.0 {
            return;
        }
        let bounds = cx.grid_bounds();
        let style = self.lines.style();

        for i in grid_index_range(region.min_x, region.max_x, cell, bounds.min.x, bounds.max.x) {
            let x = i as f32 * cell;
            if !region.contains_x(x) {
                continue;
            }
            cx.draw_line(
                Vec2::new(x, region.min_y),
                Vec2::new(x, region.max_y),
                style.color,
                style.width,
                BlendMode::Alpha,
            );
        }

        let top = cx.level_height() + GROUND_OFFSET;
        for i in grid_index_range(region.min_y, region.max_y, cell, bounds.min.y, top) {
            let y = i as f32 * cell;
            if !region.contains_y(y) {
                continue;
            }
            cx.draw_line(
                Vec2::new(region.min_x, y),
                Vec2::new(region.max_x, y),
                style.color,
                style.width,
                BlendMode::Alpha,
            );
        }
    }
}
