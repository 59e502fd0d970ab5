use crate::api::DrawCtx;
use crate::coords::{Region, Vec2};
use crate::host::{BlendMode, EditorSnapshot};
use crate::impl_node_base;
use crate::node::{DrawNode, NodeBase};
use crate::paint::LineColor;

use super::LineProps;

/// Crosshair marking where the editor places new objects.
#[derive(Debug, Clone)]
pub struct PositionLines {
    base: NodeBase,
    vertical: LineProps,
    horizontal: LineProps,
}

impl Default for PositionLines {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionLines {
    pub const DEFAULT_COLOR: LineColor = LineColor::rgba(0, 0, 0, 50);

    pub fn new() -> Self {
        Self {
            base: NodeBase::new(),
            vertical: LineProps::new(Self::DEFAULT_COLOR, 2.0),
            horizontal: LineProps::new(Self::DEFAULT_COLOR, 2.0),
        }
    }

    #[inline]
    pub fn vertical(&self) -> &LineProps {
        &self.vertical
    }

    #[inline]
    pub fn vertical_mut(&mut self) -> &mut LineProps {
        &mut self.vertical
    }

    #[inline]
    pub fn horizontal(&self) -> &LineProps {
        &self.horizontal
    }

    #[inline]
    pub fn horizontal_mut(&mut self) -> &mut LineProps {
        &mut self.horizontal
    }
}

/// World point of the crosshair.
///
/// The screen center raised by half the toolbar height, mapped into object space and
/// rotated by the camera angle about the mapped screen center.
pub fn crosshair_position(editor: &EditorSnapshot) -> Vec2 {
    let w = editor.window.width;
    let h = editor.window.height;
    let camera = &editor.camera;

    let pivot = camera.to_layer_space(Vec2::new(w * 0.5, h * 0.5));
    let target = camera.to_layer_space(Vec2::new(w * 0.5, (h + editor.toolbar_height) * 0.5));

    let (s, c) = (-camera.angle_radians()).sin_cos();
    let d = target - pivot;
    Vec2::new(c * d.x - s * d.y + pivot.x, s * d.x + c * d.y + pivot.y)
}

impl DrawNode for PositionLines {
    impl_node_base!();

    fn draw(&mut self, cx: &mut DrawCtx<'_>, region: Region) {
        let editor = cx.editor();
        if editor.is_playing() {
            return;
        }

        let p = crosshair_position(editor);
        if region.contains_x(p.x) {
            let s = self.vertical.style();
            cx.draw_line(
                Vec2::new(p.x, region.min_y),
                Vec2::new(p.x, region.max_y),
                s.color,
                s.width,
                BlendMode::Alpha,
            );
        }
        if region.contains_y(p.y) {
            let s = self.horizontal.style();
            cx.draw_line(
                Vec2::new(region.min_x, p.y),
                Vec2::new(region.max_x, p.y),
                s.color,
                s.width,
                BlendMode::Alpha,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PlaybackMode;
    use crate::nodes::testing::{editor_at, frame, grid_with, horizontal_ys, timeline, vertical_xs};

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).x.abs() < 1e-3 && (a - b).y.abs() < 1e-3, "{a:?} != {b:?}");
    }

    #[test]
    fn crosshair_sits_above_center_by_half_toolbar() {
        let mut editor = editor_at(Vec2::new(300.0, 300.0));
        editor.toolbar_height = 100.0;
        // layer at (-300, -300) maps screen (200, 250) to world (500, 550)
        assert_close(crosshair_position(&editor), Vec2::new(500.0, 550.0));
    }

    #[test]
    fn crosshair_rotates_with_camera() {
        let mut editor = editor_at(Vec2::new(300.0, 300.0));
        editor.toolbar_height = 100.0;
        editor.camera.angle_degrees = 90.0;
        // offset (0, 50) turned by -90° about the pivot (500, 500)
        assert_close(crosshair_position(&editor), Vec2::new(550.0, 500.0));
    }

    #[test]
    fn draws_both_lines_outside_playtest() {
        let mut editor = editor_at(Vec2::new(300.0, 300.0));
        editor.toolbar_height = 100.0;
        let mut grid = grid_with(PositionLines::new(), &editor);

        let lines = frame(&mut grid, &editor, &timeline());
        assert_eq!(vertical_xs(&lines), [500.0]);
        assert_eq!(horizontal_ys(&lines), [550.0]);

        editor.playback_mode = PlaybackMode::Playing;
        assert!(frame(&mut grid, &editor, &timeline()).is_empty());
    }
}
