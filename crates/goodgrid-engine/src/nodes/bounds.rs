use crate::api::{DrawCtx, GROUND_OFFSET};
use crate::coords::{Region, Vec2};
use crate::host::BlendMode;
use crate::impl_node_base;
use crate::node::{DrawNode, NodeBase};
use crate::paint::LineColor;

use super::LineProps;

/// Level edges: the start line at x = 0, the ground when the host hides its own,
/// and the top of the visible area.
#[derive(Debug, Clone)]
pub struct Bounds {
    base: NodeBase,
    top: LineProps,
    bottom: LineProps,
    vertical: LineProps,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    pub fn new() -> Self {
        let white = LineColor::rgba(255, 255, 255, 255);
        Self {
            base: NodeBase::new(),
            top: LineProps::new(white, 2.0),
            bottom: LineProps::new(white, 2.0),
            vertical: LineProps::new(white, 1.0),
        }
    }

    #[inline]
    pub fn top(&self) -> &LineProps {
        &self.top
    }

    #[inline]
    pub fn top_mut(&mut self) -> &mut LineProps {
        &mut self.top
    }

    #[inline]
    pub fn bottom(&self) -> &LineProps {
        &self.bottom
    }

    #[inline]
    pub fn bottom_mut(&mut self) -> &mut LineProps {
        &mut self.bottom
    }

    #[inline]
    pub fn vertical(&self) -> &LineProps {
        &self.vertical
    }

    #[inline]
    pub fn vertical_mut(&mut self) -> &mut LineProps {
        &mut self.vertical
    }
}

impl DrawNode for Bounds {
    impl_node_base!();

    fn draw(&mut self, cx: &mut DrawCtx<'_>, region: Region) {
        if region.contains_x(0.0) {
            let s = self.vertical.style();
            cx.draw_line(
                Vec2::new(0.0, region.min_y),
                Vec2::new(0.0, region.max_y),
                s.color,
                s.width,
                BlendMode::Alpha,
            );
        }

        if !cx.editor().show_ground && region.contains_y(GROUND_OFFSET) {
            let s = self.bottom.style();
            cx.draw_line(
                Vec2::new(region.min_x, GROUND_OFFSET),
                Vec2::new(region.max_x, GROUND_OFFSET),
                s.color,
                s.width,
                BlendMode::Alpha,
            );
        }

        let s = self.top.style();
        cx.draw_line(
            Vec2::new(region.min_x, region.max_y),
            Vec2::new(region.max_x, region.max_y),
            s.color,
            s.width,
            BlendMode::Alpha,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MAX_HEIGHT;
    use crate::nodes::testing::{editor_at, frame, grid_with, horizontal_ys, timeline, vertical_xs};

    #[test]
    fn start_line_and_top_edge() {
        let editor = editor_at(Vec2::new(100.0, 2400.0));
        let mut grid = grid_with(Bounds::new(), &editor);
        let lines = frame(&mut grid, &editor, &timeline());

        assert_eq!(vertical_xs(&lines), [0.0]);
        assert_eq!(horizontal_ys(&lines), [MAX_HEIGHT]);
        let start = lines.iter().find(|l| l.a.x == 0.0 && l.b.x == 0.0).unwrap();
        assert_eq!(start.width, 1.0);
    }

    #[test]
    fn ground_line_only_when_host_ground_hidden() {
        let mut editor = editor_at(Vec2::new(100.0, 300.0));
        let mut grid = grid_with(Bounds::new(), &editor);
        assert!(!horizontal_ys(&frame(&mut grid, &editor, &timeline())).contains(&GROUND_OFFSET));

        editor.show_ground = false;
        let lines = frame(&mut grid, &editor, &timeline());
        let ground = lines.iter().find(|l| l.a.y == GROUND_OFFSET && l.b.y == GROUND_OFFSET).unwrap();
        assert_eq!(ground.width, 2.0);
    }

    #[test]
    fn start_line_culled_when_out_of_view() {
        let editor = editor_at(Vec2::new(5000.0, 300.0));
        let mut grid = grid_with(Bounds::new(), &editor);
        assert!(vertical_xs(&frame(&mut grid, &editor, &timeline())).is_empty());
    }
}
