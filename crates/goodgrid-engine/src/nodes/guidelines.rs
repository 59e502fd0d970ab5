use std::rc::Rc;

use crate::api::DrawCtx;
use crate::callbacks::PriorityCallbackList;
use crate::coords::{Region, Vec2};
use crate::host::BlendMode;
use crate::impl_node_base;
use crate::node::{DrawNode, LineOverride, LineStyle, NodeBase};

#[derive(Debug, Copy, Clone)]
pub struct GuidelineCtx {
    /// Marker position as stored in the table.
    pub marker: f32,
    pub style: LineStyle,
    pub x: f32,
}

/// `position` overrides the line's X.
pub type GuidelineHook = Rc<dyn Fn(&GuidelineCtx) -> LineOverride>;

/// Song markers: one vertical line per time marker in view.
pub struct Guidelines {
    base: NodeBase,
    hooks: PriorityCallbackList<GuidelineHook>,
}

impl Default for Guidelines {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Guidelines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guidelines")
            .field("base", &self.base)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl Guidelines {
    pub const DEFAULT_WIDTH: f32 = 1.0;

    pub fn new() -> Self {
        Self {
            base: NodeBase::new(),
            hooks: PriorityCallbackList::new(),
        }
    }

    pub fn set_properties_for_value(
        &mut self,
        hook: impl Fn(&GuidelineCtx) -> LineOverride + 'static,
        priority: i32,
    ) {
        self.hooks.add(Rc::new(hook), priority);
    }
}

impl DrawNode for Guidelines {
    impl_node_base!();

    fn draw(&mut self, cx: &mut DrawCtx<'_>, region: Region) {
        if !cx.editor().show_song_markers {
            return;
        }
        self.hooks.rebuild_if_needed();

        for marker in cx.time_markers().in_range(region.min_x, region.max_x) {
            let mut x = marker.position;
            let mut style = LineStyle::new(marker.color.into(), Self::DEFAULT_WIDTH);
            for hook in self.hooks.flat() {
                hook(&GuidelineCtx { marker: marker.position, style, x }).apply(&mut style, &mut x);
            }

            cx.draw_line(
                Vec2::new(x, region.min_y),
                Vec2::new(x, region.max_y),
                style.color,
                style.width,
                BlendMode::Alpha,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::testing::{editor_at, frame, grid_with, timeline, vertical_xs};
    use crate::paint::{LineColor, Rgba8};

    #[test]
    fn markers_in_view_become_lines() {
        let editor = editor_at(Vec2::new(300.0, 300.0));
        let mut grid = grid_with(Guidelines::new(), &editor);
        grid.generate_time_markers("100,1,200,0.9,5000,0.8");

        let lines = frame(&mut grid, &editor, &timeline());
        assert_eq!(vertical_xs(&lines), [100.0, 200.0]);
        assert_eq!(lines[0].color_a, Rgba8::new(255, 255, 0, 255));
        assert_eq!(lines[1].color_a, Rgba8::new(127, 255, 0, 255));
    }

    #[test]
    fn hidden_song_markers() {
        let mut editor = editor_at(Vec2::new(300.0, 300.0));
        editor.show_song_markers = false;
        let mut grid = grid_with(Guidelines::new(), &editor);
        grid.generate_time_markers("100,1");
        assert!(frame(&mut grid, &editor, &timeline()).is_empty());
    }

    #[test]
    fn hooks_see_marker_and_move_line() {
        let editor = editor_at(Vec2::new(300.0, 300.0));
        let mut node = Guidelines::new();
        node.set_properties_for_value(
            |cx| LineOverride::keep().position(cx.marker * 2.0).color(LineColor::rgba(1, 2, 3, 4)),
            0,
        );
        let mut grid = grid_with(node, &editor);
        grid.generate_time_markers("100,1");

        let lines = frame(&mut grid, &editor, &timeline());
        assert_eq!(vertical_xs(&lines), [200.0]);
        assert_eq!(lines[0].color_a, Rgba8::new(1, 2, 3, 4));
    }
}
