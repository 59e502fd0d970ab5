use std::rc::Rc;

use crate::api::DrawCtx;
use crate::callbacks::PriorityCallbackList;
use crate::coords::{Region, Vec2};
use crate::host::{BlendMode, EffectTrigger};
use crate::impl_node_base;
use crate::node::{DrawNode, LineOverride, LineStyle, NodeBase};
use crate::paint::LineColor;

#[derive(Debug, Copy, Clone)]
pub struct EffectLineCtx<'a> {
    pub trigger: &'a EffectTrigger,
    pub style: LineStyle,
    pub x: f32,
}

/// `position` overrides the line's X.
pub type EffectLineHook = Rc<dyn Fn(&EffectLineCtx<'_>) -> LineOverride>;

/// A vertical marker at every X-activated effect trigger.
pub struct EffectLines {
    base: NodeBase,
    hooks: PriorityCallbackList<EffectLineHook>,
}

impl Default for EffectLines {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EffectLines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectLines")
            .field("base", &self.base)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl EffectLines {
    pub const DEFAULT_COLOR: LineColor = LineColor::rgba(0, 255, 255, 255);
    pub const DEFAULT_WIDTH: f32 = 1.0;

    pub fn new() -> Self {
        Self {
            base: NodeBase::new(),
            hooks: PriorityCallbackList::new(),
        }
    }

    pub fn set_properties_for_object(
        &mut self,
        hook: impl Fn(&EffectLineCtx<'_>) -> LineOverride + 'static,
        priority: i32,
    ) {
        self.hooks.add(Rc::new(hook), priority);
    }
}

impl DrawNode for EffectLines {
    impl_node_base!();

    fn draw(&mut self, cx: &mut DrawCtx<'_>, region: Region) {
        let editor = cx.editor();
        if !editor.draw_effect_lines || editor.is_playing() {
            return;
        }
        self.hooks.rebuild_if_needed();

        for trigger in &editor.effect_triggers {
            if trigger.spawn_triggered
                || trigger.touch_triggered
                || !cx.is_object_visible(&trigger.object)
            {
                continue;
            }
            let mut x = trigger.object.position.x;
            if !region.contains_x(x) || x < 0.0 {
                continue;
            }

            let mut style = LineStyle::new(Self::DEFAULT_COLOR, Self::DEFAULT_WIDTH);
            for hook in self.hooks.flat() {
                hook(&EffectLineCtx { trigger, style, x }).apply(&mut style, &mut x);
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
    use crate::host::ObjectState;
    use crate::nodes::testing::{editor_at, frame, grid_with, timeline, vertical_xs};

    fn trigger(uid: u64, x: f32) -> EffectTrigger {
        EffectTrigger {
            object: ObjectState::new(uid, Vec2::new(x, 200.0)),
            ..Default::default()
        }
    }

    #[test]
    fn one_line_per_x_triggered_object_in_view() {
        let mut editor = editor_at(Vec2::new(300.0, 300.0));
        editor.effect_triggers = vec![
            trigger(1, 120.0),
            EffectTrigger { spawn_triggered: true, ..trigger(2, 150.0) },
            EffectTrigger { touch_triggered: true, ..trigger(3, 180.0) },
            trigger(4, -15.0),
            trigger(5, 9000.0),
            trigger(6, 240.0),
        ];
        let mut grid = grid_with(EffectLines::new(), &editor);

        let lines = frame(&mut grid, &editor, &timeline());
        assert_eq!(vertical_xs(&lines), [120.0, 240.0]);
        assert!(lines.iter().all(|l| l.width == 1.0));
    }

    #[test]
    fn disabled_by_editor_toggle() {
        let mut editor = editor_at(Vec2::new(300.0, 300.0));
        editor.effect_triggers = vec![trigger(1, 120.0)];
        editor.draw_effect_lines = false;
        let mut grid = grid_with(EffectLines::new(), &editor);
        assert!(frame(&mut grid, &editor, &timeline()).is_empty());
    }

    #[test]
    fn hook_overrides_color_width_and_x() {
        let mut editor = editor_at(Vec2::new(300.0, 300.0));
        editor.effect_triggers = vec![trigger(1, 120.0), trigger(2, 240.0)];

        let mut node = EffectLines::new();
        node.set_properties_for_object(
            |cx| {
                if cx.trigger.object.uid == 2 {
                    LineOverride::keep().position(cx.x + 15.0).width(3.0).color(LineColor::rgba(255, 0, 0, 255))
                } else {
                    LineOverride::keep()
                }
            },
            0,
        );
        let mut grid = grid_with(node, &editor);

        let lines = frame(&mut grid, &editor, &timeline());
        // width 1 batch flushes before width 3
        assert_eq!(vertical_xs(&lines), [120.0, 255.0]);
        assert_eq!(lines[1].width, 3.0);
        assert_eq!(lines[1].color_a.r, 255);
        assert_eq!(lines[1].color_a.g, 0);
    }
}
