use std::rc::Rc;

use crate::api::{portal_min_max, DrawCtx};
use crate::callbacks::PriorityCallbackList;
use crate::coords::{Region, Vec2};
use crate::host::{BlendMode, ObjectState};
use crate::impl_node_base;
use crate::node::{DrawNode, LineOverride, LineStyle, NodeBase};
use crate::paint::LineColor;

/// What a guide-object hook sees: the object and both lines as decided so far.
#[derive(Debug, Copy, Clone)]
pub struct GuideObjectCtx<'a> {
    pub object: &'a ObjectState,
    pub bottom: LineStyle,
    pub top: LineStyle,
    pub bottom_y: f32,
    pub top_y: f32,
}

/// Changes to the bottom and top line of one guide object. `position` is the Y.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GuideOverride {
    pub bottom: LineOverride,
    pub top: LineOverride,
}

impl GuideOverride {
    #[inline]
    pub const fn keep() -> Self {
        Self { bottom: LineOverride::keep(), top: LineOverride::keep() }
    }

    /// Same override for both lines.
    #[inline]
    pub fn both(line: LineOverride) -> Self {
        Self { bottom: line, top: line }
    }
}

pub type GuideObjectHook = Rc<dyn Fn(&GuideObjectCtx<'_>) -> GuideOverride>;

/// Horizontal guides spanning the gamemode area of each portal-like object.
pub struct GuideObjects {
    base: NodeBase,
    hooks: PriorityCallbackList<GuideObjectHook>,
}

impl Default for GuideObjects {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GuideObjects {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuideObjects")
            .field("base", &self.base)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl GuideObjects {
    pub const DEFAULT_COLOR: LineColor = LineColor::rgba(0, 255, 255, 255);
    pub const DEFAULT_WIDTH: f32 = 2.0;

    pub fn new() -> Self {
        Self {
            base: NodeBase::new(),
            hooks: PriorityCallbackList::new(),
        }
    }

    pub fn set_properties_for_object(
        &mut self,
        hook: impl Fn(&GuideObjectCtx<'_>) -> GuideOverride + 'static,
        priority: i32,
    ) {
        self.hooks.add(Rc::new(hook), priority);
    }
}

impl DrawNode for GuideObjects {
    impl_node_base!();

    fn draw(&mut self, cx: &mut DrawCtx<'_>, region: Region) {
        let editor = cx.editor();
        if editor.is_playing() {
            return;
        }
        self.hooks.rebuild_if_needed();

        for object in &editor.guide_objects {
            if !cx.is_object_visible(object) {
                continue;
            }

            let (mut bottom_y, mut top_y) = portal_min_max(object);
            let mut bottom = LineStyle::new(Self::DEFAULT_COLOR, Self::DEFAULT_WIDTH);
            let mut top = bottom;

            for hook in self.hooks.flat() {
                let o = hook(&GuideObjectCtx { object, bottom, top, bottom_y, top_y });
                o.bottom.apply(&mut bottom, &mut bottom_y);
                o.top.apply(&mut top, &mut top_y);
            }

            for (y, s) in [(bottom_y, bottom), (top_y, top)] {
                if region.contains_y(y) {
                    cx.draw_line(
                        Vec2::new(region.min_x, y),
                        Vec2::new(region.max_x, y),
                        s.color,
                        s.width,
                        BlendMode::Alpha,
                    );
                }
            }
        }
    }
}
