use std::rc::Rc;

use crate::api::DrawCtx;
use crate::callbacks::PriorityCallbackList;
use crate::coords::{Region, Vec2};
use crate::host::{AudioGuide, BlendMode};
use crate::impl_node_base;
use crate::node::{DrawNode, LineOverride, LineStyle, NodeBase};
use crate::paint::LineColor;

#[derive(Debug, Copy, Clone)]
pub struct BeatCtx<'a> {
    pub guide: &'a AudioGuide,
    /// Beat index from the guide's start.
    pub beat: i32,
    pub beats_per_bar: i32,
    pub style: LineStyle,
    pub x: f32,
}

/// `position` overrides the line's X.
pub type BeatHook = Rc<dyn Fn(&BeatCtx<'_>) -> LineOverride>;

/// Beat lines of audio guide objects, with bar starts highlighted.
pub struct BpmTriggers {
    base: NodeBase,
    hooks: PriorityCallbackList<BeatHook>,
}

impl Default for BpmTriggers {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BpmTriggers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BpmTriggers")
            .field("base", &self.base)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl BpmTriggers {
    pub const BAR_COLOR: LineColor = LineColor::rgba(255, 255, 0, 255);
    pub const BEAT_COLOR: LineColor = LineColor::rgba(255, 127, 0, 255);
    pub const DEFAULT_WIDTH: f32 = 1.0;

    pub fn new() -> Self {
        Self {
            base: NodeBase::new(),
            hooks: PriorityCallbackList::new(),
        }
    }

    pub fn set_properties_for_beats(
        &mut self,
        hook: impl Fn(&BeatCtx<'_>) -> LineOverride + 'static,
        priority: i32,
    ) {
        self.hooks.add(Rc::new(hook), priority);
    }
}

impl DrawNode for BpmTriggers {
    impl_node_base!();

    fn draw(&mut self, cx: &mut DrawCtx<'_>, region: Region) {
        let editor = cx.editor();
        self.hooks.rebuild_if_needed();

        for guide in &editor.audio_guides {
            if guide.disabled || !cx.is_object_visible(&guide.object) {
                continue;
            }

            let speed = editor.speeds.speed(guide.speed);
            let start_x = guide.object.position.x;
            let end_x = start_x + guide.duration * speed;
            if end_x < region.min_x || start_x > region.max_x {
                continue;
            }

            let beats_per_bar = guide.beats_per_bar;
            if guide.bpm == 0.0 || beats_per_bar == 0 {
                continue;
            }
            let step = speed * 60.0 / (guide.bpm * beats_per_bar as f32);

            let first = (((region.min_x - start_x) / step).floor() as i32).max(0);
            let last = ((region.max_x - start_x) / step).ceil() as i32;

            for beat in first..=last {
                let mut x = start_x + step * beat as f32;
                if !region.contains_x(x) {
                    continue;
                }
                if x > end_x {
                    break;
                }

                let color = if beat % beats_per_bar == 0 { Self::BAR_COLOR } else { Self::BEAT_COLOR };
                let mut style = LineStyle::new(color, Self::DEFAULT_WIDTH);
                for hook in self.hooks.flat() {
                    hook(&BeatCtx { guide, beat, beats_per_bar, style, x }).apply(&mut style, &mut x);
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
}
