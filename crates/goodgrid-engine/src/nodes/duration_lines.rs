use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::api::DrawCtx;
use crate::callbacks::PriorityCallbackList;
use crate::coords::{Region, Vec2};
use crate::host::{BlendMode, DurationTrigger, EditorSnapshot, Timeline};
use crate::impl_node_base;
use crate::node::{DrawNode, LineOverride, LineStyle, NodeBase};
use crate::paint::LineColor;

/// Units a spawn-triggered effect covers per second.
const SPAWN_SPEED: f32 = 311.5801;

#[derive(Debug, Copy, Clone)]
pub struct DurationLineCtx<'a> {
    pub trigger: &'a DurationTrigger,
    pub style: LineStyle,
}

/// `position` is ignored; the line always starts at the trigger.
pub type DurationLineHook = Rc<dyn Fn(&DurationLineCtx<'_>) -> LineOverride>;

/// A line from each timed trigger to the point where its effect ends.
///
/// End points of X-activated triggers go through the host timeline, which is not
/// cheap, so they are cached per object uid until the host reports a layout change
/// or the integration invalidates them.
pub struct DurationLines {
    base: NodeBase,
    hooks: PriorityCallbackList<DurationLineHook>,
    end_cache: HashMap<u64, Vec2>,
}

impl Default for DurationLines {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DurationLines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurationLines")
            .field("base", &self.base)
            .field("hooks", &self.hooks.len())
            .field("cached_ends", &self.end_cache.len())
            .finish()
    }
}

impl DurationLines {
    pub const DEFAULT_COLOR: LineColor = LineColor::rgba(255, 255, 255, 115);
    pub const DEFAULT_WIDTH: f32 = 2.0;

    pub fn new() -> Self {
        Self {
            base: NodeBase::new(),
            hooks: PriorityCallbackList::new(),
            end_cache: HashMap::new(),
        }
    }

    pub fn set_properties_for_object(
        &mut self,
        hook: impl Fn(&DurationLineCtx<'_>) -> LineOverride + 'static,
        priority: i32,
    ) {
        self.hooks.add(Rc::new(hook), priority);
    }

    /// Forgets every cached end point.
    #[inline]
    pub fn invalidate(&mut self) {
        self.end_cache.clear();
    }

    /// Forgets the cached end point of one object, e.g. after it moved.
    #[inline]
    pub fn invalidate_object(&mut self, uid: u64) {
        self.end_cache.remove(&uid);
    }

    #[inline]
    pub fn cached_end(&self, uid: u64) -> Option<Vec2> {
        self.end_cache.get(&uid).copied()
    }

    /// Drops cached ends of objects no longer in `triggers`.
    fn prune(&mut self, triggers: &[DurationTrigger]) {
        if self.end_cache.is_empty() {
            return;
        }
        let live: HashSet<u64> = triggers.iter().map(|t| t.object.uid).collect();
        self.end_cache.retain(|uid, _| live.contains(uid));
    }

    fn end_point(&mut self, trigger: &DurationTrigger, duration: f32, editor: &EditorSnapshot, timeline: &dyn Timeline) -> Vec2 {
        let start = trigger.object.position;
        if trigger.spawn_triggered {
            return Vec2::new(start.x + duration * SPAWN_SPEED, start.y);
        }

        *self.end_cache.entry(trigger.object.uid).or_insert_with(|| {
            let t0 = timeline.time_for_pos(start, trigger.ord, trigger.channel);
            let end = timeline.pos_for_time(t0.time + duration, editor.rotate_channel);
            match (t0.rotated, end.rotated) {
                (true, true) => Vec2::new(start.x, end.position.y),
                (false, false) => Vec2::new(end.position.x, start.y),
                _ => end.position,
            }
        })
    }
}

impl DrawNode for DurationLines {
    impl_node_base!();

    fn init(&mut self, _editor: &EditorSnapshot) {
        self.invalidate();
    }

    fn draw(&mut self, cx: &mut DrawCtx<'_>, region: Region) {
        let editor = cx.editor();
        if editor.update_time_markers {
            self.invalidate();
        }
        if !editor.show_duration_lines || editor.is_playing() {
            return;
        }
        self.hooks.rebuild_if_needed();
        let timeline = cx.timeline();

        for trigger in &editor.duration_triggers {
            if !cx.is_object_visible(&trigger.object) {
                continue;
            }
            let duration = trigger.duration.total();
            if duration <= 0.0 {
                continue;
            }

            let start = trigger.object.position;
            let end = self.end_point(trigger, duration, editor, timeline);
            if end.x < region.min_x || start.x > region.max_x || end.y < region.min_y || start.y > region.max_y {
                continue;
            }

            let mut style = LineStyle::new(Self::DEFAULT_COLOR, Self::DEFAULT_WIDTH);
            for hook in self.hooks.flat() {
                hook(&DurationLineCtx { trigger, style }).apply_style(&mut style);
            }

            cx.draw_line(start, end, style.color, style.width, BlendMode::Alpha);
        }

        self.prune(&editor.duration_triggers);
    }
}
