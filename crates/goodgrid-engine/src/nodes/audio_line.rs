use std::rc::Rc;

use crate::api::DrawCtx;
use crate::callbacks::PriorityCallbackList;
use crate::coords::{Region, Vec2};
use crate::host::{BlendMode, EditorSnapshot};
use crate::impl_node_base;
use crate::node::{DrawNode, LineOverride, LineStyle, NodeBase};
use crate::paint::LineColor;

#[derive(Debug, Copy, Clone)]
pub struct AudioLineCtx {
    /// Music preview is running.
    pub playback: bool,
    pub time: f32,
    /// Playback position; one coordinate is zero depending on rotation.
    pub position: Vec2,
    pub style: LineStyle,
}

/// `position` is ignored.
pub type AudioLineHook = Rc<dyn Fn(&AudioLineCtx) -> LineOverride>;

/// The music playback cursor.
///
/// While the preview runs the cursor follows the playback time; once it stops the
/// last position stays visible as a dimmer additive line.
pub struct AudioLine {
    base: NodeBase,
    hooks: PriorityCallbackList<AudioLineHook>,
    position: Vec2,
    time: f32,
}

impl Default for AudioLine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AudioLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioLine")
            .field("base", &self.base)
            .field("hooks", &self.hooks.len())
            .field("position", &self.position)
            .field("time", &self.time)
            .finish()
    }
}

impl AudioLine {
    pub const ACTIVE_COLOR: LineColor = LineColor::rgba(50, 255, 50, 255);
    pub const ACTIVE_WIDTH: f32 = 5.0;
    pub const IDLE_COLOR: LineColor = LineColor::rgba(2, 255, 2, 100);
    pub const IDLE_WIDTH: f32 = 3.0;

    pub fn new() -> Self {
        Self {
            base: NodeBase::new(),
            hooks: PriorityCallbackList::new(),
            position: Vec2::zero(),
            time: 0.0,
        }
    }

    pub fn set_properties_for_time(
        &mut self,
        hook: impl Fn(&AudioLineCtx) -> LineOverride + 'static,
        priority: i32,
    ) {
        self.hooks.add(Rc::new(hook), priority);
    }

    /// Last known cursor position.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }
}

impl DrawNode for AudioLine {
    impl_node_base!();

    fn init(&mut self, _editor: &EditorSnapshot) {
        self.position = Vec2::zero();
        self.time = 0.0;
    }

    fn draw(&mut self, cx: &mut DrawCtx<'_>, region: Region) {
        let editor = cx.editor();
        let active = editor.audio.active;

        let mut style = if active {
            self.time = editor.audio.time;
            let sample = cx.timeline().pos_for_time(self.time, editor.rotate_channel);
            self.position = if sample.rotated {
                Vec2::new(0.0, sample.position.y)
            } else {
                Vec2::new(sample.position.x, 0.0)
            };
            LineStyle::new(Self::ACTIVE_COLOR, Self::ACTIVE_WIDTH)
        } else {
            LineStyle::new(Self::IDLE_COLOR, Self::IDLE_WIDTH)
        };

        if editor.is_playing() {
            self.position = Vec2::zero();
            self.time = 0.0;
        }

        self.hooks.rebuild_if_needed();
        for hook in self.hooks.flat() {
            let ctx = AudioLineCtx { playback: active, time: self.time, position: self.position, style };
            hook(&ctx).apply_style(&mut style);
        }

        let blend = if active { BlendMode::Alpha } else { BlendMode::Additive };
        let Vec2 { x, y } = self.position;
        if x != 0.0 {
            cx.draw_line(Vec2::new(x, region.min_y), Vec2::new(x, region.max_y), style.color, style.width, blend);
        }
        if y != 0.0 {
            cx.draw_line(Vec2::new(region.min_x, y), Vec2::new(region.max_x, y), style.color, style.width, blend);
        }
    }
}
