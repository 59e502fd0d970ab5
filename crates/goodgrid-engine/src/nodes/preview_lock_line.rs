use crate::api::DrawCtx;
use crate::coords::{Region, Vec2};
use crate::host::{BlendMode, PlaybackMode};
use crate::impl_node_base;
use crate::node::{DrawNode, NodeBase};
use crate::paint::LineColor;

use super::LineProps;

/// Vertical line at the locked preview position while editing.
#[derive(Debug, Clone)]
pub struct PreviewLockLine {
    base: NodeBase,
    line: LineProps,
}

impl Default for PreviewLockLine {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewLockLine {
    pub const DEFAULT_COLOR: LineColor = LineColor::rgba(255, 150, 0, 255);

    pub fn new() -> Self {
        Self {
            base: NodeBase::new(),
            line: LineProps::new(Self::DEFAULT_COLOR, 2.0),
        }
    }

    #[inline]
    pub fn line(&self) -> &LineProps {
        &self.line
    }

    #[inline]
    pub fn line_mut(&mut self) -> &mut LineProps {
        &mut self.line
    }
}

impl DrawNode for PreviewLockLine {
    impl_node_base!();

    fn draw(&mut self, cx: &mut DrawCtx<'_>, region: Region) {
        let editor = cx.editor();
        if editor.playback_mode != PlaybackMode::Not {
            return;
        }
        let x = editor.preview_position.x;
        if x <= 0.0 {
            return;
        }

        let s = self.line.style();
        cx.draw_line(
            Vec2::new(x, region.min_y),
            Vec2::new(x, region.max_y),
            s.color,
            s.width,
            BlendMode::Alpha,
        );
    }
}
