use crate::api::DrawCtx;
use crate::coords::{Region, Vec2};
use crate::host::BlendMode;
use crate::impl_node_base;
use crate::node::{DrawNode, NodeBase};
use crate::paint::LineColor;

use super::LineProps;

/// Floor and ceiling of the flying gamemode corridor, shown during playtests.
#[derive(Debug, Clone)]
pub struct Ground {
    base: NodeBase,
    top: LineProps,
    bottom: LineProps,
}

impl Default for Ground {
    fn default() -> Self {
        Self::new()
    }
}

impl Ground {
    pub const DEFAULT_COLOR: LineColor = LineColor::rgba(255, 175, 50, 255);

    pub fn new() -> Self {
        Self {
            base: NodeBase::new(),
            top: LineProps::new(Self::DEFAULT_COLOR, 2.0),
            bottom: LineProps::new(Self::DEFAULT_COLOR, 2.0),
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
}

impl DrawNode for Ground {
    impl_node_base!();

    fn draw(&mut self, cx: &mut DrawCtx<'_>, region: Region) {
        let editor = cx.editor();
        if !editor.is_playing() || !editor.player_flying {
            return;
        }

        for (y, props) in [(editor.min_portal_y, &self.bottom), (editor.max_portal_y, &self.top)] {
            let s = props.style();
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
