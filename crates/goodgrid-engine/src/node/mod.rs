//! Drawable node contract.
//!
//! A node is one logical overlay feature (grid, bounds, guide lines, ...). The engine
//! owns every node, calls [`DrawNode::init`] when the host viewport is (re)created
//! and [`DrawNode::draw`] once per frame with the visible region.
//!
//! Extending the overlay:
//! - implement `DrawNode` for a new type holding a [`NodeBase`]
//! - register it with `DrawGrid::add_node`
//! - emit geometry through the [`DrawCtx`](crate::api::DrawCtx) passed to `draw`

mod base;
mod style;

use std::any::Any;

use crate::api::DrawCtx;
use crate::coords::Region;
use crate::host::EditorSnapshot;

pub use base::NodeBase;
pub use style::{LineOverride, LineStyle};

/// Upcast to `Any` for checked downcasts of `dyn DrawNode`.
///
/// Blanket-implemented; node types never implement it by hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A drawable overlay feature.
pub trait DrawNode: AsAny {
    fn base(&self) -> &NodeBase;

    fn base_mut(&mut self) -> &mut NodeBase;

    /// Called for every enabled node each time the host viewport is (re)created.
    fn init(&mut self, editor: &EditorSnapshot) {
        let _ = editor;
    }

    /// Emits this frame's geometry. Geometry entirely outside `region` should be
    /// skipped by the node itself.
    fn draw(&mut self, cx: &mut DrawCtx<'_>, region: Region);

    #[inline]
    fn id(&self) -> &str {
        self.base().id()
    }

    #[inline]
    fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    #[inline]
    fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().set_enabled(enabled);
    }

    #[inline]
    fn z_order(&self) -> i32 {
        self.base().z_order()
    }

    /// Changes the draw order; the engine re-sorts before the next frame.
    #[inline]
    fn set_z_order(&mut self, z: i32) {
        self.base_mut().set_z_order(z);
    }
}

/// Implements the `base`/`base_mut` accessors for a node struct with a `base` field.
#[macro_export]
macro_rules! impl_node_base {
    () => {
        #[inline]
        fn base(&self) -> &$crate::node::NodeBase {
            &self.base
        }

        #[inline]
        fn base_mut(&mut self) -> &mut $crate::node::NodeBase {
            &mut self.base
        }
    };
}
