//! The batching engine.
//!
//! [`DrawGrid`] owns the node registry, caches viewport-derived values, computes
//! the visible region each frame, runs every enabled node in z-order and flushes
//! their geometry into a handful of draw calls.
//!
//! Frame sequence (`DrawGrid::draw`):
//! 1) recompute the view transform if a zoom change invalidated it
//! 2) re-sort nodes if any z-order changed
//! 3) compute the visible region
//! 4) `draw` each enabled node into the batch buffers
//! 5) flush the buffers (one call per line width, rect fill, rect outline, per pass)

mod batch;
mod ctx;
mod markers;
mod registry;
mod view;

#[cfg(test)]
pub(crate) mod recorder;

use crate::config::DrawGridConfig;
use crate::coords::{Rect, Region, Vec2};
use crate::error::NodeError;
use crate::host::{BlendMode, DrawBackend, EditorSnapshot, ObjectKind, ObjectState, Timeline};
use crate::node::DrawNode;
use crate::nodes;
use crate::paint::{LineColor, Rgba8};

pub use batch::{
    Batcher, FrameStats, VertexBuffer, RESERVE_LINE_VERTICES, RESERVE_RECT_VERTICES,
};
pub use ctx::{object_visible, DrawCtx, GridBounds};
pub use markers::{marker_color, TimeMarker, TimeMarkers};
pub use registry::NodeRegistry;
pub use view::{overdraw_factor, ViewTransform};

use ctx::GridState;

/// Fixed level height for levels without dynamic height.
pub const MAX_HEIGHT: f32 = 2490.0;
/// Y of the ground line.
pub const GROUND_OFFSET: f32 = 90.0;
/// Margin added around the view before clamping to the grid bounds.
pub const PADDING: f32 = 500.0;

/// Extra width given to every line while smoothing is on.
const SMOOTHING_WIDTH_BONUS: f32 = 0.2;

/// What `DrawGrid::draw` did with a frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Vanilla mode is on; the host should run its own drawing.
    Vanilla,
    /// The camera zoom is zero; nothing was drawn.
    Skipped,
    Drawn(FrameStats),
}

/// Grid/guide overlay engine.
///
/// One instance per editor. `init` whenever the host viewport is (re)created, then
/// `draw` once per rendered frame on the thread owning the graphics context.
#[derive(Debug)]
pub struct DrawGrid {
    registry: NodeRegistry,
    view: ViewTransform,
    batch: Batcher,
    state: GridState,

    vanilla_draw: bool,
    line_smoothing: bool,
    line_smoothing_limit: f32,
    unbounded_width: bool,
}

impl Default for DrawGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawGrid {
    /// Engine with the default configuration and the built-in nodes.
    pub fn new() -> Self {
        Self::with_config(DrawGridConfig::default())
    }

    pub fn with_config(config: DrawGridConfig) -> Self {
        let mut grid = Self::empty(config);
        nodes::register_builtin(&mut grid.registry);
        grid
    }

    /// Engine without any node; integrations register their own.
    pub fn empty(config: DrawGridConfig) -> Self {
        Self {
            registry: NodeRegistry::new(),
            view: ViewTransform::new(),
            batch: Batcher::new(),
            state: GridState {
                bounds: GridBounds { min: config.grid_origin, max: config.grid_size },
                hide_invisible: config.hide_invisible,
                markers: TimeMarkers::new(),
            },
            vanilla_draw: config.vanilla_draw,
            line_smoothing: config.line_smoothing,
            line_smoothing_limit: config.line_smoothing_limit,
            unbounded_width: config.unbounded_width,
        }
    }

    /// Resets caches and buffers for a new host viewport and initializes every
    /// enabled node.
    pub fn init(&mut self, editor: &EditorSnapshot) {
        self.view.reset();
        self.registry.should_sort();
        self.batch.clear();

        if self.unbounded_width {
            self.state.bounds.max.x = f32::MAX;
        }

        for node in self.registry.iter_mut() {
            if node.is_enabled() {
                node.init(editor);
            }
        }

        log::debug!(
            "draw grid initialized: {} nodes, bounds {:?}",
            self.registry.len(),
            self.state.bounds
        );
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Draws one frame through `backend`.
    ///
    /// The backend's blend mode is restored before returning.
    pub fn draw(
        &mut self,
        editor: &EditorSnapshot,
        timeline: &dyn Timeline,
        backend: &mut dyn DrawBackend,
    ) -> FrameOutcome {
        if self.vanilla_draw {
            return FrameOutcome::Vanilla;
        }
        let zoom = editor.camera.zoom;
        if zoom == 0.0 {
            return FrameOutcome::Skipped;
        }

        let previous_blend = backend.blend_mode();

        self.view.ensure_valid(editor.window, &editor.camera);
        if self.registry.needs_sort() {
            self.registry.sort();
        }
        self.state.hide_invisible = editor.hide_invisible;

        let region = self.visible_region(editor);

        backend.set_blend_mode(BlendMode::Alpha);
        {
            let mut cx = DrawCtx::new(&mut self.batch, &self.state, editor, timeline);
            for node in self.registry.iter_mut() {
                if node.is_enabled() {
                    node.draw(&mut cx, region);
                }
            }
        }

        let stats = self.batch_draw(backend, zoom);
        backend.set_blend_mode(previous_blend);

        log::trace!(
            "frame drawn: {} draw calls, {} vertices, region {:?}",
            stats.draw_calls,
            stats.vertices,
            region
        );
        FrameOutcome::Drawn(stats)
    }

    /// Region a frame for `editor` renders, from the cached world view size.
    pub fn visible_region(&self, editor: &EditorSnapshot) -> Region {
        let center = editor.camera.center();
        let half = self.view.world_view_size() * 0.5;
        let height = if editor.dynamic_level_height {
            self.state.bounds.max.y
        } else {
            MAX_HEIGHT
        };

        Region::around(
            (center.x, center.y),
            (half.x, half.y),
            PADDING,
            (self.state.bounds.min.x, self.state.bounds.min.y),
            (self.state.bounds.max.x, height),
        )
    }

    fn batch_draw(&mut self, backend: &mut dyn DrawBackend, zoom: f32) -> FrameStats {
        let smooth = self.line_smoothing && zoom >= self.line_smoothing_limit;
        let width_modifier = if smooth { SMOOTHING_WIDTH_BONUS } else { 0.0 };

        if smooth {
            backend.set_line_smoothing(true);
        }
        let stats = self.batch.flush(backend, width_modifier);
        if smooth {
            backend.set_line_smoothing(false);
        }
        stats
    }

    // ── emission outside nodes ────────────────────────────────────────────

    /// Buffers a line for the next flush.
    #[inline]
    pub fn draw_line(&mut self, a: Vec2, b: Vec2, color: LineColor, width: f32, blend: BlendMode) {
        self.batch.push_line(a, b, color, width, blend);
    }

    #[inline]
    pub fn draw_rect(&mut self, rect: Rect, color: Rgba8, blend: BlendMode) {
        self.batch.push_rect(rect, color, blend);
    }

    #[inline]
    pub fn draw_rect_outline(&mut self, rect: Rect, color: Rgba8, width: f32, blend: BlendMode) {
        self.batch.push_rect_outline(rect, color, width, blend);
    }

    #[inline]
    pub fn batcher(&self) -> &Batcher {
        &self.batch
    }

    // ── nodes ─────────────────────────────────────────────────────────────

    /// Registers `node` under `id`. Duplicate ids are allowed; lookups return the
    /// first one registered.
    #[inline]
    pub fn add_node<T: DrawNode>(&mut self, id: impl Into<String>, node: T) -> &mut T {
        self.registry.add(id, node)
    }

    #[inline]
    pub fn node_by_id(&self, id: &str) -> Result<&dyn DrawNode, NodeError> {
        self.registry.by_id(id)
    }

    #[inline]
    pub fn node_by_id_mut(&mut self, id: &str) -> Result<&mut dyn DrawNode, NodeError> {
        self.registry.by_id_mut(id)
    }

    /// First node of kind `T`.
    #[inline]
    pub fn node<T: DrawNode>(&self) -> Result<&T, NodeError> {
        self.registry.first_of::<T>()
    }

    #[inline]
    pub fn node_mut<T: DrawNode>(&mut self) -> Result<&mut T, NodeError> {
        self.registry.first_of_mut::<T>()
    }

    /// Node `id`, checked to be of kind `T`.
    #[inline]
    pub fn node_with_id<T: DrawNode>(&self, id: &str) -> Result<&T, NodeError> {
        self.registry.with_id::<T>(id)
    }

    #[inline]
    pub fn node_with_id_mut<T: DrawNode>(&mut self, id: &str) -> Result<&mut T, NodeError> {
        self.registry.with_id_mut::<T>(id)
    }

    /// Changes a node's z-order; the new order applies from the next frame.
    pub fn set_z_order(&mut self, id: &str, z: i32) -> Result<(), NodeError> {
        self.registry.by_id_mut(id)?.set_z_order(z);
        Ok(())
    }

    #[inline]
    pub fn nodes(&self) -> &NodeRegistry {
        &self.registry
    }

    #[inline]
    pub fn should_sort(&mut self) {
        self.registry.should_sort();
    }

    #[inline]
    pub fn sort(&mut self) {
        self.registry.sort();
    }

    // ── toggles ───────────────────────────────────────────────────────────

    /// Invalidates the view transform; call after every camera zoom change.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.view.mark_dirty();
    }

    #[inline]
    pub fn set_vanilla_draw(&mut self, enabled: bool) {
        self.vanilla_draw = enabled;
    }

    #[inline]
    pub fn set_line_smoothing(&mut self, enabled: bool) {
        self.line_smoothing = enabled;
    }

    #[inline]
    pub fn set_line_smoothing_limit(&mut self, limit: f32) {
        self.line_smoothing_limit = limit;
    }

    /// Overrides hide-invisible mode until the next frame reads the snapshot's value.
    #[inline]
    pub fn set_hide_invisible(&mut self, enabled: bool) {
        self.state.hide_invisible = enabled;
    }

    /// Takes effect at the next `init`.
    #[inline]
    pub fn set_unbounded_width(&mut self, enabled: bool) {
        self.unbounded_width = enabled;
    }

    /// Sets the maximum corner of the grid bounds.
    #[inline]
    pub fn override_grid_bounds_size(&mut self, size: Vec2) {
        self.state.bounds.max = size;
    }

    /// Sets the minimum corner of the grid bounds.
    #[inline]
    pub fn override_grid_bounds_origin(&mut self, origin: Vec2) {
        self.state.bounds.min = origin;
    }

    /// Rebuilds the song-marker table from the host's marker string.
    pub fn generate_time_markers(&mut self, raw: &str) {
        self.state.markers = TimeMarkers::parse(raw);
        log::debug!("generated {} time markers", self.state.markers.len());
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn grid_bounds(&self) -> GridBounds {
        self.state.bounds
    }

    #[inline]
    pub fn grid_bounds_size(&self) -> Vec2 {
        self.state.bounds.max
    }

    #[inline]
    pub fn grid_bounds_origin(&self) -> Vec2 {
        self.state.bounds.min
    }

    #[inline]
    pub fn time_markers(&self) -> &TimeMarkers {
        &self.state.markers
    }

    #[inline]
    pub fn world_view_size(&self) -> Vec2 {
        self.view.world_view_size()
    }

    #[inline]
    pub fn overdraw_factor(&self) -> f32 {
        self.view.overdraw_factor()
    }

    #[inline]
    pub fn line_smoothing_limit(&self) -> f32 {
        self.line_smoothing_limit
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.view.is_dirty()
    }

    #[inline]
    pub fn is_vanilla_draw(&self) -> bool {
        self.vanilla_draw
    }

    #[inline]
    pub fn has_line_smoothing(&self) -> bool {
        self.line_smoothing
    }

    #[inline]
    pub fn is_hide_invisible(&self) -> bool {
        self.state.hide_invisible
    }

    #[inline]
    pub fn is_object_visible(&self, object: &ObjectState) -> bool {
        object_visible(object.flags, self.state.hide_invisible)
    }
}

/// Bottom and top Y of the guide drawn for a portal-like object.
///
/// The span is centered on the object, snapped down to the 30-unit grid and never
/// starts below the ground.
pub fn portal_min_max(object: &ObjectState) -> (f32, f32) {
    const DEFAULT_HEIGHT: f32 = 300.0;
    const BALL_HEIGHT: f32 = 240.0;
    const SPIDER_HEIGHT: f32 = 270.0;
    const STEP: f32 = 30.0;

    let height = match object.kind {
        ObjectKind::BallPortal => BALL_HEIGHT,
        ObjectKind::SpiderPortal => SPIDER_HEIGHT,
        _ => DEFAULT_HEIGHT,
    };

    let y_min = (((object.position.y - height * 0.5) / STEP).floor() * STEP).max(GROUND_OFFSET);
    (y_min, y_min + height)
}
