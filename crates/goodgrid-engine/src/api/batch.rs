//! Per-frame vertex arenas and the batched flush.
//!
//! Emission only appends. `flush` turns everything buffered into at most
//! `2 × (line widths + 2)` draw calls, then clears every buffer while keeping its
//! allocation, so a warmed-up engine does not allocate per frame.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::coords::{Rect, Vec2};
use crate::geometry::{rect_to_border_triangles, rect_to_triangles};
use crate::host::{BlendMode, DrawBackend, Topology};
use crate::paint::{LineColor, Rgba8};
use crate::vertex::Vertex;

/// Minimum capacity a line bucket is grown to before its first flush.
pub const RESERVE_LINE_VERTICES: usize = 4096;
/// Minimum capacity of the rect fill/outline buffers once used.
pub const RESERVE_RECT_VERTICES: usize = 2048;

/// Growable vertex storage reused across frames.
#[derive(Debug, Default, Clone)]
pub struct VertexBuffer {
    verts: Vec<Vertex>,
}

impl VertexBuffer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, v: Vertex) {
        self.verts.push(v);
    }

    #[inline]
    pub fn extend_from_slice(&mut self, vs: &[Vertex]) {
        self.verts.extend_from_slice(vs);
    }

    /// Drops the contents, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.verts.clear();
    }

    /// Grows the allocation to at least `min` vertices; never shrinks.
    #[inline]
    pub fn reserve_min(&mut self, min: usize) {
        if self.verts.capacity() < min {
            self.verts.reserve(min - self.verts.len());
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.verts.capacity()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Vertex] {
        &self.verts
    }
}

/// Line width as an ordered map key (total order over `f32`).
#[derive(Debug, Copy, Clone)]
struct WidthKey(f32);

impl PartialEq for WidthKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WidthKey {}

impl Ord for WidthKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for WidthKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Buffers sharing one blend mode.
#[derive(Debug, Default)]
struct PassBuffers {
    lines: BTreeMap<WidthKey, VertexBuffer>,
    rects: VertexBuffer,
    outlines: VertexBuffer,
}

impl PassBuffers {
    fn flush(&mut self, backend: &mut dyn DrawBackend, width_modifier: f32, stats: &mut FrameStats) {
        for (width, buf) in self.lines.iter_mut() {
            buf.reserve_min(RESERVE_LINE_VERTICES);
            if buf.is_empty() {
                continue;
            }
            backend.set_line_width(width.0 + width_modifier);
            backend.submit(Topology::Lines, buf.as_slice());
            stats.record(buf.len());
            stats.line_batches += 1;
        }

        for buf in [&mut self.rects, &mut self.outlines] {
            if buf.is_empty() {
                continue;
            }
            buf.reserve_min(RESERVE_RECT_VERTICES);
            backend.submit(Topology::Triangles, buf.as_slice());
            stats.record(buf.len());
        }
    }

    fn clear(&mut self) {
        for buf in self.lines.values_mut() {
            buf.clear();
        }
        self.rects.clear();
        self.outlines.clear();
    }

    fn vertex_count(&self) -> usize {
        self.lines.values().map(VertexBuffer::len).sum::<usize>()
            + self.rects.len()
            + self.outlines.len()
    }
}

/// Counters for one flushed frame.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: u32,
    pub line_batches: u32,
    pub vertices: usize,
}

impl FrameStats {
    #[inline]
    fn record(&mut self, vertices: usize) {
        self.draw_calls += 1;
        self.vertices += vertices;
    }
}

/// Opaque (alpha-blended) and additive buffer sets.
#[derive(Debug, Default)]
pub struct Batcher {
    opaque: PassBuffers,
    blended: PassBuffers,
}

impl Batcher {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn pass_mut(&mut self, blend: BlendMode) -> &mut PassBuffers {
        match blend {
            BlendMode::Alpha => &mut self.opaque,
            BlendMode::Additive => &mut self.blended,
        }
    }

    #[inline]
    fn pass(&self, blend: BlendMode) -> &PassBuffers {
        match blend {
            BlendMode::Alpha => &self.opaque,
            BlendMode::Additive => &self.blended,
        }
    }

    /// Appends one segment to the bucket for `width`.
    pub fn push_line(&mut self, a: Vec2, b: Vec2, color: LineColor, width: f32, blend: BlendMode) {
        let buf = self.pass_mut(blend).lines.entry(WidthKey(width)).or_default();
        buf.push(Vertex::at(a, color.color_a()));
        buf.push(Vertex::at(b, color.color_b()));
    }

    pub fn push_rect(&mut self, rect: Rect, color: Rgba8, blend: BlendMode) {
        self.pass_mut(blend).rects.extend_from_slice(&rect_to_triangles(rect, color));
    }

    pub fn push_rect_outline(&mut self, rect: Rect, color: Rgba8, width: f32, blend: BlendMode) {
        self.pass_mut(blend)
            .outlines
            .extend_from_slice(&rect_to_border_triangles(rect, color, width));
    }

    /// Issues every buffered batch, then clears the buffers.
    ///
    /// Lines of equal width share one draw call regardless of which node emitted
    /// them, so wide strokes land after thin ones of the same pass rather than in
    /// emission order.
    pub fn flush(&mut self, backend: &mut dyn DrawBackend, width_modifier: f32) -> FrameStats {
        let mut stats = FrameStats::default();

        backend.set_blend_mode(BlendMode::Alpha);
        self.opaque.flush(backend, width_modifier, &mut stats);

        backend.set_blend_mode(BlendMode::Additive);
        self.blended.flush(backend, width_modifier, &mut stats);

        self.clear();
        stats
    }

    /// Drops buffered vertices, keeping every allocation.
    pub fn clear(&mut self) {
        self.opaque.clear();
        self.blended.clear();
    }

    /// Buffer for lines of exactly `width`, if one was ever created.
    pub fn line_buffer(&self, width: f32, blend: BlendMode) -> Option<&VertexBuffer> {
        self.pass(blend).lines.get(&WidthKey(width))
    }

    #[inline]
    pub fn rect_buffer(&self, blend: BlendMode) -> &VertexBuffer {
        &self.pass(blend).rects
    }

    #[inline]
    pub fn outline_buffer(&self, blend: BlendMode) -> &VertexBuffer {
        &self.pass(blend).outlines
    }

    /// Vertices currently buffered across all passes.
    pub fn vertex_count(&self) -> usize {
        self.opaque.vertex_count() + self.blended.vertex_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::recorder::{Call, RecordingBackend};

    const BLACK: LineColor = LineColor::rgba(0, 0, 0, 150);

    fn line(b: &mut Batcher, x: f32, width: f32, blend: BlendMode) {
        b.push_line(Vec2::new(x, 0.0), Vec2::new(x, 10.0), BLACK, width, blend);
    }

    // ── emission ──────────────────────────────────────────────────────────

    #[test]
    fn solid_line_emits_two_vertices_of_the_same_color() {
        let mut b = Batcher::new();
        line(&mut b, 5.0, 1.0, BlendMode::Alpha);
        let buf = b.line_buffer(1.0, BlendMode::Alpha).unwrap();
        assert_eq!(buf.len(), 2);
        assert!(buf.as_slice().iter().all(|v| v.color == Rgba8::new(0, 0, 0, 150)));
    }

    #[test]
    fn gradient_line_colors_each_endpoint() {
        let mut b = Batcher::new();
        let c = LineColor::gradient(Rgba8::white(), Rgba8::transparent());
        b.push_line(Vec2::zero(), Vec2::new(1.0, 1.0), c, 2.0, BlendMode::Additive);
        let buf = b.line_buffer(2.0, BlendMode::Additive).unwrap().as_slice();
        assert_eq!(buf[0].color, Rgba8::white());
        assert_eq!(buf[1].color, Rgba8::transparent());
        assert!(b.line_buffer(2.0, BlendMode::Alpha).is_none());
    }

    #[test]
    fn rects_expand_to_triangles() {
        let mut b = Batcher::new();
        b.push_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba8::white(), BlendMode::Alpha);
        b.push_rect_outline(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba8::white(), 1.0, BlendMode::Additive);
        assert_eq!(b.rect_buffer(BlendMode::Alpha).len(), 6);
        assert_eq!(b.outline_buffer(BlendMode::Additive).len(), 24);
        assert_eq!(b.vertex_count(), 30);
    }

    // ── flush ─────────────────────────────────────────────────────────────

    #[test]
    fn flush_groups_lines_by_width_and_pass() {
        let mut b = Batcher::new();
        for x in 0..100 {
            line(&mut b, x as f32, 1.0, BlendMode::Alpha);
        }
        line(&mut b, 0.0, 2.0, BlendMode::Alpha);
        line(&mut b, 0.0, 3.0, BlendMode::Additive);
        b.push_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba8::white(), BlendMode::Alpha);

        let mut backend = RecordingBackend::default();
        let stats = b.flush(&mut backend, 0.0);

        assert_eq!(stats.draw_calls, 4);
        assert_eq!(stats.line_batches, 3);
        assert_eq!(stats.vertices, 200 + 2 + 2 + 6);
        assert_eq!(
            backend.calls,
            vec![
                Call::Blend(BlendMode::Alpha),
                Call::LineWidth(1.0),
                Call::Submit(Topology::Lines, 200),
                Call::LineWidth(2.0),
                Call::Submit(Topology::Lines, 2),
                Call::Submit(Topology::Triangles, 6),
                Call::Blend(BlendMode::Additive),
                Call::LineWidth(3.0),
                Call::Submit(Topology::Lines, 2),
            ]
        );
    }

    #[test]
    fn width_modifier_is_added_to_line_width() {
        let mut b = Batcher::new();
        line(&mut b, 0.0, 1.0, BlendMode::Alpha);
        let mut backend = RecordingBackend::default();
        b.flush(&mut backend, 0.2);
        assert!(backend.calls.contains(&Call::LineWidth(1.2)));
    }

    #[test]
    fn flush_clears_length_but_keeps_capacity() {
        let mut b = Batcher::new();
        for x in 0..5000 {
            line(&mut b, x as f32, 1.0, BlendMode::Alpha);
        }
        let mut backend = RecordingBackend::default();
        b.flush(&mut backend, 0.0);

        let cap = b.line_buffer(1.0, BlendMode::Alpha).unwrap().capacity();
        assert!(cap >= 10_000);
        assert_eq!(b.vertex_count(), 0);

        for x in 0..5000 {
            line(&mut b, x as f32, 1.0, BlendMode::Alpha);
        }
        assert_eq!(b.line_buffer(1.0, BlendMode::Alpha).unwrap().capacity(), cap);
    }

    #[test]
    fn empty_frame_issues_no_draw_calls() {
        let mut b = Batcher::new();
        line(&mut b, 0.0, 1.0, BlendMode::Alpha);
        let mut backend = RecordingBackend::default();
        b.flush(&mut backend, 0.0);
        backend.calls.clear();

        let stats = b.flush(&mut backend, 0.0);
        assert_eq!(stats.draw_calls, 0);
        assert!(!backend.calls.iter().any(|c| matches!(c, Call::Submit(..))));
        // the now-empty bucket was pre-grown
        assert!(b.line_buffer(1.0, BlendMode::Alpha).unwrap().capacity() >= RESERVE_LINE_VERTICES);
    }
}
