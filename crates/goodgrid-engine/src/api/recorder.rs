//! Backend double for unit tests: records every call, draws nothing.

use crate::host::{BlendMode, DrawBackend, Topology};
use crate::vertex::Vertex;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Blend(BlendMode),
    LineWidth(f32),
    Smoothing(bool),
    Submit(Topology, usize),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub blend: BlendMode,
    pub calls: Vec<Call>,
    pub vertices: Vec<Vec<Vertex>>,
}

impl DrawBackend for RecordingBackend {
    fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
        self.calls.push(Call::Blend(mode));
    }

    fn set_line_width(&mut self, width: f32) {
        self.calls.push(Call::LineWidth(width));
    }

    fn set_line_smoothing(&mut self, enabled: bool) {
        self.calls.push(Call::Smoothing(enabled));
    }

    fn submit(&mut self, topology: Topology, vertices: &[Vertex]) {
        self.calls.push(Call::Submit(topology, vertices.len()));
        self.vertices.push(vertices.to_vec());
    }
}
