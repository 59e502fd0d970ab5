/// A single frame being recorded against the offscreen target.
///
/// Short-lived: hand it back to `Gpu::submit` once every renderer has recorded.
pub struct GpuFrame {
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
