use anyhow::{Context, Result};

use crate::coords::Viewport;
use crate::render::RenderCtx;

use super::{GpuFrame, GpuInit};

/// Owns wgpu core objects and an offscreen color target.
///
/// This type is the low-level rendering context for integrations without a window:
/// - creates and stores Instance/Adapter/Device/Queue
/// - owns a render-attachment texture of the requested size
/// - provides an encoder + view per frame and reads the target back after submit
pub struct Gpu {
    device: wgpu::Device,
    queue: wgpu::Queue,

    target: wgpu::Texture,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
}

impl Gpu {
    /// Creates a headless GPU context.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(init: GpuInit) -> Result<Self> {
        anyhow::ensure!(init.width > 0 && init.height > 0, "target has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("goodgrid device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let format = init.target_format();
        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("goodgrid offscreen target"),
            size: wgpu::Extent3d {
                width: init.width,
                height: init.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        Ok(Self {
            device,
            queue,
            target,
            format,
            width: init.width,
            height: init.height,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn target_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }

    /// Renderer context for the offscreen target.
    pub fn render_ctx(&self) -> RenderCtx<'_> {
        RenderCtx::new(&self.device, &self.queue, self.format, self.viewport())
    }

    /// Creates an encoder and clears the target to `clear`.
    pub fn begin_frame(&self, clear: wgpu::Color) -> GpuFrame {
        let view = self.target.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("goodgrid frame encoder"),
            });

        // clear pass; renderers load and draw on top
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("goodgrid clear pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        GpuFrame { view, encoder }
    }

    /// Submits the recorded commands for the given frame.
    pub fn submit(&self, frame: GpuFrame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
    }

    /// Copies the target back to the CPU as tightly packed RGBA8 rows.
    pub fn read_target(&self) -> Result<Vec<u8>> {
        const BYTES_PER_PIXEL: u32 = 4;
        let unpadded = self.width * BYTES_PER_PIXEL;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded = unpadded.div_ceil(align) * align;

        let readback = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("goodgrid readback buffer"),
            size: u64::from(padded) * u64::from(self.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("goodgrid readback encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .context("failed to wait for readback")?;
        rx.recv()
            .context("readback callback dropped")?
            .context("failed to map readback buffer")?;

        let mut pixels = Vec::with_capacity((unpadded * self.height) as usize);
        {
            let mapped = slice.get_mapped_range();
            for row in mapped.chunks_exact(padded as usize) {
                pixels.extend_from_slice(&row[..unpadded as usize]);
            }
        }
        readback.unmap();
        Ok(pixels)
    }
}
