//! Headless GPU device management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue without a surface
//! - owning an offscreen color target
//! - providing encoders/views per frame and reading the target back

mod frame;
mod gpu;
mod init;

pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
