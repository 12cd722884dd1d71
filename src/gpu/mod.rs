mod buffers;
mod context;
mod render;

pub use buffers::{BounceBuffers, LifeBuffers};
pub use context::GpuContext;
pub use render::RenderPipeline;
