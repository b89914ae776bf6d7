//! Output buffers and triangle fill.

pub mod framebuffer;
pub mod rasterizer;

pub use framebuffer::{DepthBuffer, FrameBuffer, Surface};
pub use rasterizer::{
    Coverage, FaceShader, PixelShader, ScanlineRasterizer, ScreenPoint, ScreenTriangle,
};
