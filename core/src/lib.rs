#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod asset;
pub mod blitter;
pub mod framebuffer;
pub mod mode;

pub use asset::{AssetError, Bitmap, Mask};
pub use blitter::{DrawRequest, Sprites};
pub use framebuffer::{new_framebuffer, Framebuffer, SharedFramebuffer, HEIGHT, WIDTH};
pub use mode::DrawMode;
