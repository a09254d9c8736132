//! # Sprite assets
//!
//! Bitmaps are stored the way the display is addressed: a two byte header
//! followed by frames of page-major, column-ordered bytes.
//!
//! ```text
//! [width] [height] [frame 0] [frame 1] ...
//!
//! frame byte (column + page * width), bit b = pixel (column, page * 8 + b)
//! ```
//!
//! Assets drawn with [`DrawMode::CombinedMask`] carry an image byte and a mask
//! byte per cell, so their frames are twice as long. Separate masks have no
//! header and borrow their dimensions from the bitmap they are drawn with.

use core::fmt::{self, Display};

use crate::mode::DrawMode;

const HEADER_LEN: usize = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssetError {
    MissingHeader { len: usize }, // fewer bytes than the width/height header
    ZeroWidth,
    ZeroHeight,
}

impl Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::MissingHeader { len } => {
                write!(f, "bitmap asset needs a 2 byte header, got {len} bytes")
            }
            AssetError::ZeroWidth => write!(f, "bitmap asset has zero width"),
            AssetError::ZeroHeight => write!(f, "bitmap asset has zero height"),
        }
    }
}

/// Read-only view over a bitmap asset.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Bitmap<'a> {
    width: u8,
    height: u8,
    data: &'a [u8],
}

impl<'a> Bitmap<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Self, AssetError> {
        let &[width, height, ..] = bytes else {
            return Err(AssetError::MissingHeader { len: bytes.len() });
        };
        if width == 0 {
            return Err(AssetError::ZeroWidth);
        }
        if height == 0 {
            return Err(AssetError::ZeroHeight);
        }

        Ok(Self {
            width,
            height,
            data: &bytes[HEADER_LEN..],
        })
    }

    #[inline(always)]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Page-rows per frame, `ceil(height / 8)`.
    #[inline(always)]
    pub fn pages(&self) -> usize {
        (self.height as usize).div_ceil(8)
    }

    /// Frame payload, header stripped.
    #[inline(always)]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Bytes per frame when drawn with `mode`.
    #[inline(always)]
    pub fn frame_len(&self, mode: DrawMode) -> usize {
        self.width as usize * self.pages() * mode.frame_factor()
    }

    pub fn frame_count(&self, mode: DrawMode) -> usize {
        self.data.len() / self.frame_len(mode)
    }

    /// The bytes of one frame, or `None` if the asset is too short to hold it.
    pub fn frame(&self, index: u8, mode: DrawMode) -> Option<&'a [u8]> {
        let len = self.frame_len(mode);
        let start = index as usize * len;
        self.data.get(start..start + len)
    }
}

/// Read-only view over a headerless mask asset.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Mask<'a> {
    data: &'a [u8],
}

impl<'a> Mask<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { data: bytes }
    }

    #[inline(always)]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// One frame of a mask shaped like a `width` x `pages` bitmap frame.
    pub fn frame(&self, index: u8, width: u8, pages: usize) -> Option<&'a [u8]> {
        let len = width as usize * pages;
        let start = index as usize * len;
        self.data.get(start..start + len)
    }
}
