//! # Framebuffer
//!
//! A 1-bit-per-pixel display buffer organized as 8-pixel-tall byte pages.
//!
//! ```text
//! byte index = column + page * width
//! bit b      = pixel (column, page * 8 + b), bit 0 on top
//! ```
//!
//! The buffer itself has no opinion about its contents; the bit-plane layout
//! is a convention shared with the [`Sprites`](crate::blitter::Sprites)
//! blitter and whatever flushes the buffer to the panel.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec;
use core::cell::RefCell;
use core::fmt::{Debug, Formatter};
use core::slice::Chunks;

use bit_field::BitField;

use crate::blitter::Sprites;

/// Width of the reference panel, in pixels.
pub const WIDTH: usize = 80;
/// Height of the reference panel, in pixels.
pub const HEIGHT: usize = 160;

/// A framebuffer handed between the game loop and the flush routine.
pub type SharedFramebuffer = Rc<RefCell<Framebuffer>>;

/// Create a reference-panel framebuffer with every byte set to `fill`, ready to share.
pub fn new_framebuffer(fill: u8) -> SharedFramebuffer {
    Rc::new(RefCell::new(Framebuffer::filled(WIDTH, HEIGHT, fill)))
}

#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    data: Box<[u8]>,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Framebuffer {
    fn fmt(&self, f: &mut Formatter) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pages", &self.pages())
            .finish()
    }
}

impl Framebuffer {
    /// A zeroed buffer for the reference panel ([`WIDTH`] x [`HEIGHT`]).
    pub fn new() -> Self {
        Self::with_size(WIDTH, HEIGHT)
    }

    /// A zeroed buffer for a panel of the given size.
    pub fn with_size(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0)
    }

    pub fn filled(width: usize, height: usize, fill: u8) -> Self {
        let pages = height.div_ceil(8);
        Self {
            width,
            height,
            data: vec![fill; width * pages].into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of page-rows, `ceil(height / 8)`.
    #[inline(always)]
    pub fn pages(&self) -> usize {
        self.height.div_ceil(8)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline(always)]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The `width` bytes making up one page-row, in column order.
    ///
    /// Panics if `page >= self.pages()`.
    pub fn page_row(&self, page: usize) -> &[u8] {
        &self.data[page * self.width..(page + 1) * self.width]
    }

    /// Page-rows top to bottom, the order a page-addressed controller expects them.
    pub fn page_rows(&self) -> Chunks<'_, u8> {
        self.data.chunks(self.width.max(1))
    }

    /// Read a single pixel. Anything outside the panel reads as unset.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.data[x + (y / 8) * self.width].get_bit(y % 8)
    }

    pub fn clear(&mut self, value: bool) {
        self.fill(if value { 0xFF } else { 0x00 });
    }

    pub fn fill(&mut self, byte: u8) {
        self.data.fill(byte);
    }

    /// Borrow the buffer for sprite drawing.
    pub fn sprites(&mut self) -> Sprites<'_> {
        Sprites::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_panel_size() {
        let fb = Framebuffer::new();
        assert_eq!(fb.pages(), 20);
        assert_eq!(fb.len(), WIDTH * 20);
        assert!(fb.bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn partial_last_page_is_allocated() {
        let fb = Framebuffer::with_size(10, 13);
        assert_eq!(fb.pages(), 2);
        assert_eq!(fb.len(), 20);
    }

    #[test]
    fn pixel_reads_bit_plane() {
        let mut fb = Framebuffer::with_size(4, 16);
        fb.bytes_mut()[4 + 2] = 0b1000_0001;
        assert!(fb.pixel(2, 8));
        assert!(fb.pixel(2, 15));
        assert!(!fb.pixel(2, 9));
        assert!(!fb.pixel(3, 8));
        assert!(!fb.pixel(2, 16));
        assert!(!fb.pixel(4, 8));
    }

    #[test]
    fn page_rows_follow_layout() {
        let mut fb = Framebuffer::with_size(3, 16);
        fb.bytes_mut().copy_from_slice(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(fb.page_row(1), &[4, 5, 6]);
        let rows: Vec<&[u8]> = fb.page_rows().collect();
        assert_eq!(rows, vec![&[1u8, 2, 3][..], &[4, 5, 6][..]]);
    }

    #[test]
    fn clear_and_shared() {
        let shared = new_framebuffer(0xAA);
        assert!(shared.borrow().bytes().iter().all(|&b| b == 0xAA));
        shared.borrow_mut().clear(true);
        assert!(shared.borrow().bytes().iter().all(|&b| b == 0xFF));
        shared.borrow_mut().clear(false);
        assert!(shared.borrow().bytes().iter().all(|&b| b == 0x00));
    }
}
