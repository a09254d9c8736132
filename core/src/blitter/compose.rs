use crate::blitter::clip::Clip;
use crate::framebuffer::Framebuffer;
use crate::mode::DrawMode;

/// One sprite byte shifted into place, as bits to clear and bits to set.
///
/// The low byte of each lane belongs to the current page-row, the high byte
/// spills into the page-row below. A framebuffer byte becomes
/// `(fb & !clear) | set`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Stencil {
    pub clear: u16,
    pub set: u16,
}

impl Stencil {
    #[inline(always)]
    pub fn new(mode: DrawMode, image: u8, mask: u8, y_offset: u32) -> Self {
        let image = (image as u16) << y_offset;
        let mask = (mask as u16) << y_offset;

        match mode {
            // Auto never reaches composition, requests resolve it
            DrawMode::Unmasked | DrawMode::Auto => Stencil {
                clear: 0x00FF << y_offset,
                set: image,
            },
            DrawMode::SelfMasked => Stencil { clear: 0, set: image },
            DrawMode::Erase => Stencil { clear: image, set: 0 },
            DrawMode::ExternalMask | DrawMode::CombinedMask => Stencil { clear: mask, set: image },
        }
    }

    #[inline(always)]
    pub fn apply_low(self, dst: u8) -> u8 {
        (dst & !low_byte(self.clear)) | low_byte(self.set)
    }

    #[inline(always)]
    pub fn apply_high(self, dst: u8) -> u8 {
        (dst & !high_byte(self.clear)) | high_byte(self.set)
    }
}

#[inline(always)]
fn low_byte(value: u16) -> u8 {
    (value & 0xFF) as u8
}

#[inline(always)]
fn high_byte(value: u16) -> u8 {
    ((value >> 8) & 0xFF) as u8
}

/// Composite a plain frame, with an optional separate mask frame of the same shape.
pub(crate) fn blit(
    fb: &mut Framebuffer,
    clip: &Clip,
    sprite_width: usize,
    image: &[u8],
    mask: Option<&[u8]>,
    mode: DrawMode,
) {
    let fb_width = fb.width();
    let last_row = fb.pages() as isize - 1;
    let buffer = fb.bytes_mut();
    let y_offset = clip.y_offset;

    let mut row = clip.first_row;
    let mut src = clip.src_row * sprite_width + clip.x_offset;

    for _ in 0..clip.rows {
        for col in 0..clip.width {
            let mask_byte = mask.map_or(0xFF, |mask| mask[src + col]);
            let stencil = Stencil::new(mode, image[src + col], mask_byte, y_offset);
            let dst_x = clip.dst_x + col;

            if row >= 0 {
                let ofs = row as usize * fb_width + dst_x;
                buffer[ofs] = stencil.apply_low(buffer[ofs]);
            }
            // the spillover is visible even when the top page-row is not
            if y_offset != 0 && row < last_row {
                let ofs = (row + 1) as usize * fb_width + dst_x;
                buffer[ofs] = stencil.apply_high(buffer[ofs]);
            }
        }
        row += 1;
        src += sprite_width;
    }
}

/// Composite a frame with interleaved image and mask bytes.
///
/// Walks the asset with a single source index and keeps a second framebuffer
/// index for the spillover page-row instead of recomputing it per byte.
pub(crate) fn blit_plus_mask(fb: &mut Framebuffer, clip: &Clip, sprite_width: usize, frame: &[u8]) {
    let fb_width = fb.width();
    let last_row = fb.pages() as isize - 1;
    let buffer = fb.bytes_mut();
    let y_offset = clip.y_offset;

    let mut sprite_ofs = (clip.src_row * sprite_width + clip.x_offset) * 2;
    let sprite_ofs_jump = (sprite_width - clip.width) * 2;
    let buffer_ofs_jump = (fb_width - clip.width) as isize;

    // negative while the first page-row sits above the panel
    let mut buffer_ofs = clip.first_row * fb_width as isize + clip.dst_x as isize;
    let mut buffer_ofs_2 = buffer_ofs + fb_width as isize;
    let mut row = clip.first_row;

    for _ in 0..clip.rows {
        for _ in 0..clip.width {
            let image = frame[sprite_ofs];
            let mask = frame[sprite_ofs + 1];
            sprite_ofs += 2;

            let stencil = Stencil::new(DrawMode::CombinedMask, image, mask, y_offset);

            if y_offset != 0 && row < last_row {
                let ofs = buffer_ofs_2 as usize;
                buffer[ofs] = stencil.apply_high(buffer[ofs]);
            }
            if row >= 0 {
                let ofs = buffer_ofs as usize;
                buffer[ofs] = stencil.apply_low(buffer[ofs]);
            }
            buffer_ofs += 1;
            buffer_ofs_2 += 1;
        }
        row += 1;
        sprite_ofs += sprite_ofs_jump;
        buffer_ofs += buffer_ofs_jump;
        buffer_ofs_2 += buffer_ofs_jump;
    }
}
