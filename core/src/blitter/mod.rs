//! # Sprite blitter
//!
//! Draws packed [`Bitmap`] assets onto a page-organized [`Framebuffer`].
//!
//! ```ignore
//! let ship = Bitmap::new(SHIP)?;
//! let ship_mask = Mask::new(SHIP_MASK);
//!
//! let mut sprites = fb.sprites();
//! sprites.draw_overwrite(0, 0, background, 0);
//! sprites.draw_external_mask(x, y, ship, ship_mask, frame, frame);
//! sprites.draw_self_masked(x + 4, y - 3, exhaust, tick % 3);
//! ```
//!
//! Sprites may sit partially or entirely off the panel in any direction.
//! Anything that cannot be drawn (no bitmap, off the panel, a frame the asset
//! doesn't have) is skipped without touching the framebuffer.
//!
//! ## Modes
//!
//! | Mode           | Per framebuffer byte                      |
//! |----------------|-------------------------------------------|
//! | `Unmasked`     | sprite rectangle overwritten              |
//! | `SelfMasked`   | `fb \| image`                             |
//! | `Erase`        | `fb & !image`                             |
//! | `ExternalMask` | `(fb & !mask) \| image`, separate mask    |
//! | `CombinedMask` | same as `ExternalMask`, interleaved asset |

pub mod clip;
mod compose;


use log::{debug, trace, warn};

use crate::asset::{Bitmap, Mask};
use crate::blitter::clip::Clip;
use crate::framebuffer::Framebuffer;
use crate::mode::DrawMode;

/// Everything needed for one draw.
///
/// [`DrawMode::Auto`] is resolved when the request is built, so
/// [`DrawRequest::mode`] never returns it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DrawRequest<'a> {
    pub x: i16,
    pub y: i16,
    pub bitmap: Option<Bitmap<'a>>,
    pub frame: u8,
    pub mask: Option<Mask<'a>>,
    pub mask_frame: u8,
    mode: DrawMode,
}

impl<'a> DrawRequest<'a> {
    pub fn new(
        x: i16,
        y: i16,
        bitmap: Option<Bitmap<'a>>,
        frame: u8,
        mask: Option<Mask<'a>>,
        mask_frame: u8,
        mode: DrawMode,
    ) -> Self {
        Self {
            x,
            y,
            bitmap,
            frame,
            mask,
            mask_frame,
            mode: mode.resolve(mask.is_some()),
        }
    }

    #[inline(always)]
    pub fn mode(&self) -> DrawMode {
        self.mode
    }
}

struct Frames<'a> {
    image: &'a [u8],
    mask: Option<&'a [u8]>,
}

/// Pick the image (and mask) frame a request refers to.
fn select_frames<'a>(request: &DrawRequest<'a>, bitmap: Bitmap<'a>) -> Option<Frames<'a>> {
    let Some(image) = bitmap.frame(request.frame, request.mode) else {
        warn!(target: "sprites", "frame {} is past the end of a {}x{} bitmap holding {} frames",
            request.frame, bitmap.width(), bitmap.height(), bitmap.frame_count(request.mode));
        return None;
    };

    let mask = match (request.mode, request.mask) {
        (DrawMode::ExternalMask, Some(mask)) => {
            let Some(frame) = mask.frame(request.mask_frame, bitmap.width(), bitmap.pages()) else {
                warn!(target: "sprites", "mask frame {} is past the end of a {} byte mask",
                    request.mask_frame, mask.data().len());
                return None;
            };
            Some(frame)
        }
        (DrawMode::ExternalMask, None) => {
            warn!(target: "sprites", "masked draw requested without a mask asset");
            return None;
        }
        _ => None,
    };

    Some(Frames { image, mask })
}

/// Exclusive drawing access to a framebuffer.
///
/// Obtained from [`Framebuffer::sprites`]. Draws are applied in call order,
/// each one complete before the next starts.
pub struct Sprites<'fb> {
    fb: &'fb mut Framebuffer,
}

impl<'fb> Sprites<'fb> {
    pub(crate) fn new(fb: &'fb mut Framebuffer) -> Self {
        Self { fb }
    }

    pub fn framebuffer(&mut self) -> &mut Framebuffer {
        self.fb
    }

    /// Draw `bitmap` as an opaque rectangle.
    ///
    /// Every pixel of the sprite's page-rows is replaced, lit or not.
    pub fn draw_overwrite(&mut self, x: i16, y: i16, bitmap: Bitmap<'_>, frame: u8) {
        self.draw(&DrawRequest::new(x, y, Some(bitmap), frame, None, 0, DrawMode::Unmasked));
    }

    /// Draw only the lit pixels of `bitmap`.
    pub fn draw_self_masked(&mut self, x: i16, y: i16, bitmap: Bitmap<'_>, frame: u8) {
        self.draw(&DrawRequest::new(x, y, Some(bitmap), frame, None, 0, DrawMode::SelfMasked));
    }

    /// Clear every framebuffer pixel that is lit in `bitmap`.
    pub fn draw_erase(&mut self, x: i16, y: i16, bitmap: Bitmap<'_>, frame: u8) {
        self.draw(&DrawRequest::new(x, y, Some(bitmap), frame, None, 0, DrawMode::Erase));
    }

    /// Draw `bitmap` through a separate mask.
    ///
    /// The two frame indices are independent; the mask frame is sized like a
    /// frame of `bitmap`.
    pub fn draw_external_mask(
        &mut self,
        x: i16,
        y: i16,
        bitmap: Bitmap<'_>,
        mask: Mask<'_>,
        frame: u8,
        mask_frame: u8,
    ) {
        self.draw(&DrawRequest::new(
            x,
            y,
            Some(bitmap),
            frame,
            Some(mask),
            mask_frame,
            DrawMode::ExternalMask,
        ));
    }

    /// Draw an asset that interleaves an image and a mask byte per cell.
    pub fn draw_plus_mask(&mut self, x: i16, y: i16, bitmap: Bitmap<'_>, frame: u8) {
        self.draw(&DrawRequest::new(x, y, Some(bitmap), frame, None, 0, DrawMode::CombinedMask));
    }

    pub fn draw(&mut self, request: &DrawRequest<'_>) {
        let Some(bitmap) = request.bitmap else {
            return;
        };

        let Some(frames) = select_frames(request, bitmap) else {
            return;
        };

        let Some(clip) = Clip::compute(
            request.x,
            request.y,
            bitmap.width(),
            bitmap.height(),
            self.fb.width(),
            self.fb.height(),
        ) else {
            debug!(target: "sprites", "{}x{} sprite at ({}, {}) is off the panel, skipped",
                bitmap.width(), bitmap.height(), request.x, request.y);
            return;
        };

        trace!(target: "sprites", "{:?} {}x{} frame {} at ({}, {}): {:?}",
            request.mode, bitmap.width(), bitmap.height(), request.frame, request.x, request.y, clip);

        let sprite_width = bitmap.width() as usize;
        match request.mode {
            DrawMode::CombinedMask => compose::blit_plus_mask(self.fb, &clip, sprite_width, frames.image),
            mode => compose::blit(self.fb, &clip, sprite_width, frames.image, frames.mask, mode),
        }
    }
}
