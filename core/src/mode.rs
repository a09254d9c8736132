/// How sprite, mask and existing framebuffer bits combine.
///
/// Masks use one convention everywhere: a set mask bit marks a pixel the
/// sprite owns, so the framebuffer bit is cleared before the image bit is
/// OR-ed in. A clear mask bit lets the background show through.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DrawMode {
    /// Opaque rectangle: the sprite's own footprint is overwritten.
    Unmasked,
    /// Only set bits are drawn (OR).
    SelfMasked,
    /// Set bits clear the framebuffer (AND NOT).
    Erase,
    /// Image plus a separate mask asset.
    ExternalMask,
    /// Image and mask bytes interleaved in one asset.
    CombinedMask,
    /// `ExternalMask` if a mask is supplied, otherwise `Unmasked`.
    Auto,
}

impl DrawMode {
    pub const fn resolve(self, has_mask: bool) -> DrawMode {
        match self {
            DrawMode::Auto if has_mask => DrawMode::ExternalMask,
            DrawMode::Auto => DrawMode::Unmasked,
            mode => mode,
        }
    }

    pub const fn uses_mask(self) -> bool {
        matches!(self, DrawMode::ExternalMask | DrawMode::CombinedMask)
    }

    /// Frames of a combined asset store an image and a mask byte per cell.
    pub const fn frame_factor(self) -> usize {
        match self {
            DrawMode::CombinedMask => 2,
            _ => 1,
        }
    }
}

// mode bytes as stored by existing game data
const MODE_MASKED: u8 = 1;
const MODE_UNMASKED: u8 = 2;
const MODE_PLUS_MASK: u8 = 3;
const MODE_IS_MASK: u8 = 250;
const MODE_IS_MASK_ERASE: u8 = 251;
const MODE_AUTO: u8 = 255;

impl TryFrom<u8> for DrawMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            MODE_MASKED => Ok(DrawMode::ExternalMask),
            MODE_UNMASKED => Ok(DrawMode::Unmasked),
            MODE_PLUS_MASK => Ok(DrawMode::CombinedMask),
            MODE_IS_MASK => Ok(DrawMode::SelfMasked),
            MODE_IS_MASK_ERASE => Ok(DrawMode::Erase),
            MODE_AUTO => Ok(DrawMode::Auto),
            other => Err(other),
        }
    }
}

impl From<DrawMode> for u8 {
    fn from(mode: DrawMode) -> Self {
        match mode {
            DrawMode::ExternalMask => MODE_MASKED,
            DrawMode::Unmasked => MODE_UNMASKED,
            DrawMode::CombinedMask => MODE_PLUS_MASK,
            DrawMode::SelfMasked => MODE_IS_MASK,
            DrawMode::Erase => MODE_IS_MASK_ERASE,
            DrawMode::Auto => MODE_AUTO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_resolves_on_mask_presence() {
        assert_eq!(DrawMode::Auto.resolve(true), DrawMode::ExternalMask);
        assert_eq!(DrawMode::Auto.resolve(false), DrawMode::Unmasked);
        assert_eq!(DrawMode::Erase.resolve(true), DrawMode::Erase);
        assert_eq!(DrawMode::CombinedMask.resolve(false), DrawMode::CombinedMask);
    }

    #[test]
    fn legacy_mode_bytes() {
        assert_eq!(DrawMode::try_from(2u8), Ok(DrawMode::Unmasked));
        assert_eq!(DrawMode::try_from(250u8), Ok(DrawMode::SelfMasked));
        assert_eq!(DrawMode::try_from(7u8), Err(7));
        for mode in [
            DrawMode::Unmasked,
            DrawMode::SelfMasked,
            DrawMode::Erase,
            DrawMode::ExternalMask,
            DrawMode::CombinedMask,
            DrawMode::Auto,
        ] {
            assert_eq!(DrawMode::try_from(u8::from(mode)), Ok(mode));
        }
    }

    #[test]
    fn combined_frames_are_double_width() {
        assert_eq!(DrawMode::CombinedMask.frame_factor(), 2);
        assert_eq!(DrawMode::ExternalMask.frame_factor(), 1);
        assert!(DrawMode::CombinedMask.uses_mask());
        assert!(!DrawMode::SelfMasked.uses_mask());
    }
}
