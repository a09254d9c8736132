/// The part of a sprite that lands on the framebuffer.
///
/// Vertical positions are page-based: `first_row` is the page-row the first
/// rendered sprite row starts in, and may be `-1` when only its spillover into
/// page-row 0 is visible. Rows further above the panel are skipped outright
/// through `src_row`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Clip {
    /// First framebuffer column written.
    pub dst_x: usize,
    /// Sprite columns skipped on the left.
    pub x_offset: usize,
    /// Columns rendered per page-row.
    pub width: usize,
    /// `y mod 8`, always in `0..8`.
    pub y_offset: u32,
    /// Framebuffer page-row of the first rendered sprite row.
    pub first_row: isize,
    /// Sprite page-rows skipped from the top.
    pub src_row: usize,
    /// Sprite page-rows rendered.
    pub rows: usize,
}

impl Clip {
    /// Returns `None` when no pixel of the sprite can reach the panel.
    pub fn compute(
        x: i16,
        y: i16,
        sprite_width: u8,
        sprite_height: u8,
        fb_width: usize,
        fb_height: usize,
    ) -> Option<Clip> {
        let (x, y) = (x as isize, y as isize);
        let (w, h) = (sprite_width as isize, sprite_height as isize);
        let (fb_w, fb_h) = (fb_width as isize, fb_height as isize);
        let fb_pages = fb_height.div_ceil(8) as isize;

        if x + w <= 0 || x >= fb_w || y + h <= 0 || y >= fb_h {
            return None;
        }

        let x_offset = if x < 0 { -x } else { 0 };
        let width = (x + w).min(fb_w) - x.max(0);

        // floor division, so y = -1 starts in page-row -1 with y_offset 7
        let y_offset = y.rem_euclid(8);
        let mut s_row = y.div_euclid(8);

        let start_rows = if s_row < -1 { -s_row - 1 } else { 0 };

        let mut rows = (sprite_height as usize).div_ceil(8) as isize;
        if s_row + rows > fb_pages {
            rows = fb_pages - s_row;
        }
        rows -= start_rows;
        s_row += start_rows;

        if rows <= 0 || width <= 0 {
            return None;
        }

        Some(Clip {
            dst_x: x.max(0) as usize,
            x_offset: x_offset as usize,
            width: width as usize,
            y_offset: y_offset as u32,
            first_row: s_row,
            src_row: start_rows as usize,
            rows: rows as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_inside() {
        let clip = Clip::compute(4, 9, 8, 16, 80, 160).unwrap();
        assert_eq!(
            clip,
            Clip { dst_x: 4, x_offset: 0, width: 8, y_offset: 1, first_row: 1, src_row: 0, rows: 2 }
        );
    }

    #[test]
    fn off_screen_in_every_direction() {
        assert_eq!(Clip::compute(-8, 0, 8, 8, 80, 160), None);
        assert_eq!(Clip::compute(80, 0, 8, 8, 80, 160), None);
        assert_eq!(Clip::compute(0, -8, 8, 8, 80, 160), None);
        assert_eq!(Clip::compute(0, 160, 8, 8, 80, 160), None);
        assert_eq!(Clip::compute(i16::MIN, i16::MIN, 255, 255, 80, 160), None);
    }

    #[test]
    fn left_and_right_edges() {
        let left = Clip::compute(-3, 0, 8, 8, 80, 160).unwrap();
        assert_eq!((left.dst_x, left.x_offset, left.width), (0, 3, 5));

        let right = Clip::compute(76, 0, 8, 8, 80, 160).unwrap();
        assert_eq!((right.dst_x, right.x_offset, right.width), (76, 0, 4));

        let both = Clip::compute(-2, 0, 84, 8, 80, 160).unwrap();
        assert_eq!((both.dst_x, both.x_offset, both.width), (0, 2, 80));
    }

    #[test]
    fn negative_y_floors() {
        let clip = Clip::compute(0, -1, 8, 8, 80, 160).unwrap();
        assert_eq!((clip.y_offset, clip.first_row, clip.src_row, clip.rows), (7, -1, 0, 1));

        let clip = Clip::compute(0, -9, 8, 16, 80, 160).unwrap();
        assert_eq!((clip.y_offset, clip.first_row, clip.src_row, clip.rows), (7, -1, 1, 1));
    }

    #[test]
    fn rows_above_the_panel_are_skipped() {
        // 32 tall starting 20 rows above: page-rows -3..=0 plus spillover
        let clip = Clip::compute(0, -20, 8, 32, 80, 160).unwrap();
        assert_eq!(clip.y_offset, 4);
        assert_eq!(clip.first_row, -1);
        assert_eq!(clip.src_row, 2);
        assert_eq!(clip.rows, 2);
    }

    #[test]
    fn rows_below_the_panel_are_clamped() {
        let clip = Clip::compute(0, 150, 8, 24, 80, 160).unwrap();
        assert_eq!((clip.first_row, clip.y_offset, clip.rows), (18, 6, 2));

        let clip = Clip::compute(0, 159, 8, 8, 80, 160).unwrap();
        assert_eq!((clip.first_row, clip.rows), (19, 1));
    }
}
