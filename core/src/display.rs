use crate::error::OffScreen;

/// Base resolution, shared by every CHIP-8 variant.
pub const BASE_WIDTH: usize = 64;
pub const BASE_HEIGHT: usize = 32;

/// SUPER-CHIP extended resolution.
pub const EXTENDED_WIDTH: usize = 128;
pub const EXTENDED_HEIGHT: usize = 64;

/// The pixel grid the CPU draws into.
///
/// The CPU only mutates the buffer and raises the dirty flag; presenting
/// the buffer to a user-visible device is the embedding application's
/// business. The protocol is: the core calls `set_update_required` after
/// any mutating draw, the renderer presents and then calls
/// `clear_update_required`.
///
/// Scroll operations and the resolution toggle exist for the SUPER-CHIP
/// instruction set; a base-variant display ignores the resolution toggle.
pub trait Display {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Read one pixel. Fails when the coordinates are outside the grid.
    fn pixel(&self, x: usize, y: usize) -> Result<bool, OffScreen>;

    /// Write one pixel. Fails when the coordinates are outside the grid.
    fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> Result<(), OffScreen>;

    /// Blank the whole grid and raise the dirty flag.
    fn clear(&mut self);

    fn update_required(&self) -> bool;
    fn set_update_required(&mut self);
    fn clear_update_required(&mut self);

    fn high_res(&self) -> bool;
    fn set_high_res(&mut self, on: bool);

    /// Shift all rows down, filling the vacated top rows with off pixels.
    /// The line count is taken modulo 8 (modulo 16 in high resolution).
    fn scroll_down(&mut self, lines: u8);

    /// Shift all columns right by 4 pixels (8 in high resolution).
    fn scroll_right(&mut self);

    /// Shift all columns left by 4 pixels (8 in high resolution).
    fn scroll_left(&mut self);
}

/// Which display hardware a machine is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Fixed 64x32.
    Base,
    /// 64x32 at power-on, switchable to 128x64.
    Extended,
}

/// In-memory implementation of [`Display`] for both variants.
///
/// Frontends own a `Screen`, lend it to the CPU for execution, and read
/// the buffer back out when presenting.
pub struct Screen {
    pixels: Vec<bool>,
    variant: Variant,
    high_res: bool,
    update_required: bool,
}

impl Screen {
    pub fn new(variant: Variant) -> Self {
        Screen {
            pixels: vec![false; BASE_WIDTH * BASE_HEIGHT],
            variant,
            high_res: false,
            update_required: false,
        }
    }

    pub fn base() -> Self {
        Screen::new(Variant::Base)
    }

    pub fn extended() -> Self {
        Screen::new(Variant::Extended)
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Row-major snapshot of the buffer, for renderers.
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, OffScreen> {
        if x >= self.width() || y >= self.height() {
            return Err(OffScreen {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(y * self.width() + x)
    }

    fn horizontal_scroll_distance(&self) -> usize {
        if self.high_res {
            8
        } else {
            4
        }
    }
}

impl Display for Screen {
    fn width(&self) -> usize {
        if self.high_res {
            EXTENDED_WIDTH
        } else {
            BASE_WIDTH
        }
    }

    fn height(&self) -> usize {
        if self.high_res {
            EXTENDED_HEIGHT
        } else {
            BASE_HEIGHT
        }
    }

    fn pixel(&self, x: usize, y: usize) -> Result<bool, OffScreen> {
        Ok(self.pixels[self.index(x, y)?])
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> Result<(), OffScreen> {
        let index = self.index(x, y)?;
        self.pixels[index] = on;
        Ok(())
    }

    fn clear(&mut self) {
        self.pixels.fill(false);
        self.update_required = true;
    }

    fn update_required(&self) -> bool {
        self.update_required
    }

    fn set_update_required(&mut self) {
        self.update_required = true;
    }

    fn clear_update_required(&mut self) {
        self.update_required = false;
    }

    fn high_res(&self) -> bool {
        self.high_res
    }

    fn set_high_res(&mut self, on: bool) {
        if self.variant == Variant::Base || self.high_res == on {
            return;
        }
        self.high_res = on;
        // resolution switches start from a blank frame
        self.pixels = vec![false; self.width() * self.height()];
        self.update_required = true;
    }

    fn scroll_down(&mut self, lines: u8) {
        let modulo = if self.high_res { 16 } else { 8 };
        let lines = usize::from(lines) % modulo;
        if lines == 0 {
            return;
        }
        let width = self.width();
        let height = self.height();
        for y in (lines..height).rev() {
            for x in 0..width {
                self.pixels[y * width + x] = self.pixels[(y - lines) * width + x];
            }
        }
        for y in 0..lines {
            for x in 0..width {
                self.pixels[y * width + x] = false;
            }
        }
        self.update_required = true;
    }

    fn scroll_right(&mut self) {
        let distance = self.horizontal_scroll_distance();
        let width = self.width();
        for row in self.pixels.chunks_mut(width) {
            row.copy_within(0..width - distance, distance);
            row[..distance].fill(false);
        }
        self.update_required = true;
    }

    fn scroll_left(&mut self) {
        let distance = self.horizontal_scroll_distance();
        let width = self.width();
        for row in self.pixels.chunks_mut(width) {
            row.copy_within(distance.., 0);
            row[width - distance..].fill(false);
        }
        self.update_required = true;
    }
}
