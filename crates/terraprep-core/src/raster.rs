use std::fmt;

use ndarray::{s, Array2, ArrayView2};

use crate::error::{Result, TerraprepError};

/// A single-band raster image.
///
/// Samples are held as `u16` regardless of source depth; `bit_depth`
/// records the nominal sample range (8 or 16). Data is row-major with
/// shape `(height, width)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    pub data: Array2<u16>,
    pub bit_depth: u8,
}

impl Raster {
    /// Wrap pixel data, validating dimensions and bit depth.
    pub fn new(data: Array2<u16>, bit_depth: u8) -> Result<Self> {
        let (height, width) = data.dim();
        if height == 0 || width == 0 {
            return Err(TerraprepError::InvalidDimensions { width, height });
        }
        if bit_depth != 8 && bit_depth != 16 {
            return Err(TerraprepError::InvalidParameter(format!(
                "Unsupported bit depth {bit_depth}, expected 8 or 16"
            )));
        }
        Ok(Self { data, bit_depth })
    }

    /// All-zero raster of the given size.
    pub fn zeros(width: usize, height: usize, bit_depth: u8) -> Result<Self> {
        Self::new(Array2::zeros((height, width)), bit_depth)
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Largest representable sample value for the declared bit depth.
    pub fn max_value(&self) -> u16 {
        if self.bit_depth == 8 {
            u8::MAX as u16
        } else {
            u16::MAX
        }
    }

    /// Borrow the sub-block covered by `window` without copying.
    ///
    /// The window must lie fully inside the raster; it is never clipped.
    pub fn view(&self, window: &Window) -> Result<ArrayView2<'_, u16>> {
        let checked = window.validated(self.width(), self.height())?;
        let x = checked.x as usize;
        let y = checked.y as usize;
        Ok(self
            .data
            .slice(s![y..y + checked.height, x..x + checked.width]))
    }

    /// Copy the sub-block covered by `window` into a new raster.
    pub fn crop(&self, window: &Window) -> Result<Raster> {
        let view = self.view(window)?;
        Ok(Raster {
            data: view.to_owned(),
            bit_depth: self.bit_depth,
        })
    }
}

/// A rectangular region of a raster.
///
/// The origin is signed so that displaced candidate windows can be
/// described before bounds checking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub x: i64,
    pub y: i64,
    pub width: usize,
    pub height: usize,
}

impl Window {
    pub fn new(x: i64, y: i64, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square window of side `size` at (x, y).
    pub fn square(x: i64, y: i64, size: usize) -> Self {
        Self::new(x, y, size, size)
    }

    /// Check that the window lies fully inside a raster of the given size.
    pub fn validated(&self, raster_width: usize, raster_height: usize) -> Result<Window> {
        if self.width == 0 || self.height == 0 {
            return Err(TerraprepError::InvalidParameter(
                "Window width and height must be > 0".into(),
            ));
        }
        if self.x < 0
            || self.y < 0
            || self.x + self.width as i64 > raster_width as i64
            || self.y + self.height as i64 > raster_height as i64
        {
            return Err(TerraprepError::WindowOutOfBounds {
                window: *self,
                raster_width,
                raster_height,
            });
        }
        Ok(*self)
    }

    /// Slide the origin so the window fits inside a raster of the given
    /// size. Fails only when the window is larger than the raster.
    pub fn clamped(&self, raster_width: usize, raster_height: usize) -> Result<Window> {
        if self.width == 0 || self.height == 0 {
            return Err(TerraprepError::InvalidParameter(
                "Window width and height must be > 0".into(),
            ));
        }
        if self.width > raster_width || self.height > raster_height {
            return Err(TerraprepError::WindowOutOfBounds {
                window: *self,
                raster_width,
                raster_height,
            });
        }
        let max_x = (raster_width - self.width) as i64;
        let max_y = (raster_height - self.height) as i64;
        Ok(Window {
            x: self.x.clamp(0, max_x),
            y: self.y.clamp(0, max_y),
            ..*self
        })
    }

    /// Translate the origin by a shift.
    pub fn offset(&self, shift: Shift) -> Window {
        Window {
            x: self.x + shift.dx,
            y: self.y + shift.dy,
            ..*self
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{} {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// Integer pixel displacement. Positive `dx` points right, positive `dy`
/// points down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Shift {
    pub dx: i64,
    pub dy: i64,
}

impl Shift {
    pub fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }
}

impl std::ops::Neg for Shift {
    type Output = Shift;

    fn neg(self) -> Shift {
        Shift {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_validated_rejects_zero_size() {
        let result = Window::new(0, 0, 0, 5).validated(10, 10);
        assert!(matches!(
            result,
            Err(TerraprepError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_window_validated_rejects_negative_origin() {
        let result = Window::new(-1, 0, 4, 4).validated(10, 10);
        assert!(matches!(
            result,
            Err(TerraprepError::WindowOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_window_clamped_slides_origin() {
        let window = Window::new(8, -3, 4, 4).clamped(10, 10).unwrap();
        assert_eq!(window.x, 6);
        assert_eq!(window.y, 0);
        assert_eq!(window.width, 4);
    }

    #[test]
    fn test_window_clamped_rejects_oversized() {
        let result = Window::new(0, 0, 11, 4).clamped(10, 10);
        assert!(matches!(
            result,
            Err(TerraprepError::WindowOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_shift_negation() {
        assert_eq!(-Shift::new(3, -2), Shift::new(-3, 2));
    }
}
