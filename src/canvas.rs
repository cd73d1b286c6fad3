use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::{Rgb888, RgbColor},
    Pixel,
};
use image::{Rgb, RgbImage};
use std::convert::Infallible;

/// Lets embedded-graphics draw straight into an `RgbImage`.
pub(crate) struct ImageTarget<'a> {
    canvas: &'a mut RgbImage,
}

impl<'a> ImageTarget<'a> {
    pub(crate) fn new(canvas: &'a mut RgbImage) -> Self {
        ImageTarget { canvas }
    }
}

pub(crate) fn to_rgb888(color: Rgb<u8>) -> Rgb888 {
    Rgb888::new(color[0], color[1], color[2])
}

impl OriginDimensions for ImageTarget<'_> {
    fn size(&self) -> Size {
        Size::new(self.canvas.width(), self.canvas.height())
    }
}

impl DrawTarget for ImageTarget<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = self.canvas.dimensions();
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < width && y < height {
                self.canvas.put_pixel(x, y, Rgb([color.r(), color.g(), color.b()]));
            }
        }
        Ok(())
    }
}
