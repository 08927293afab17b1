//! Framebuffer writer using embedded-graphics
use super::{Canvas, Color};
use crate::error::{GuiError, Result};
use embedded_graphics::{
    mono_font::{ascii::FONT_5X7, MonoTextStyleBuilder},
    primitives::{Line, Primitive, PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
    text::{Baseline, Text},
    Drawable,
};
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Point, Size},
    pixelcolor::{Rgb888, RgbColor},
    Pixel,
};

/// Byte order of one pixel in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Blue first; a little-endian `0xAARRGGBB` word.
    Bgr,
    Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferInfo {
    pub width: usize,
    pub height: usize,
    /// Bytes per scanline.
    pub pitch: usize,
    pub bytes_per_pixel: usize,
    pub format: PixelFormat,
}

impl FramebufferInfo {
    /// 32-bit ARGB surface, the layout the mailbox and VBE paths hand over.
    pub const fn argb32(width: usize, height: usize, pitch: usize) -> Self {
        Self {
            width,
            height,
            pitch,
            bytes_per_pixel: 4,
            format: PixelFormat::Bgr,
        }
    }

    /// Smallest buffer length that can back this geometry, or `None` when
    /// it does not fit in `usize`.
    pub fn required_len(&self) -> Option<usize> {
        if self.height == 0 {
            return Some(0);
        }
        let last_row = self.width.checked_mul(self.bytes_per_pixel)?;
        self.pitch
            .checked_mul(self.height - 1)?
            .checked_add(last_row)
    }

    pub fn validate(&self, len: usize) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GuiError::InvalidGeometry);
        }
        if !matches!(self.bytes_per_pixel, 3 | 4) {
            return Err(GuiError::InvalidGeometry);
        }
        let row = self
            .width
            .checked_mul(self.bytes_per_pixel)
            .ok_or(GuiError::InvalidGeometry)?;
        let required = self.required_len().ok_or(GuiError::InvalidGeometry)?;
        if self.pitch < row || len < required {
            return Err(GuiError::InvalidGeometry);
        }
        if self.width > i32::MAX as usize || self.height > i32::MAX as usize {
            return Err(GuiError::InvalidGeometry);
        }
        Ok(())
    }
}

/// Borrowed view of a linear framebuffer.
///
/// The memory belongs to the boot path (bootloader or mailbox); the writer
/// only borrows it for the lifetime of the display session.
pub struct FramebufferWriter<'fb> {
    buffer: &'fb mut [u8],
    info: FramebufferInfo,
}

impl<'fb> FramebufferWriter<'fb> {
    pub fn new(buffer: &'fb mut [u8], info: FramebufferInfo) -> Result<Self> {
        info.validate(buffer.len())?;
        Ok(Self { buffer, info })
    }

    pub fn info(&self) -> FramebufferInfo {
        self.info
    }

    pub fn width(&self) -> usize {
        self.info.width
    }

    pub fn height(&self) -> usize {
        self.info.height
    }

    /// Raw bytes, scanline by scanline with `pitch` stride.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer
    }

    /// Give the framebuffer borrow back to its owner.
    pub fn into_inner(self) -> &'fb mut [u8] {
        self.buffer
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.info.width || y as usize >= self.info.height {
            return None;
        }
        Some(y as usize * self.info.pitch + x as usize * self.info.bytes_per_pixel)
    }

    #[inline]
    fn encode(&self, color: Rgb888) -> [u8; 4] {
        match self.info.format {
            PixelFormat::Bgr => [color.b(), color.g(), color.r(), 0xFF],
            PixelFormat::Rgb => [color.r(), color.g(), color.b(), 0xFF],
        }
    }

    #[inline]
    fn write_at(&mut self, offset: usize, bytes: &[u8; 4]) {
        let bpp = self.info.bytes_per_pixel;
        self.buffer[offset..offset + bpp].copy_from_slice(&bytes[..bpp]);
    }

    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(offset) = self.offset(x, y) {
            let bytes = self.encode(color.to_rgb888());
            self.write_at(offset, &bytes);
        }
    }

    pub fn read_pixel(&self, x: i32, y: i32) -> Option<Color> {
        let offset = self.offset(x, y)?;
        let px = &self.buffer[offset..offset + 3];
        Some(match self.info.format {
            PixelFormat::Bgr => Color::new(px[2], px[1], px[0]),
            PixelFormat::Rgb => Color::new(px[0], px[1], px[2]),
        })
    }
}

impl DrawTarget for FramebufferWriter<'_> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if let Some(offset) = self.offset(x, y) {
                let bytes = self.encode(color);
                self.write_at(offset, &bytes);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> core::result::Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.size.width == 0 || area.size.height == 0 {
            return Ok(());
        }
        let bytes = self.encode(color);
        let bpp = self.info.bytes_per_pixel;
        let x0 = area.top_left.x as usize;
        let y0 = area.top_left.y as usize;
        for row in y0..y0 + area.size.height as usize {
            let start = row * self.info.pitch + x0 * bpp;
            let end = start + area.size.width as usize * bpp;
            for px in self.buffer[start..end].chunks_exact_mut(bpp) {
                px.copy_from_slice(&bytes[..bpp]);
            }
        }
        Ok(())
    }
}

impl OriginDimensions for FramebufferWriter<'_> {
    fn size(&self) -> Size {
        Size::new(self.info.width as u32, self.info.height as u32)
    }
}

impl Canvas for FramebufferWriter<'_> {
    fn dimensions(&self) -> (u32, u32) {
        (self.info.width as u32, self.info.height as u32)
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.put_pixel(x, y, color);
    }

    fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.read_pixel(x, y)
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let rect = Rectangle::new(Point::new(x, y), Size::new(width, height));
        let _ = self.fill_solid(&rect, color.to_rgb888());
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(color.to_rgb888())
            .stroke_width(1)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        let _ = Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(style)
            .draw(self);
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(color.to_rgb888())
            .stroke_width(1)
            .build();
        let _ = Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(style)
            .draw(self);
    }

    fn draw_char(&mut self, x: i32, y: i32, ch: char, fg: Color, bg: Option<Color>) {
        let mut utf8 = [0u8; 4];
        let text = ch.encode_utf8(&mut utf8);
        let builder = MonoTextStyleBuilder::new()
            .font(&FONT_5X7)
            .text_color(fg.to_rgb888());
        let style = match bg {
            Some(bg) => builder.background_color(bg.to_rgb888()).build(),
            None => builder.build(),
        };
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(self);
    }
}
