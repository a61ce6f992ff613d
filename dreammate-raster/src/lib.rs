//! # dreammate-raster
//!
//! A `RasterCapture` implementation that draws a captured character-cell
//! region with an 8x8 bitmap font and encodes it as JPEG or PNG.
//!
//! ```rust
//! use dreammate_raster::GlyphRasterizer;
//! use dreammate_types::{CaptureOptions, CaptureRegion, ImageFormat, RasterCapture, Rgb};
//!
//! let region = CaptureRegion::from_lines(&["Dream Journey"], Rgb::BLACK);
//! let png = GlyphRasterizer::new()
//!     .capture(&region, &CaptureOptions::default().with_format(ImageFormat::Png))
//!     .unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```

mod glyph;

use dreammate_types::{CaptureError, CaptureOptions, CaptureRegion, ImageFormat, RasterCapture};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{Rgb as Pixel, RgbImage};
use log::debug;

/// Width of a glyph in unscaled pixels.
const GLYPH_SIZE: u32 = 8;
/// Height of a cell in unscaled pixels; glyphs are centered vertically.
const CELL_HEIGHT: u32 = 12;
/// Largest image drawn, in pixels.
const MAX_PIXELS: u64 = 50_000_000;

/// Draws cells with the `font8x8` bitmap font.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphRasterizer {
    /// Blank cells around the region.
    margin_cells: u32,
}

impl GlyphRasterizer {
    pub fn new() -> Self {
        Self { margin_cells: 1 }
    }

    pub fn with_margin(mut self, cells: u32) -> Self {
        self.margin_cells = cells;
        self
    }

    /// Draw the region without encoding it.
    pub fn render(
        &self,
        region: &CaptureRegion,
        options: &CaptureOptions,
    ) -> Result<RgbImage, CaptureError> {
        if region.is_empty() {
            return Err(CaptureError::EmptyRegion);
        }
        let scale = options.scale;
        if scale == 0 {
            return Err(CaptureError::InvalidScale(scale));
        }

        let (width, height) = self.image_size(region, scale)?;
        let cell_w = GLYPH_SIZE * scale;
        let cell_h = CELL_HEIGHT * scale;
        let margin_x = self.margin_cells * cell_w;
        let margin_y = self.margin_cells * cell_h;

        let mut img = RgbImage::from_pixel(width, height, Pixel(options.background.channels()));

        for (y, row) in region.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let left = margin_x + x as u32 * cell_w;
                let top = margin_y + y as u32 * cell_h;

                if let Some(bg) = cell.bg {
                    fill(&mut img, left, top, cell_w, cell_h, Pixel(bg.channels()));
                }
                if cell.is_blank() {
                    continue;
                }

                let bitmap = glyph::bitmap(&cell.symbol);
                let glyph_top = top + (CELL_HEIGHT - GLYPH_SIZE) / 2 * scale;
                draw_glyph(&mut img, &bitmap, left, glyph_top, scale, Pixel(cell.fg.channels()));
                if cell.bold {
                    draw_glyph(&mut img, &bitmap, left + scale, glyph_top, scale, Pixel(cell.fg.channels()));
                }
            }
        }

        debug!(
            "rendered {}x{} cells into {width}x{height} pixels",
            region.width(),
            region.height()
        );
        Ok(img)
    }

    /// Pixel size of the drawn region, refused above `MAX_PIXELS`.
    fn image_size(&self, region: &CaptureRegion, scale: u32) -> Result<(u32, u32), CaptureError> {
        let span = |cells: u16, unit: u32| {
            (u64::from(cells) + 2 * u64::from(self.margin_cells))
                .saturating_mul(u64::from(unit) * u64::from(scale))
        };
        let width = span(region.width(), GLYPH_SIZE);
        let height = span(region.height(), CELL_HEIGHT);
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if width.saturating_mul(height) <= MAX_PIXELS => Ok((w, h)),
            _ => Err(CaptureError::TooLarge { width, height }),
        }
    }
}

impl RasterCapture for GlyphRasterizer {
    fn capture(
        &self,
        region: &CaptureRegion,
        options: &CaptureOptions,
    ) -> Result<Vec<u8>, CaptureError> {
        let img = self.render(region, options)?;
        encode(&img, options.format)
    }
}

fn encode(img: &RgbImage, format: ImageFormat) -> Result<Vec<u8>, CaptureError> {
    let mut bytes = Vec::new();
    match format {
        ImageFormat::Jpeg { quality } => {
            let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
            img.write_with_encoder(encoder)
                .map_err(CaptureError::backend)?;
        }
        ImageFormat::Png => {
            let encoder = PngEncoder::new(&mut bytes);
            img.write_with_encoder(encoder)
                .map_err(CaptureError::backend)?;
        }
    }
    Ok(bytes)
}

fn fill(img: &mut RgbImage, left: u32, top: u32, w: u32, h: u32, color: Pixel<u8>) {
    for y in top..(top + h).min(img.height()) {
        for x in left..(left + w).min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

fn draw_glyph(img: &mut RgbImage, bitmap: &[u8; 8], left: u32, top: u32, scale: u32, color: Pixel<u8>) {
    for (row, bits) in bitmap.iter().enumerate() {
        for col in 0..GLYPH_SIZE {
            if bits & (1 << col) == 0 {
                continue;
            }
            fill(
                img,
                left + col * scale,
                top + row as u32 * scale,
                scale,
                scale,
                color,
            );
        }
    }
}
